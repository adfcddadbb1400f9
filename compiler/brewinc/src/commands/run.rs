//! The `run` command: lex and execute a Brewin source file.

use brewin_eval::{
    stdin_handler, stdout_handler, EvalError, InterpreterBuilder, LanguageLevel,
    SharedInputHandler, SharedPrintHandler,
};
use brewin_ir::StringInterner;
use brewin_lexer::LexError;

use super::read_file;

/// Options accepted by `brewin run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub level: LanguageLevel,
    /// Maximum number of simultaneously active functions.
    pub max_depth: Option<usize>,
}

/// Why a program did not run to completion.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Split `run` arguments into options and the source path.
///
/// The first argument not starting with `-` is the path.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Option<&str>), String> {
    let mut options = RunOptions::default();
    let mut path = None;
    for arg in args {
        if let Some(level) = arg.strip_prefix("--level=") {
            options.level = level.parse::<LanguageLevel>().map_err(|e| e.to_string())?;
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse::<usize>()
                .map_err(|_| format!("invalid call depth '{depth}'"))?;
            options.max_depth = (depth > 0).then_some(depth);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.as_str());
        }
    }
    Ok((options, path))
}

/// Run a Brewin source file, printing to stdout and reading stdin.
///
/// Exits with status 1 if the program fails.
pub fn run_file(path: &str, options: &RunOptions) {
    let content = read_file(path);
    if let Err(err) = run_source(&content, options, stdout_handler(), stdin_handler()) {
        report_error(path, &err);
        std::process::exit(1);
    }
}

/// Lex and run `source` with the given handlers.
#[tracing::instrument(level = "debug", skip_all, fields(level = %options.level))]
pub fn run_source(
    source: &str,
    options: &RunOptions,
    print_handler: SharedPrintHandler,
    input_handler: SharedInputHandler,
) -> Result<(), RunError> {
    let interner = StringInterner::new();
    let program = brewin_lexer::lex(source, &interner)?;
    let mut interpreter = InterpreterBuilder::new(&program, &interner)
        .level(options.level)
        .max_call_depth(options.max_depth)
        .print_handler(print_handler)
        .input_handler(input_handler)
        .build();
    interpreter.run()?;
    Ok(())
}

fn report_error(path: &str, err: &RunError) {
    eprintln!("error in '{path}': {err}");
    if let RunError::Eval(EvalError {
        backtrace: Some(backtrace),
        ..
    }) = err
    {
        eprint!("{backtrace}");
    }
}
