#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

mod builtin_tests;
mod function_tests;
mod program_tests;

use brewin_ir::StringInterner;

use crate::{buffer_handler, scripted_handler, EvalError, EvalResult, InterpreterBuilder, LanguageLevel};

/// Result of running a whole program, with everything printed before it
/// stopped.
pub(crate) struct Outcome {
    pub output: String,
    pub result: EvalResult<()>,
}

pub(crate) fn run_full(
    level: LanguageLevel,
    source: &str,
    input: &[&str],
    max_depth: Option<usize>,
) -> Outcome {
    let interner = StringInterner::new();
    let program = brewin_lexer::lex(source, &interner).unwrap();
    let output = buffer_handler();
    let mut interp = InterpreterBuilder::new(&program, &interner)
        .level(level)
        .print_handler(output.clone())
        .input_handler(scripted_handler(input.iter().copied()))
        .max_call_depth(max_depth)
        .build();
    let result = interp.run();
    Outcome {
        output: output.get_output(),
        result,
    }
}

/// Run a program that must succeed and return its output.
pub(crate) fn run_ok(level: LanguageLevel, source: &str) -> String {
    let outcome = run_full(level, source, &[], None);
    if let Err(err) = &outcome.result {
        panic!("program failed: {err}\noutput so far:\n{}", outcome.output);
    }
    outcome.output
}

/// Run a program that must fail; returns the error and the output.
pub(crate) fn run_err(level: LanguageLevel, source: &str) -> (EvalError, String) {
    let outcome = run_full(level, source, &[], None);
    match outcome.result {
        Ok(()) => panic!("program succeeded with output:\n{}", outcome.output),
        Err(err) => (err, outcome.output),
    }
}
