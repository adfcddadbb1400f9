//! Lexing as seen from the CLI.

use brewin_eval::LanguageLevel;
use brewin_ir::{LineNo, StringInterner};
use brewin_lexer::LexErrorKind;
use brewinc::commands::{parse_run_options, render_statement, RunError, RunOptions};
use pretty_assertions::assert_eq;

use crate::common::run;

fn render(line: &str) -> String {
    let interner = StringInterner::new();
    let stmt = brewin_lexer::lex_line(line, LineNo::new(0), &interner).unwrap();
    render_statement(&stmt, &interner)
}

#[test]
fn test_render_header() {
    assert_eq!(
        render("func add a:int b:refint int"),
        "[kw func] [id add] [param a:int] [param b:refint] [id int]"
    );
}

#[test]
fn test_render_expression() {
    assert_eq!(
        render("assign o.x + -3 \"a b\""),
        "[kw assign] [member o.x] [op +] [int -3] [str \"a b\"]"
    );
    assert_eq!(render("if True"), "[kw if] [bool true]");
    assert_eq!(render("   # only a comment"), "");
}

#[test]
fn test_lex_errors_stop_the_run() {
    let run = run(
        LanguageLevel::Typed,
        "func main void\n  funccall print \"never\"\n  funccall print \"oops\nendfunc",
        &[],
    );
    let Err(RunError::Lex(err)) = run.result else {
        panic!("expected a lex error");
    };
    assert_eq!(err.line, LineNo::new(2));
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(run.output, "");
}

#[test]
fn test_run_options() {
    let args: Vec<String> = ["prog.brewin", "--level=2", "--max-depth=100"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let (options, path) = parse_run_options(&args).unwrap();
    assert_eq!(path, Some("prog.brewin"));
    assert_eq!(
        options,
        RunOptions {
            level: LanguageLevel::Typed,
            max_depth: Some(100),
        }
    );
}

#[test]
fn test_run_option_errors() {
    let bad_level = vec!["--level=4".to_string()];
    assert!(parse_run_options(&bad_level).is_err());

    let unknown = vec!["--fast".to_string()];
    assert_eq!(
        parse_run_options(&unknown).unwrap_err(),
        "unknown option '--fast'"
    );

    let unlimited = vec!["--max-depth=0".to_string()];
    let (options, path) = parse_run_options(&unlimited).unwrap();
    assert_eq!(options.max_depth, None);
    assert_eq!(path, None);
}
