//! Whole-program runs through `run_source`.

use brewin_eval::{ErrorType, EvalErrorKind, LanguageLevel};
use brewinc::commands::{RunError, RunOptions};
use pretty_assertions::assert_eq;

use crate::common::{program, run, run_with};

#[test]
fn test_level_one_program() {
    let run = run(LanguageLevel::Flat, &program("fibonacci.brewin"), &[]);
    run.result.unwrap();
    assert_eq!(run.output, "0\n1\n1\n2\n3\n5\n8\n13\n21\n34\ndone\n");
}

#[test]
fn test_level_two_program() {
    let expected = "2\n3\n5\n7\n11\n13\n17\n19\nfound 8 primes\n";
    for level in [LanguageLevel::Typed, LanguageLevel::Reference] {
        let run = run(level, &program("primes.brewin"), &[]);
        run.result.unwrap();
        assert_eq!(run.output, expected, "level {level}");
    }
}

#[test]
fn test_level_three_program() {
    let run = run(LanguageLevel::Reference, &program("accounts.brewin"), &[]);
    run.result.unwrap();
    assert_eq!(run.output, "ana: 15\nana: 115\n");
}

#[test]
fn test_level_three_program_rejected_at_level_two() {
    let run = run(LanguageLevel::Typed, &program("accounts.brewin"), &[]);
    let Err(RunError::Eval(err)) = run.result else {
        panic!("expected an evaluation error");
    };
    assert_eq!(err.error_type(), ErrorType::Name);
    assert_eq!(run.output, "");
}

#[test]
fn test_interactive_program() {
    let source = "func main void
                    var int total
                    var int i
                    while < i 2
                      funccall input \"number? \"
                      funccall strtoint results
                      assign total + total resulti
                      assign i + i 1
                    endwhile
                    funccall print \"total \" total
                  endfunc";
    let run = run(LanguageLevel::Typed, source, &["4", "38"]);
    run.result.unwrap();
    assert_eq!(run.output, "number? \nnumber? \ntotal 42\n");
}

#[test]
fn test_max_depth_option() {
    let source = "func main void
                    funccall main
                  endfunc";
    let options = RunOptions {
        level: LanguageLevel::Typed,
        max_depth: Some(10),
    };
    let run = run_with(&options, source, &[]);
    let Err(RunError::Eval(err)) = run.result else {
        panic!("expected an evaluation error");
    };
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 10 });
    assert_eq!(err.backtrace.unwrap().frames().len(), 10);
}

#[test]
fn test_error_report_text() {
    let run = run(
        LanguageLevel::Typed,
        "func main void\n  var int x\n  assign x \"s\"\nendfunc",
        &[],
    );
    let err = run.result.unwrap_err();
    assert_eq!(
        err.to_string(),
        "type error on line 3: cannot assign string to `x` of type int"
    );
}
