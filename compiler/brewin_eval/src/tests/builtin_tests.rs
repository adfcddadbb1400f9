//! `print`, `input`, and `strtoint`.

use super::{run_err, run_full, run_ok};
use crate::errors::{ErrorType, EvalErrorKind};
use crate::LanguageLevel::{self, Flat, Typed};
use brewin_ir::TypeName;
use pretty_assertions::assert_eq;

fn run_with_input(level: LanguageLevel, source: &str, input: &[&str]) -> String {
    let outcome = run_full(level, source, input, None);
    if let Err(err) = outcome.result {
        panic!("program failed: {err}");
    }
    outcome.output
}

#[test]
fn test_input_prompt_and_result() {
    let output = run_with_input(
        Typed,
        "func main void
           funccall input \"name? \"
           funccall print \"hi \" results
         endfunc",
        &["bob"],
    );
    assert_eq!(output, "name? \nhi bob\n");
}

#[test]
fn test_input_prompt_concatenates() {
    let output = run_with_input(
        Typed,
        "func main void
           var int n
           assign n 3
           funccall input \"enter \" n \" values\"
         endfunc",
        &["x"],
    );
    assert_eq!(output, "enter 3 values\n");
}

#[test]
fn test_input_without_prompt_prints_empty_line() {
    let output = run_with_input(
        Typed,
        "func main void
           funccall input
           funccall print results
         endfunc",
        &["typed"],
    );
    assert_eq!(output, "\ntyped\n");
}

#[test]
fn test_exhausted_input_reads_empty_string() {
    let output = run_with_input(
        Typed,
        "func main void
           funccall input \"?\"
           funccall print \"[\" results \"]\"
         endfunc",
        &[],
    );
    assert_eq!(output, "?\n[]\n");
}

#[test]
fn test_input_result_reaches_caller() {
    let output = run_with_input(
        Typed,
        "func ask void
           funccall input \"q\"
         endfunc

         func main void
           funccall ask
           funccall print results
         endfunc",
        &["answer"],
    );
    assert_eq!(output, "q\nanswer\n");
}

#[test]
fn test_strtoint() {
    let output = run_with_input(
        Typed,
        "func main void
           var int x
           funccall input \"n\"
           funccall strtoint results
           assign x + resulti 1
           funccall print x
         endfunc",
        &[" 41 "],
    );
    assert_eq!(output, "n\n42\n");
}

#[test]
fn test_strtoint_errors() {
    let (err, _) = run_err(Typed, "func main void\nfunccall strtoint \"4x\"\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidIntegerText {
            text: "4x".to_string()
        }
    );
    assert_eq!(err.error_type(), ErrorType::Type);

    let (err, _) = run_err(Typed, "func main void\nfunccall strtoint 4\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::ArgumentTypeMismatch {
            param: "strtoint".to_string(),
            expected: TypeName::Str,
            got: TypeName::Int,
        }
    );

    let (err, _) = run_err(Typed, "func main void\nfunccall strtoint\nendfunc");
    assert!(matches!(err.kind, EvalErrorKind::ArityMismatch { .. }));
}

#[test]
fn test_flat_builtins_use_single_result_slot() {
    let output = run_with_input(
        Flat,
        "func main
           funccall input \"n?\"
           funccall print result
           funccall strtoint result
           assign result + result 1
           funccall print result
         endfunc",
        &["9"],
    );
    assert_eq!(output, "n?\n9\n10\n");
}

#[test]
fn test_print_shows_booleans_capitalized() {
    let output = run_ok(
        Typed,
        "func main void
           var bool b
           assign b == 1 1
           funccall print True \" \" False \" \" b
         endfunc",
    );
    assert_eq!(output, "True False True\n");
}
