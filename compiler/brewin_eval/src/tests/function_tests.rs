//! Calls, parameters, return values, and the call stack.

use super::{run_err, run_full, run_ok};
use crate::errors::{ErrorType, EvalErrorKind};
use crate::LanguageLevel::Typed;
use brewin_ir::{LineNo, ReturnType, TypeName};
use pretty_assertions::assert_eq;

const FACTORIAL: &str = "
func fact n:int int
  if <= n 1
    return 1
  endif
  var int m
  assign m - n 1
  funccall fact m
  return * n resulti
endfunc

func main void
  funccall fact 5
  funccall print resulti
  funccall fact 10
  funccall print resulti
endfunc
";

#[test]
fn test_recursion() {
    assert_eq!(run_ok(Typed, FACTORIAL), "120\n3628800\n");
}

#[test]
fn test_deep_recursion_does_not_use_host_stack() {
    let output = run_ok(
        Typed,
        "func down n:int void
           if > n 0
             var int m
             assign m - n 1
             funccall down m
           endif
         endfunc

         func main void
           funccall down 20000
           funccall print \"ok\"
         endfunc",
    );
    assert_eq!(output, "ok\n");
}

#[test]
fn test_call_depth_limit() {
    let outcome = run_full(
        Typed,
        "func spin void
           funccall spin
         endfunc

         func main void
           funccall spin
         endfunc",
        &[],
        Some(50),
    );
    let err = outcome.result.unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 50 });
    assert_eq!(err.error_type(), ErrorType::Fault);
    assert_eq!(err.line, Some(LineNo::new(1)));
    let backtrace = err.backtrace.unwrap();
    assert_eq!(backtrace.frames().len(), 50);
    assert_eq!(backtrace.frames()[49].name, "main");
}

#[test]
fn test_value_and_reference_parameters() {
    let output = run_ok(
        Typed,
        "func bump_ref x:refint void
           assign x + x 1
         endfunc

         func bump_val x:int void
           assign x + x 1
         endfunc

         func main void
           var int a
           assign a 1
           funccall bump_val a
           funccall print a
           funccall bump_ref a
           funccall print a
         endfunc",
    );
    assert_eq!(output, "1\n2\n");
}

#[test]
fn test_reference_parameter_chain() {
    let output = run_ok(
        Typed,
        "func inner s:refstring void
           assign s + s \"!\"
         endfunc

         func outer s:refstring void
           funccall inner s
           funccall inner s
         endfunc

         func main void
           var string msg
           assign msg \"hi\"
           funccall outer msg
           funccall print msg
         endfunc",
    );
    assert_eq!(output, "hi!!\n");
}

#[test]
fn test_reference_parameter_with_literal() {
    let output = run_ok(
        Typed,
        "func twice x:refint void
           assign x * x 2
           funccall print x
         endfunc

         func main void
           funccall twice 21
         endfunc",
    );
    assert_eq!(output, "42\n");
}

#[test]
fn test_arity_mismatch() {
    let (err, _) = run_err(
        Typed,
        "func add a:int b:int int
           return + a b
         endfunc

         func main void
           funccall add 1
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "add".to_string(),
            expected: 2,
            got: 1,
        }
    );
    assert_eq!(err.line, Some(LineNo::new(5)));
}

#[test]
fn test_argument_type_mismatch() {
    let (err, _) = run_err(
        Typed,
        "func show b:bool void
         endfunc

         func main void
           funccall show \"yes\"
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::ArgumentTypeMismatch {
            param: "b".to_string(),
            expected: TypeName::Bool,
            got: TypeName::Str,
        }
    );

    let (err, _) = run_err(
        Typed,
        "func show b:refbool void
         endfunc

         func main void
           var int n
           funccall show n
         endfunc",
    );
    assert_eq!(err.error_type(), ErrorType::Type);
}

#[test]
fn test_result_slots_per_type() {
    let output = run_ok(
        Typed,
        "func num int
           return 7
         endfunc

         func text string
           return \"seven\"
         endfunc

         func flag bool
           return == 7 7
         endfunc

         func main void
           funccall num
           funccall text
           funccall flag
           funccall print resulti \" \" results \" \" resultb
         endfunc",
    );
    assert_eq!(output, "7 seven True\n");
}

#[test]
fn test_missing_return_value_defaults() {
    let output = run_ok(
        Typed,
        "func num int
         endfunc

         func text string
           return
         endfunc

         func main void
           funccall num
           funccall text
           funccall print resulti \"[\" results \"]\"
         endfunc",
    );
    assert_eq!(output, "0[]\n");
}

#[test]
fn test_result_slots_are_copies() {
    let output = run_ok(
        Typed,
        "func num int
           return 1
         endfunc

         func main void
           funccall num
           assign resulti 5
           funccall print resulti
           funccall num
           funccall print resulti
         endfunc",
    );
    assert_eq!(output, "5\n1\n");
}

#[test]
fn test_return_type_mismatch() {
    let (err, _) = run_err(
        Typed,
        "func num int
           return \"x\"
         endfunc

         func main void
           funccall num
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::ReturnTypeMismatch {
            expected: ReturnType::Value(TypeName::Int),
            got: TypeName::Str,
        }
    );

    let (err, _) = run_err(
        Typed,
        "func nothing void
           return 1
         endfunc

         func main void
           funccall nothing
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::ReturnTypeMismatch {
            expected: ReturnType::Void,
            got: TypeName::Int,
        }
    );
}

#[test]
fn test_main_cannot_return_a_value() {
    let (err, _) = run_err(Typed, "func main void\nreturn 1\nendfunc");
    assert_eq!(err.kind, EvalErrorKind::ValueReturnFromEntry);
}

#[test]
fn test_return_from_inside_loop() {
    let output = run_ok(
        Typed,
        "func first_over limit:int int
           var int i
           while True
             if > i limit
               return i
             endif
             assign i + i 3
           endwhile
         endfunc

         func main void
           funccall first_over 10
           funccall print resulti
         endfunc",
    );
    assert_eq!(output, "12\n");
}

#[test]
fn test_callee_cannot_see_caller_variables() {
    let (err, _) = run_err(
        Typed,
        "func peek void
           funccall print x
         endfunc

         func main void
           var int x
           funccall peek
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "x".to_string()
        }
    );
    assert_eq!(err.line, Some(LineNo::new(1)));
    let backtrace = err.backtrace.unwrap();
    let names: Vec<_> = backtrace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["peek", "main"]);
    assert_eq!(backtrace.frames()[0].line, LineNo::new(0));
}

#[test]
fn test_undefined_function() {
    let (err, _) = run_err(Typed, "func main void\nfunccall nowhere\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedFunction {
            name: "nowhere".to_string()
        }
    );
    assert_eq!(err.error_type(), ErrorType::Name);
}

#[test]
fn test_missing_main() {
    let (err, _) = run_err(Typed, "func helper void\nendfunc");
    assert_eq!(err.kind, EvalErrorKind::MissingEntryPoint);
}

#[test]
fn test_later_definition_wins() {
    let output = run_ok(
        Typed,
        "func greet void
           funccall print \"first\"
         endfunc

         func greet void
           funccall print \"second\"
         endfunc

         func main void
           funccall greet
         endfunc",
    );
    assert_eq!(output, "second\n");
}
