//! Whole-program tests: statements, expressions, and control flow.

use super::{run_err, run_ok};
use crate::errors::{ErrorType, EvalErrorKind};
use crate::LanguageLevel::{Reference, Typed};
use brewin_ir::{BinaryOp, Keyword, LineNo, TypeName};
use pretty_assertions::assert_eq;

#[test]
fn test_print_sum() {
    let output = run_ok(
        Typed,
        "func main void
           var int x
           assign x + 2 3
           funccall print x
         endfunc",
    );
    assert_eq!(output, "5\n");
}

#[test]
fn test_mixed_operands_fail_before_printing() {
    let (err, output) = run_err(
        Typed,
        "func main void
           var int x
           assign x + 2 \"3\"
           funccall print x
         endfunc",
    );
    assert_eq!(err.error_type(), ErrorType::Type);
    assert_eq!(err.line, Some(LineNo::new(2)));
    assert_eq!(output, "");
}

#[test]
fn test_output_before_error_is_kept() {
    let (err, output) = run_err(
        Typed,
        "func main void
           funccall print \"before\"
           funccall print missing
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "missing".to_string()
        }
    );
    assert_eq!(output, "before\n");
}

#[test]
fn test_floor_division_in_program() {
    let output = run_ok(
        Typed,
        "func main void
           var int q r
           assign q / -7 2
           assign r % -7 2
           funccall print q \" \" r
         endfunc",
    );
    assert_eq!(output, "-4 1\n");
}

#[test]
fn test_print_arguments_are_single_operands() {
    let (err, _) = run_err(
        Typed,
        "func main void
           funccall print + 1 2
         endfunc",
    );
    assert_eq!(err.kind, EvalErrorKind::MalformedExpression);
}

#[test]
fn test_print_concatenates_without_separator() {
    let output = run_ok(
        Typed,
        "func main void
           var int x
           var bool b
           assign x 5
           funccall print \"x is \" x \" and \" b \" \" True
         endfunc",
    );
    assert_eq!(output, "x is 5 and False True\n");
}

#[test]
fn test_comments_and_blank_lines() {
    let output = run_ok(
        Typed,
        "# leading comment
func main void

  funccall print \"a#b\" # trailing comment
  # indented comment
endfunc",
    );
    assert_eq!(output, "a#b\n");
}

#[test]
fn test_while_loop() {
    let output = run_ok(
        Typed,
        "func main void
           var int i
           while < i 3
             funccall print i
             assign i + i 1
           endwhile
           funccall print \"done\"
         endfunc",
    );
    assert_eq!(output, "0\n1\n2\ndone\n");
}

#[test]
fn test_nested_loops() {
    let output = run_ok(
        Typed,
        "func main void
           var int i j
           while < i 2
             assign j 0
             while < j 2
               funccall print i j
               assign j + j 1
             endwhile
             assign i + i 1
           endwhile
         endfunc",
    );
    assert_eq!(output, "00\n01\n10\n11\n");
}

#[test]
fn test_loop_that_never_runs() {
    let output = run_ok(
        Typed,
        "func main void
           while False
             funccall print \"never\"
           endwhile
           funccall print \"after\"
         endfunc",
    );
    assert_eq!(output, "after\n");
}

#[test]
fn test_nested_if_else() {
    let output = run_ok(
        Typed,
        "func main void
           var int x
           assign x 7
           if > x 5
             if == % x 2 0
               funccall print \"big even\"
             else
               funccall print \"big odd\"
             endif
           else
             funccall print \"small\"
           endif
           funccall print \"end\"
         endfunc",
    );
    assert_eq!(output, "big odd\nend\n");
}

#[test]
fn test_if_without_else_skips_body() {
    let output = run_ok(
        Typed,
        "func main void
           if False
             funccall print \"skipped\"
             if True
               funccall print \"also skipped\"
             endif
           endif
           funccall print \"reached\"
         endfunc",
    );
    assert_eq!(output, "reached\n");
}

#[test]
fn test_block_scopes() {
    let (err, output) = run_err(
        Typed,
        "func main void
           var int x
           assign x 1
           if True
             var int x
             assign x 2
             var string y
             funccall print x
           endif
           funccall print x
           funccall print y
         endfunc",
    );
    assert_eq!(output, "2\n1\n");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "y".to_string()
        }
    );
    assert_eq!(err.line, Some(LineNo::new(10)));
}

#[test]
fn test_outer_variable_assigned_from_block() {
    let output = run_ok(
        Typed,
        "func main void
           var int total
           var int i
           while < i 4
             assign total + total i
             assign i + i 1
           endwhile
           funccall print total
         endfunc",
    );
    assert_eq!(output, "6\n");
}

#[test]
fn test_loop_body_scope_is_fresh_each_iteration() {
    let output = run_ok(
        Typed,
        "func main void
           var int i
           while < i 2
             var int seen
             assign seen + seen 1
             funccall print seen
             assign i + i 1
           endwhile
         endfunc",
    );
    assert_eq!(output, "1\n1\n");
}

#[test]
fn test_redeclaration_in_same_scope() {
    let (err, _) = run_err(
        Typed,
        "func main void
           var int x
           var string x
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::AlreadyDeclared {
            name: "x".to_string()
        }
    );
    assert_eq!(err.error_type(), ErrorType::Name);
}

#[test]
fn test_var_validation() {
    let (err, _) = run_err(Typed, "func main void\nvar int 1x\nendfunc");
    assert!(matches!(err.kind, EvalErrorKind::InvalidVariableName { .. }));

    let (err, _) = run_err(Typed, "func main void\nvar int o.x\nendfunc");
    assert!(matches!(err.kind, EvalErrorKind::InvalidVariableName { .. }));

    let (err, _) = run_err(Typed, "func main void\nvar float x\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidVarType {
            word: "float".to_string()
        }
    );
    assert_eq!(err.error_type(), ErrorType::Type);

    let (err, _) = run_err(Typed, "func main void\nvar int\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::MissingOperands {
            keyword: Keyword::Var
        }
    );
}

#[test]
fn test_declared_defaults() {
    let output = run_ok(
        Typed,
        "func main void
           var int i
           var string s
           var bool b
           funccall print i \"[\" s \"]\" b
         endfunc",
    );
    assert_eq!(output, "0[]False\n");
}

#[test]
fn test_assignment_keeps_declared_type() {
    let (err, _) = run_err(
        Typed,
        "func main void
           var bool b
           assign b 5
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::AssignTypeMismatch {
            name: "b".to_string(),
            expected: TypeName::Bool,
            got: TypeName::Int,
        }
    );
}

#[test]
fn test_assign_to_undeclared() {
    let (err, _) = run_err(Typed, "func main void\nassign z 1\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "z".to_string()
        }
    );
}

#[test]
fn test_non_bool_condition() {
    let (err, _) = run_err(Typed, "func main void\nif 5\nendif\nendfunc");
    assert_eq!(err.kind, EvalErrorKind::NonBoolCondition { got: TypeName::Int });

    let (err, _) = run_err(Typed, "func main void\nwhile \"x\"\nendwhile\nendfunc");
    assert_eq!(err.kind, EvalErrorKind::NonBoolCondition { got: TypeName::Str });
}

#[test]
fn test_unmatched_blocks() {
    let (err, _) = run_err(Typed, "func main void\nwhile False\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnmatchedBlock {
            opener: Keyword::While
        }
    );
    assert_eq!(err.error_type(), ErrorType::Syntax);

    let (err, _) = run_err(Typed, "func main void\nif False\nendfunc");
    assert_eq!(err.kind, EvalErrorKind::UnmatchedBlock { opener: Keyword::If });

    let (err, _) = run_err(Typed, "func main void\nendwhile\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnexpectedCloser {
            closer: Keyword::EndWhile
        }
    );

    // An `endif` inside a loop body does not close the loop.
    let (err, _) = run_err(
        Typed,
        "func main void
           var int x
           while < x 1
             var int y
           endif
           assign y 3
           assign x 1
           endwhile
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::UnexpectedCloser {
            closer: Keyword::EndIf
        }
    );
    assert_eq!(err.error_type(), ErrorType::Syntax);
    assert_eq!(err.line, Some(LineNo::new(4)));

    let (err, _) = run_err(Typed, "func main void\nendif\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnexpectedCloser {
            closer: Keyword::EndIf
        }
    );

    let (err, _) = run_err(Typed, "func main void\nelse\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnexpectedCloser {
            closer: Keyword::Else
        }
    );

    // Falling into `endfunc` with a body still open.
    let (err, _) = run_err(Typed, "func main void\nif True\nendfunc\nendif");
    assert_eq!(err.kind, EvalErrorKind::UnmatchedBlock { opener: Keyword::If });
}

#[test]
fn test_stray_endlambda_in_function() {
    let (err, output) = run_err(
        Reference,
        "func main void
           funccall print \"a\"
           endlambda
           funccall print \"b\"
         endfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::UnexpectedCloser {
            closer: Keyword::EndLambda
        }
    );
    assert_eq!(err.line, Some(LineNo::new(2)));
    assert_eq!(output, "a\n");
}

#[test]
fn test_runtime_faults() {
    let (err, _) = run_err(Typed, "func main void\nvar int x\nassign x / 1 0\nendfunc");
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert_eq!(err.error_type(), ErrorType::Fault);

    let (err, _) = run_err(Typed, "func main void\nvar int x\nassign x % 1 0\nendfunc");
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);

    let (err, _) = run_err(
        Typed,
        "func main void\nvar int x\nassign x + 9223372036854775807 1\nendfunc",
    );
    assert_eq!(
        err.kind,
        EvalErrorKind::IntegerOverflow {
            operation: BinaryOp::Add
        }
    );
}

#[test]
fn test_unknown_statement() {
    let (err, _) = run_err(Typed, "func main void\nfrobnicate x\nendfunc");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownStatement {
            word: "frobnicate".to_string()
        }
    );
    assert_eq!(err.to_string(), "name error on line 2: unknown statement `frobnicate`");
}

#[test]
fn test_bare_return_from_main_halts() {
    let output = run_ok(
        Typed,
        "func main void
           funccall print \"one\"
           return
           funccall print \"two\"
         endfunc",
    );
    assert_eq!(output, "one\n");
}

#[test]
fn test_main_defined_after_helpers() {
    let output = run_ok(
        Typed,
        "func helper void
           funccall print \"helper\"
         endfunc

         func main void
           funccall helper
           funccall print \"main\"
         endfunc",
    );
    assert_eq!(output, "helper\nmain\n");
}
