//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch: the operand type set is fixed, so pattern
//! matching gives exhaustiveness checking for free. Both operands must
//! have the same runtime type.

use brewin_ir::{BinaryOp, TypeName};

use crate::errors::{
    binary_type_mismatch, division_by_zero, integer_overflow, invalid_binary_op, modulo_by_zero,
    EvalResult,
};
use crate::value::Value;

/// Checked arithmetic where the only error case is overflow.
#[inline]
fn checked_arith(result: Option<i64>, op: BinaryOp) -> EvalResult<Value> {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op))
}

/// Quotient rounded toward negative infinity.
pub fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder with the sign of the divisor, paired with [`floor_div`].
pub fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        r.checked_add(b)
    } else {
        Some(r)
    }
}

/// Evaluate `left op right`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are popped off the evaluation stack by value"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult<Value> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(*a, *b, op),
        _ if left.type_name() == right.type_name() => {
            Err(invalid_binary_op(left.type_name(), op))
        }
        _ => Err(binary_type_mismatch(left.type_name(), right.type_name())),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), op),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), op),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), op),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => checked_arith(floor_div(a, b), op),
        BinaryOp::Mod if b == 0 => Err(modulo_by_zero()),
        BinaryOp::Mod => checked_arith(floor_mod(a, b), op),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        BinaryOp::And | BinaryOp::Or => Err(invalid_binary_op(TypeName::Int, op)),
    }
}

/// Both operands are always evaluated; there is no short-circuiting.
fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::And => Ok(Value::Bool(a & b)),
        BinaryOp::Or => Ok(Value::Bool(a | b)),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(invalid_binary_op(TypeName::Bool, op)),
    }
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::Str(format!("{a}{b}"))),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        // Lexicographic comparison
        BinaryOp::Lt => Ok(Value::Bool(a < b)),
        BinaryOp::LtEq => Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => Ok(Value::Bool(a > b)),
        BinaryOp::GtEq => Ok(Value::Bool(a >= b)),
        _ => Err(invalid_binary_op(TypeName::Str, op)),
    }
}
