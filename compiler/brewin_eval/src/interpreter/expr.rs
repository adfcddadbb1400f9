//! Operand resolution and prefix expression evaluation.

use smallvec::SmallVec;

use brewin_ir::{Name, Token};

use super::Interpreter;
use crate::errors::{
    malformed_expression, non_bool_condition, not_an_object, undefined_member,
    undefined_variable, EvalResult,
};
use crate::operators::evaluate_binary;
use crate::value::{Cell, FuncValue, ObjectRef, Value};

impl Interpreter<'_> {
    /// Look up a variable in the executing activation.
    #[inline]
    pub(crate) fn lookup_variable(&self, name: Name) -> Option<Cell> {
        self.frame().env.lookup(name)
    }

    /// The record held by object variable `name`.
    pub(crate) fn object_of(&self, name: Name) -> EvalResult<ObjectRef> {
        let cell = self
            .lookup_variable(name)
            .ok_or_else(|| undefined_variable(self.name_str(name)))?;
        match cell.read() {
            Value::Object(obj) => Ok(obj),
            other => Err(not_an_object(self.name_str(name), other.type_name())),
        }
    }

    /// The cell of `object.member`.
    pub(crate) fn member_cell(&self, object: Name, member: Name) -> EvalResult<Cell> {
        self.object_of(object)?
            .member(member)
            .ok_or_else(|| undefined_member(self.name_str(object), self.name_str(member)))
    }

    /// Resolve a single non-operator token to a value.
    ///
    /// An identifier is a variable first; at level 3 a function name that
    /// is not shadowed by a variable yields an unresolved function value.
    pub(crate) fn operand(&self, token: &Token) -> EvalResult<Value> {
        match token {
            Token::Literal(lit) => Ok(Value::from_literal(lit)),
            Token::Identifier(name) => {
                if let Some(cell) = self.lookup_variable(*name) {
                    return Ok(cell.read());
                }
                if self.level.has_reference_types() && self.program.function(*name).is_some() {
                    return Ok(Value::Func(FuncValue::Named(*name)));
                }
                Err(undefined_variable(self.name_str(*name)))
            }
            Token::Member { object, member } => Ok(self.member_cell(*object, *member)?.read()),
            Token::Operator(_) | Token::Keyword(_) | Token::Param { .. } => {
                Err(malformed_expression())
            }
        }
    }

    /// Evaluate a prefix expression.
    ///
    /// Tokens are scanned right to left. Operands are pushed; an operator
    /// pops its left operand (top of stack) and then its right operand.
    pub(crate) fn eval_expression(&self, tokens: &[Token]) -> EvalResult<Value> {
        let mut stack: SmallVec<[Value; 8]> = SmallVec::new();
        for token in tokens.iter().rev() {
            if let Token::Operator(op) = token {
                let (Some(left), Some(right)) = (stack.pop(), stack.pop()) else {
                    return Err(malformed_expression());
                };
                stack.push(evaluate_binary(left, right, *op)?);
            } else {
                stack.push(self.operand(token)?);
            }
        }
        match (stack.pop(), stack.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(malformed_expression()),
        }
    }

    /// Evaluate an `if`/`while` condition, which must be a bool.
    pub(crate) fn eval_condition(&self, tokens: &[Token]) -> EvalResult<bool> {
        match self.eval_expression(tokens)? {
            Value::Bool(b) => Ok(b),
            other => Err(non_bool_condition(other.type_name())),
        }
    }
}
