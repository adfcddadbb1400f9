//! `var` and `assign`.

use brewin_ir::{Keyword, Name, Statement, Token, TypeName};

use super::{Flow, Interpreter};
use crate::environment::AssignError;
use crate::errors::{
    already_declared, assign_type_mismatch, invalid_var_type, invalid_variable_name,
    missing_operands, undefined_variable, EvalResult,
};
use crate::value::{TypedValue, Value};

impl Interpreter<'_> {
    /// `var TYPE NAME...`: declare each name in the innermost scope.
    pub(crate) fn exec_var(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        let [type_token, names @ ..] = stmt.args() else {
            return Err(missing_operands(Keyword::Var));
        };
        if names.is_empty() {
            return Err(missing_operands(Keyword::Var));
        }

        let names = names
            .iter()
            .map(|token| self.variable_name(token))
            .collect::<EvalResult<Vec<Name>>>()?;

        let ty = match type_token {
            Token::Identifier(word) => TypeName::from_word(self.name_str(*word))
                .filter(|ty| self.level.allows_type(*ty)),
            _ => None,
        }
        .ok_or_else(|| invalid_var_type(&self.token_text(type_token)))?;

        for name in names {
            self.frame_mut()
                .env
                .declare(name, TypedValue::default_for(ty))
                .map_err(|_| already_declared(self.name_str(name)))?;
        }
        Ok(Flow::Next)
    }

    /// `assign TARGET EXPR`.
    pub(crate) fn exec_assign(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        let [target, expr @ ..] = stmt.args() else {
            return Err(missing_operands(Keyword::Assign));
        };
        if expr.is_empty() {
            return Err(missing_operands(Keyword::Assign));
        }
        let value = self.eval_expression(expr)?;

        match target {
            Token::Identifier(name) => self.assign_variable(*name, value)?,
            Token::Member { object, member } => {
                let record = self.object_of(*object)?;
                record.set_member(*member, value).map_err(|err| match err {
                    AssignError::TypeMismatch { expected, got } => {
                        let target = format!("{}.{}", self.name_str(*object), self.name_str(*member));
                        assign_type_mismatch(&target, expected, got)
                    }
                    AssignError::Undefined => undefined_variable(self.name_str(*object)),
                })?;
            }
            other => return Err(invalid_variable_name(&self.token_text(other))),
        }
        Ok(Flow::Next)
    }

    /// Store into a variable of the executing activation.
    ///
    /// Without declarations the variable is created on first assignment
    /// and takes the type of whatever it is given.
    pub(crate) fn assign_variable(&mut self, name: Name, value: Value) -> EvalResult<()> {
        let level = self.level;
        let env = &mut self.frame_mut().env;
        if !level.has_declarations() {
            env.assign_dynamic(name, value);
            return Ok(());
        }
        env.assign(name, value).map_err(|err| match err {
            AssignError::Undefined => undefined_variable(self.name_str(name)),
            AssignError::TypeMismatch { expected, got } => {
                assign_type_mismatch(self.name_str(name), expected, got)
            }
        })
    }

    /// A token naming a variable to declare.
    fn variable_name(&self, token: &Token) -> EvalResult<Name> {
        match token {
            Token::Identifier(name)
                if self
                    .name_str(*name)
                    .starts_with(|c: char| c.is_alphabetic()) =>
            {
                Ok(*name)
            }
            other => Err(invalid_variable_name(&self.token_text(other))),
        }
    }
}
