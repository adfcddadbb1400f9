//! Function calls, returns, and closure creation.
//!
//! A call binds arguments in the caller's context, pushes an activation
//! and jumps to the line after the header. Returning writes the result
//! slot, pops, and jumps back to the statement after the `funccall`.

use smallvec::SmallVec;

use brewin_ir::{Keyword, LineNo, Name, ParamKind, ReturnType, Statement, Token};

use super::{Flow, Interpreter};
use crate::call_stack::Activation;
use crate::environment::{Environment, LocalScope};
use crate::errors::{
    argument_type_mismatch, arity_mismatch, duplicate_parameter, invalid_param_kind,
    invalid_return_type, malformed_parameter, missing_operands, not_callable,
    return_type_mismatch, undefined_function, undefined_variable, unexpected_closer,
    unmatched_block, value_return_from_entry, EvalResult,
};
use crate::resolver::find_lambda_end;
use crate::value::{new_cell, Captures, Cell, FuncValue, ObjectRef, TypedValue, Value};

/// Parsed header of a `func` or `lambda` statement.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Signature {
    pub name: Name,
    pub params: SmallVec<[(Name, ParamKind); 4]>,
    pub return_type: ReturnType,
}

impl Interpreter<'_> {
    /// Parse the header at `line`.
    pub(crate) fn signature_at(&self, line: LineNo) -> EvalResult<Signature> {
        match self.program.get(line) {
            Some(stmt) => self.parse_signature(stmt),
            None => Err(missing_operands(Keyword::Func)),
        }
    }

    /// Parse `func NAME PARAM... RET` or `lambda PARAM... RET`.
    pub(crate) fn parse_signature(&self, stmt: &Statement) -> EvalResult<Signature> {
        let keyword = stmt.keyword().unwrap_or(Keyword::Func);
        let (name, rest) = if keyword == Keyword::Lambda {
            (Name::LAMBDA, stmt.args())
        } else {
            match stmt.args() {
                [Token::Identifier(name), rest @ ..] => (*name, rest),
                [other, ..] => return Err(malformed_parameter(&self.token_text(other))),
                [] => return Err(missing_operands(keyword)),
            }
        };

        if !self.level.has_parameters() {
            if let Some(extra) = rest.first() {
                return Err(malformed_parameter(&self.token_text(extra)));
            }
            return Ok(Signature {
                name,
                params: SmallVec::new(),
                return_type: ReturnType::Dynamic,
            });
        }

        let [params @ .., ret] = rest else {
            return Err(missing_operands(keyword));
        };
        let return_type = match ret {
            Token::Identifier(word) => ReturnType::from_word(self.name_str(*word))
                .filter(|rt| self.level.allows_return_type(*rt)),
            _ => None,
        }
        .ok_or_else(|| invalid_return_type(&self.token_text(ret)))?;

        let mut parsed: SmallVec<[(Name, ParamKind); 4]> = SmallVec::with_capacity(params.len());
        for token in params {
            let Token::Param { name, kind } = token else {
                return Err(malformed_parameter(&self.token_text(token)));
            };
            let kind = ParamKind::from_word(self.name_str(*kind))
                .filter(|k| self.level.allows_param_kind(*k))
                .ok_or_else(|| invalid_param_kind(self.name_str(*kind)))?;
            if parsed.iter().any(|(existing, _)| existing == name) {
                return Err(duplicate_parameter(self.name_str(*name)));
            }
            parsed.push((*name, kind));
        }

        Ok(Signature {
            name,
            params: parsed,
            return_type,
        })
    }

    /// `funccall TARGET ARG...`
    pub(crate) fn exec_funccall(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        let [target, args @ ..] = stmt.args() else {
            return Err(missing_operands(Keyword::FuncCall));
        };
        match target {
            Token::Identifier(name) => {
                let name = *name;
                if matches!(name, Name::PRINT | Name::INPUT | Name::STRTOINT) {
                    return self.exec_builtin(name, args);
                }
                if self.level.has_reference_types() {
                    if let Some(cell) = self.lookup_variable(name) {
                        return self.call_value(&cell, self.name_str(name), None, args);
                    }
                }
                let header = self
                    .program
                    .function(name)
                    .ok_or_else(|| undefined_function(self.name_str(name)))?;
                self.invoke(header, None, None, args)
            }
            Token::Member { object, member } => {
                let receiver = self.object_of(*object)?;
                let cell = self.member_cell(*object, *member)?;
                let label = format!("{}.{}", self.name_str(*object), self.name_str(*member));
                self.call_value(&cell, &label, Some(receiver), args)
            }
            other => Err(undefined_function(&self.token_text(other))),
        }
    }

    /// Call whatever function value `cell` holds.
    fn call_value(
        &mut self,
        cell: &Cell,
        label: &str,
        receiver: Option<ObjectRef>,
        args: &[Token],
    ) -> EvalResult<Flow> {
        match cell.read() {
            Value::Func(FuncValue::Unbound) => {
                tracing::warn!(target_name = label, line = %self.ip, "call of unassigned func variable");
                Ok(Flow::Next)
            }
            Value::Func(FuncValue::Named(name)) => {
                let header = self
                    .program
                    .function(name)
                    .ok_or_else(|| undefined_function(self.name_str(name)))?;
                *cell.borrow_mut() = TypedValue::new(Value::Func(FuncValue::Resolved {
                    line: header,
                    captures: None,
                }));
                self.invoke(header, None, receiver, args)
            }
            Value::Func(FuncValue::Resolved { line, captures }) => {
                self.invoke(line, captures, receiver, args)
            }
            other => Err(not_callable(label, other.type_name())),
        }
    }

    /// Push an activation for the function or closure headed at `header`.
    #[tracing::instrument(level = "debug", skip_all, fields(header = %header))]
    fn invoke(
        &mut self,
        header: LineNo,
        captures: Option<Captures>,
        receiver: Option<ObjectRef>,
        args: &[Token],
    ) -> EvalResult<Flow> {
        let signature = self.signature_at(header)?;
        if args.len() != signature.params.len() {
            return Err(arity_mismatch(
                self.name_str(signature.name),
                signature.params.len(),
                args.len(),
            ));
        }
        let bound = self.bind_arguments(&signature, args)?;

        let mut env = if self.level.has_declarations() {
            Environment::new()
        } else {
            self.frame().env.child()
        };
        for (name, value) in captures.iter().flat_map(Captures::iter) {
            env.bind_base(name, LocalScope::new(value.clone()));
        }
        for (name, cell) in bound {
            env.bind_base(name, cell);
        }
        if let Some(record) = receiver {
            env.bind_base(Name::THIS, new_cell(Value::Object(record)));
        }

        self.call_stack.push(Activation::new(
            signature.name,
            header,
            signature.return_type,
            Some(self.ip.next()),
            env,
        ))?;
        Ok(Flow::Jump(header.next()))
    }

    /// Resolve arguments against parameters in the caller's context.
    fn bind_arguments(
        &self,
        signature: &Signature,
        args: &[Token],
    ) -> EvalResult<SmallVec<[(Name, Cell); 4]>> {
        signature
            .params
            .iter()
            .zip(args)
            .map(|(&(param, kind), arg)| -> EvalResult<(Name, Cell)> {
                let expected = kind.base_type();
                let cell = match (kind, arg) {
                    (ParamKind::Ref(_), Token::Identifier(name)) => self
                        .lookup_variable(*name)
                        .ok_or_else(|| undefined_variable(self.name_str(*name)))?,
                    (ParamKind::Ref(_), Token::Member { object, member }) => {
                        self.member_cell(*object, *member)?
                    }
                    (_, Token::Literal(_) | Token::Identifier(_) | Token::Member { .. }) => {
                        new_cell(self.operand(arg)?)
                    }
                    (_, other) => return Err(malformed_parameter(&self.token_text(other))),
                };
                let got = cell.read().type_name();
                if got != expected {
                    return Err(argument_type_mismatch(self.name_str(param), expected, got));
                }
                Ok((param, cell))
            })
            .collect()
    }

    /// `return [EXPR]`
    pub(crate) fn exec_return(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        let expr = stmt.args();
        if self.frame().is_entry() {
            if !expr.is_empty() && self.level.has_parameters() {
                return Err(value_return_from_entry());
            }
            return Ok(Flow::Halt);
        }
        let value = if expr.is_empty() {
            None
        } else {
            Some(self.eval_expression(expr)?)
        };
        self.finish_call(value)
    }

    /// `endfunc` / `endlambda` reached by falling through the body.
    ///
    /// The closer must match the header of the running activation, and
    /// every block opened in the body must already be closed.
    pub(crate) fn exec_function_end(&mut self, closer: Keyword) -> EvalResult<Flow> {
        let frame = self.frame();
        if let Some(block) = frame.innermost_block() {
            return Err(unmatched_block(block.opener()));
        }
        let opener = match closer {
            Keyword::EndLambda => Keyword::Lambda,
            _ => Keyword::Func,
        };
        if self.program.get(frame.header).and_then(Statement::keyword) != Some(opener) {
            return Err(unexpected_closer(closer));
        }
        if frame.is_entry() {
            return Ok(Flow::Halt);
        }
        self.finish_call(None)
    }

    /// Check the returned value, publish it, and resume the caller.
    fn finish_call(&mut self, value: Option<Value>) -> EvalResult<Flow> {
        let return_type = self.frame().return_type;
        let result = match (return_type, value) {
            (ReturnType::Void, None) => None,
            (ReturnType::Value(ty), None) => Some(TypedValue::default_for(ty)),
            (ReturnType::Value(ty), Some(v)) if v.type_name() == ty => Some(TypedValue::new(v)),
            (ReturnType::Dynamic, v) => v.map(TypedValue::new),
            (expected, Some(v)) => return Err(return_type_mismatch(expected, v.type_name())),
        };
        if let Some(result) = result {
            let slot = self.level.result_slot(result.ty());
            self.write_result(slot, result);
        }

        let finished = self.call_stack.pop();
        match finished.and_then(|activation| activation.resume) {
            Some(resume) => Ok(Flow::Jump(resume)),
            None => Ok(Flow::Halt),
        }
    }

    /// Bind a result slot in the current activation and in its caller.
    ///
    /// Each side gets its own cell.
    pub(crate) fn write_result(&mut self, slot: Name, result: TypedValue) {
        if let Some(caller) = self.call_stack.caller_mut() {
            caller.env.bind_base(slot, LocalScope::new(result.clone()));
        }
        self.frame_mut().env.bind_base(slot, LocalScope::new(result));
    }

    /// `lambda PARAM... RET`: capture the visible variables into a func
    /// value in `resultf` and skip the body.
    pub(crate) fn exec_lambda(&mut self, stmt: &Statement) -> EvalResult<Flow> {
        self.parse_signature(stmt)?;
        let end = find_lambda_end(self.program, self.ip)?;
        let captures = Captures::new(self.frame().env.capture());
        let closure = Value::Func(FuncValue::Resolved {
            line: self.ip,
            captures: Some(captures),
        });
        self.frame_mut()
            .env
            .bind_base(Name::RESULT_FUNC, new_cell(closure));
        Ok(Flow::Jump(end.next()))
    }
}
