//! Built-in functions: `print`, `input`, `strtoint`.

use brewin_ir::{Name, Token, TypeName};

use super::{Flow, Interpreter};
use crate::errors::{
    argument_type_mismatch, arity_mismatch, invalid_integer_text, undefined_function, EvalResult,
};
use crate::value::{TypedValue, Value};

impl Interpreter<'_> {
    pub(crate) fn exec_builtin(&mut self, name: Name, args: &[Token]) -> EvalResult<Flow> {
        match name {
            Name::PRINT => {
                let line = self.concat_operands(args)?;
                self.print_handler.println(&line);
            }
            Name::INPUT => {
                let prompt = self.concat_operands(args)?;
                self.print_handler.println(&prompt);
                let line = self.input_handler.read_line().unwrap_or_default();
                let slot = self.level.result_slot(TypeName::Str);
                self.write_result(slot, TypedValue::new(Value::Str(line)));
            }
            Name::STRTOINT => {
                let [arg] = args else {
                    return Err(arity_mismatch("strtoint", 1, args.len()));
                };
                let n = match self.operand(arg)? {
                    Value::Str(text) => text
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| invalid_integer_text(&text))?,
                    other => {
                        return Err(argument_type_mismatch(
                            "strtoint",
                            TypeName::Str,
                            other.type_name(),
                        ))
                    }
                };
                let slot = self.level.result_slot(TypeName::Int);
                self.write_result(slot, TypedValue::new(Value::Int(n)));
            }
            other => return Err(undefined_function(self.name_str(other))),
        }
        Ok(Flow::Next)
    }

    /// Print form of each operand, joined with no separator.
    fn concat_operands(&self, args: &[Token]) -> EvalResult<String> {
        args.iter()
            .map(|token| self.operand(token).map(|value| value.to_string()))
            .collect()
    }
}
