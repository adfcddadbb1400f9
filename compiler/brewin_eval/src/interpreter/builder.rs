//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use brewin_ir::{LineNo, Program, StringInterner};

use super::Interpreter;
use crate::call_stack::CallStack;
use crate::input_handler::{stdin_handler, SharedInputHandler};
use crate::level::LanguageLevel;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults: level 3, output to stdout, input from stdin, no call depth
/// limit.
pub struct InterpreterBuilder<'a> {
    program: &'a Program,
    interner: &'a StringInterner,
    level: LanguageLevel,
    print_handler: Option<SharedPrintHandler>,
    input_handler: Option<SharedInputHandler>,
    max_call_depth: Option<usize>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(program: &'a Program, interner: &'a StringInterner) -> Self {
        Self {
            program,
            interner,
            level: LanguageLevel::default(),
            print_handler: None,
            input_handler: None,
            max_call_depth: None,
        }
    }

    /// Set the language level.
    #[must_use]
    pub fn level(mut self, level: LanguageLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the print handler for `print` and `input` prompts.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the input handler for `input`.
    #[must_use]
    pub fn input_handler(mut self, handler: SharedInputHandler) -> Self {
        self.input_handler = Some(handler);
        self
    }

    /// Limit the number of simultaneously active functions.
    ///
    /// `None` means unlimited.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            program: self.program,
            interner: self.interner,
            level: self.level,
            call_stack: CallStack::new(self.max_call_depth),
            ip: LineNo::default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            input_handler: self.input_handler.unwrap_or_else(stdin_handler),
        }
    }
}
