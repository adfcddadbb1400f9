//! The Brewin interpreter.
//!
//! A dispatch loop over the statement table: read the statement at the
//! instruction pointer, run its handler, then advance to the next line
//! unless the handler redirected control. Calls, returns, branches and
//! loops are all expressed as redirections; nothing recurses on the host
//! stack.

mod assign;
mod builder;
mod builtins;
mod call;
mod control;
mod expr;

pub use builder::InterpreterBuilder;

use brewin_ir::{Keyword, LineNo, Literal, Name, Program, StringInterner, Token};

use crate::call_stack::{Activation, CallStack};
use crate::environment::Environment;
use crate::errors::{
    arity_mismatch, keyword_unavailable, missing_entry_point, unknown_statement, EvalResult,
};
use crate::input_handler::SharedInputHandler;
use crate::level::LanguageLevel;
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;

/// What the dispatch loop does after a handler returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Continue with the following statement.
    Next,
    /// Continue at the given statement.
    Jump(LineNo),
    /// The entry function finished.
    Halt,
}

/// Machine state for one run of a program.
pub struct Interpreter<'a> {
    pub(crate) program: &'a Program,
    pub(crate) interner: &'a StringInterner,
    pub(crate) level: LanguageLevel,
    pub(crate) call_stack: CallStack,
    /// Statement currently executing.
    pub(crate) ip: LineNo,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) input_handler: SharedInputHandler,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter with default configuration (level 3, stdout,
    /// stdin, unlimited call depth).
    pub fn new(program: &'a Program, interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(program, interner).build()
    }

    pub fn level(&self) -> LanguageLevel {
        self.level
    }

    /// Output captured by a buffering print handler.
    pub fn output(&self) -> String {
        self.print_handler.get_output()
    }

    /// Run the program from `main` until it returns.
    ///
    /// Errors carry the line of the failing statement and a backtrace.
    /// Output printed before the error stays printed.
    #[tracing::instrument(level = "debug", skip_all, fields(level = %self.level))]
    pub fn run(&mut self) -> EvalResult<()> {
        self.start()?;
        loop {
            let line = self.ip;
            match self.step() {
                Ok(Flow::Next) => self.ip = line.next(),
                Ok(Flow::Jump(target)) => self.ip = target,
                Ok(Flow::Halt) => {
                    tracing::debug!(line = %line, "program finished");
                    return Ok(());
                }
                Err(err) => {
                    let err = err.at_line(line);
                    tracing::debug!(error = %err, "program failed");
                    return Err(self.call_stack.attach_backtrace(err, self.interner));
                }
            }
        }
    }

    /// Push the entry activation and point at the first line of `main`.
    fn start(&mut self) -> EvalResult<()> {
        while self.call_stack.pop().is_some() {}

        let main = self
            .program
            .function(Name::MAIN)
            .ok_or_else(missing_entry_point)?;
        let signature = self.signature_at(main).map_err(|err| err.at_line(main))?;
        if !signature.params.is_empty() {
            return Err(arity_mismatch("main", signature.params.len(), 0).at_line(main));
        }
        self.call_stack.push(Activation::new(
            Name::MAIN,
            main,
            signature.return_type,
            None,
            Environment::new(),
        ))?;
        self.ip = main.next();
        Ok(())
    }

    /// Execute the statement at the instruction pointer.
    fn step(&mut self) -> EvalResult<Flow> {
        let program = self.program;
        // Running past the last statement ends the program.
        let Some(stmt) = program.get(self.ip) else {
            return Ok(Flow::Halt);
        };
        let Some(keyword) = stmt.keyword() else {
            return match stmt.tokens().first() {
                None => Ok(Flow::Next),
                Some(head) => Err(unknown_statement(&self.token_text(head))),
            };
        };
        if !self.level.allows_keyword(keyword) {
            return Err(keyword_unavailable(keyword, self.level.number()));
        }
        tracing::trace!(line = %self.ip, %keyword, "dispatch");

        match keyword {
            Keyword::Func => Ok(Flow::Next),
            Keyword::EndFunc | Keyword::EndLambda => self.exec_function_end(keyword),
            Keyword::Var => self.exec_var(stmt),
            Keyword::Assign => self.exec_assign(stmt),
            Keyword::FuncCall => self.exec_funccall(stmt),
            Keyword::If => self.exec_if(stmt),
            Keyword::Else => self.exec_else(),
            Keyword::EndIf => self.exec_endif(),
            Keyword::While => self.exec_while(stmt),
            Keyword::EndWhile => self.exec_endwhile(),
            Keyword::Return => self.exec_return(stmt),
            Keyword::Lambda => self.exec_lambda(stmt),
        }
    }

    /// The executing activation.
    ///
    /// # Panics
    /// Panics if no function is active, which `run` rules out.
    #[track_caller]
    #[expect(clippy::expect_used, reason = "Invariant: run pushes main before stepping")]
    pub(crate) fn frame(&self) -> &Activation {
        self.call_stack.current().expect("no active function")
    }

    #[track_caller]
    #[expect(clippy::expect_used, reason = "Invariant: run pushes main before stepping")]
    pub(crate) fn frame_mut(&mut self) -> &mut Activation {
        self.call_stack.current_mut().expect("no active function")
    }

    #[inline]
    pub(crate) fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Source form of a token, for error messages.
    pub(crate) fn token_text(&self, token: &Token) -> String {
        match token {
            Token::Keyword(kw) => kw.as_str().to_string(),
            Token::Literal(Literal::Str(s)) => format!("\"{s}\""),
            Token::Literal(lit) => Value::from_literal(lit).to_string(),
            Token::Identifier(name) => self.name_str(*name).to_string(),
            Token::Member { object, member } => {
                format!("{}.{}", self.name_str(*object), self.name_str(*member))
            }
            Token::Operator(op) => op.to_string(),
            Token::Param { name, kind } => {
                format!("{}:{}", self.name_str(*name), self.name_str(*kind))
            }
        }
    }
}
