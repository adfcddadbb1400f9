//! Brewin Eval - Interpreter for the Brewin teaching language.
//!
//! Executes a lexed [`Program`](brewin_ir::Program) statement by
//! statement, at one of three language levels.
//!
//! # Architecture
//!
//! - `Interpreter`: dispatch loop over the statement table; calls and
//!   returns move the instruction pointer instead of recursing
//! - `CallStack` / `Activation`: one record per running function
//! - `Environment`: block scopes of one activation, over shared cells
//! - `evaluate_binary`: enum-based binary operator dispatch
//! - `resolver`: forward scans that match block delimiters
//! - `LanguageLevel`: which features are available

mod call_stack;
mod environment;
pub mod errors;
mod input_handler;
pub mod interpreter;
mod level;
mod operators;
mod print_handler;
pub mod resolver;
mod value;

pub use call_stack::{Activation, CallStack, OpenBlock};
pub use environment::{AlreadyDeclared, AssignError, Environment, LocalScope, Scope};
pub use errors::{
    BacktraceFrame, ErrorType, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
};
pub use input_handler::{scripted_handler, stdin_handler, InputHandlerImpl, SharedInputHandler};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use level::{LanguageLevel, ParseLevelError};
pub use operators::{evaluate_binary, floor_div, floor_mod};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use value::{new_cell, Captures, Cell, FuncValue, ObjectRecord, ObjectRef, TypedValue, Value};

#[cfg(test)]
mod tests;
