//! Brewin IR - program representation shared by the lexer and interpreter.
//!
//! - `Name` / `StringInterner` for interned identifiers
//! - `Token` and its classifications (`Keyword`, `BinaryOp`, `Literal`)
//! - Type words (`TypeName`, `ReturnType`, `ParamKind`)
//! - `Statement` / `Program`: the statement table and function table

mod interner;
mod name;
mod program;
mod token;
mod types;

pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use program::{LineNo, Program, Statement, TokenVec};
pub use token::{BinaryOp, Keyword, Literal, Token};
pub use types::{ParamKind, ReturnType, TypeName};
