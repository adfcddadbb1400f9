//! Lexer error types.

use brewin_ir::LineNo;

/// A lexing failure, located by source line.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct LexError {
    pub line: LineNo,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(line: LineNo, kind: LexErrorKind) -> Self {
        LexError { line, kind }
    }
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LexErrorKind {
    /// Missing closing `"`.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// Integer literal outside the `i64` range.
    #[error("integer literal `{0}` does not fit in 64 bits")]
    IntegerOutOfRange(String),
    /// A word that cannot be classified (`a.`, `x:`, `"s"t`, ...).
    #[error("malformed token `{0}`")]
    MalformedToken(String),
}
