//! Loaded program: the statement table and the function table.

use super::{Keyword, Name, Token};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Statement index, the interpreter's program-counter value.
///
/// Zero-based internally; displayed one-based as a source line number.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct LineNo(usize);

impl LineNo {
    #[inline]
    pub const fn new(index: usize) -> Self {
        LineNo(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    /// The following statement.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        LineNo(self.0 + 1)
    }
}

impl fmt::Display for LineNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Inline token storage; most statements have a handful of words.
pub type TokenVec = SmallVec<[Token; 6]>;

/// One source line, tokenized. Blank and comment-only lines are empty.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Statement {
    tokens: TokenVec,
}

impl Statement {
    pub fn new(tokens: TokenVec) -> Self {
        Statement { tokens }
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// The statement keyword, if the head word is one.
    #[inline]
    pub fn keyword(&self) -> Option<Keyword> {
        self.tokens.first().and_then(Token::as_keyword)
    }

    /// Tokens after the head word.
    #[inline]
    pub fn args(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

/// The statement table plus the function table built from it.
///
/// Read-only once loaded.
#[derive(Clone, Debug, Default)]
pub struct Program {
    statements: Vec<Statement>,
    functions: FxHashMap<Name, LineNo>,
}

impl Program {
    /// Build a program, recording every `func NAME ...` header.
    ///
    /// A later definition of the same name replaces an earlier one.
    pub fn new(statements: Vec<Statement>) -> Self {
        let mut functions = FxHashMap::default();
        for (index, stmt) in statements.iter().enumerate() {
            if stmt.keyword() != Some(Keyword::Func) {
                continue;
            }
            if let Some(name) = stmt.args().first().and_then(Token::as_identifier) {
                functions.insert(name, LineNo::new(index));
            }
        }
        Program {
            statements,
            functions,
        }
    }

    #[inline]
    pub fn get(&self, line: LineNo) -> Option<&Statement> {
        self.statements.get(line.index())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> impl Iterator<Item = (LineNo, &Statement)> {
        self.statements
            .iter()
            .enumerate()
            .map(|(index, stmt)| (LineNo::new(index), stmt))
    }

    /// Header line of a named function.
    #[inline]
    pub fn function(&self, name: Name) -> Option<LineNo> {
        self.functions.get(&name).copied()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}
