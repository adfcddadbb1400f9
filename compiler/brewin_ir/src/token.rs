//! Token types for Brewin statements.
//!
//! Each source word is classified exactly once, when the program is
//! loaded. The interpreter dispatches on these variants instead of
//! re-inspecting raw text.

use super::Name;
use std::fmt;

/// Statement keywords. Only recognized at the head of a statement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    Func,
    EndFunc,
    Var,
    Assign,
    FuncCall,
    If,
    Else,
    EndIf,
    While,
    EndWhile,
    Return,
    Lambda,
    EndLambda,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "func" => Keyword::Func,
            "endfunc" => Keyword::EndFunc,
            "var" => Keyword::Var,
            "assign" => Keyword::Assign,
            "funccall" => Keyword::FuncCall,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "endif" => Keyword::EndIf,
            "while" => Keyword::While,
            "endwhile" => Keyword::EndWhile,
            "return" => Keyword::Return,
            "lambda" => Keyword::Lambda,
            "endlambda" => Keyword::EndLambda,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Func => "func",
            Keyword::EndFunc => "endfunc",
            Keyword::Var => "var",
            Keyword::Assign => "assign",
            Keyword::FuncCall => "funccall",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::EndIf => "endif",
            Keyword::While => "while",
            Keyword::EndWhile => "endwhile",
            Keyword::Return => "return",
            Keyword::Lambda => "lambda",
            Keyword::EndLambda => "endlambda",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operators. Expressions are written in prefix form.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    LtEq,
    GtEq,
    NotEq,
    Eq,
    And,
    Or,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Mod,
            "<" => BinaryOp::Lt,
            ">" => BinaryOp::Gt,
            "<=" => BinaryOp::LtEq,
            ">=" => BinaryOp::GtEq,
            "!=" => BinaryOp::NotEq,
            "==" => BinaryOp::Eq,
            "&" => BinaryOp::And,
            "|" => BinaryOp::Or,
            _ => return None,
        })
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::NotEq => "!=",
            BinaryOp::Eq => "==",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Literal constants.
///
/// String literals are stored without their surrounding quotes.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Int(i64),
    Str(String),
    Bool(bool),
}

/// A classified source word.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Token {
    /// Statement keyword (head position only).
    Keyword(Keyword),
    Literal(Literal),
    /// Variable, function, or type word.
    Identifier(Name),
    /// `object.member`
    Member { object: Name, member: Name },
    Operator(BinaryOp),
    /// `name:kind` in a function or lambda header.
    Param { name: Name, kind: Name },
}

impl Token {
    #[inline]
    pub fn as_identifier(&self) -> Option<Name> {
        match self {
            Token::Identifier(name) => Some(*name),
            _ => None,
        }
    }

    #[inline]
    pub fn as_keyword(&self) -> Option<Keyword> {
        match self {
            Token::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    #[inline]
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }
}
