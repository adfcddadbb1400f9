//! Type words: declared variable types, return types, parameter kinds.

use std::fmt;

/// Runtime and declared types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeName {
    Int,
    Str,
    Bool,
    Func,
    Object,
}

impl TypeName {
    /// Parse a type word as written in `var` statements and headers.
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "int" => TypeName::Int,
            "string" => TypeName::Str,
            "bool" => TypeName::Bool,
            "func" => TypeName::Func,
            "object" => TypeName::Object,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Str => "string",
            TypeName::Bool => "bool",
            TypeName::Func => "func",
            TypeName::Object => "object",
        }
    }

    /// `func` and `object` values are handles to shared state.
    pub fn is_reference(self) -> bool {
        matches!(self, TypeName::Func | TypeName::Object)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared return type of a function or lambda.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReturnType {
    Void,
    Value(TypeName),
    /// Untyped functions (flat level): any value or none.
    Dynamic,
}

impl ReturnType {
    pub fn from_word(word: &str) -> Option<Self> {
        if word == "void" {
            Some(ReturnType::Void)
        } else {
            TypeName::from_word(word).map(ReturnType::Value)
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("void"),
            ReturnType::Value(ty) => ty.fmt(f),
            ReturnType::Dynamic => f.write_str("any"),
        }
    }
}

/// How an argument binds to a parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamKind {
    /// `int`, `string`, `bool`, `func`: the callee gets its own copy.
    Value(TypeName),
    /// `refint`, `refstring`, `refbool`: the callee cell is the caller's cell.
    Ref(TypeName),
    /// `object`: a new cell sharing the caller's record.
    Object,
}

impl ParamKind {
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "int" => ParamKind::Value(TypeName::Int),
            "string" => ParamKind::Value(TypeName::Str),
            "bool" => ParamKind::Value(TypeName::Bool),
            "func" => ParamKind::Value(TypeName::Func),
            "refint" => ParamKind::Ref(TypeName::Int),
            "refstring" => ParamKind::Ref(TypeName::Str),
            "refbool" => ParamKind::Ref(TypeName::Bool),
            "object" => ParamKind::Object,
            _ => return None,
        })
    }

    /// The type an argument must have to bind.
    pub fn base_type(self) -> TypeName {
        match self {
            ParamKind::Value(ty) | ParamKind::Ref(ty) => ty,
            ParamKind::Object => TypeName::Object,
        }
    }

    pub fn is_reference(self) -> bool {
        matches!(self, ParamKind::Ref(_))
    }
}
