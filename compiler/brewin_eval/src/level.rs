//! Language levels for the Brewin interpreter.
//!
//! One execution core serves all three levels of the language; the level
//! is a configuration value whose policy methods switch features on and
//! off at the points where the levels differ.

use brewin_ir::{Keyword, Name, ParamKind, ReturnType, TypeName};
use std::fmt;
use std::str::FromStr;

/// Language level, determines which statements, types and scoping rules
/// are in effect.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LanguageLevel {
    /// Level 1: untyped variables created by assignment, parameterless
    /// functions, one shared `result` slot, no block scopes.
    Flat,
    /// Level 2: declared types, block scopes, typed and by-reference
    /// parameters, typed result slots.
    Typed,
    /// Level 3: level 2 plus objects, function values, and closures.
    #[default]
    Reference,
}

impl LanguageLevel {
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Flat),
            2 => Some(Self::Typed),
            3 => Some(Self::Reference),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Flat => 1,
            Self::Typed => 2,
            Self::Reference => 3,
        }
    }

    /// Whether variables must be declared with `var` before use.
    #[inline]
    pub fn has_declarations(self) -> bool {
        !matches!(self, Self::Flat)
    }

    /// Whether `if`/`else`/`while` bodies get their own scope.
    #[inline]
    pub fn has_block_scopes(self) -> bool {
        !matches!(self, Self::Flat)
    }

    /// Whether function headers carry parameters and a return type.
    #[inline]
    pub fn has_parameters(self) -> bool {
        !matches!(self, Self::Flat)
    }

    /// Whether `func`/`object` values and closures exist.
    #[inline]
    pub fn has_reference_types(self) -> bool {
        matches!(self, Self::Reference)
    }

    pub fn allows_keyword(self, keyword: Keyword) -> bool {
        match keyword {
            Keyword::Var => self.has_declarations(),
            Keyword::Lambda | Keyword::EndLambda => self.has_reference_types(),
            _ => true,
        }
    }

    pub fn allows_type(self, ty: TypeName) -> bool {
        !ty.is_reference() || self.has_reference_types()
    }

    pub fn allows_param_kind(self, kind: ParamKind) -> bool {
        self.allows_type(kind.base_type())
    }

    pub fn allows_return_type(self, ret: ReturnType) -> bool {
        match ret {
            ReturnType::Value(ty) => self.allows_type(ty),
            ReturnType::Void => true,
            ReturnType::Dynamic => !self.has_parameters(),
        }
    }

    /// The variable a value of type `ty` is returned through.
    pub fn result_slot(self, ty: TypeName) -> Name {
        if !self.has_declarations() {
            return Name::RESULT;
        }
        match ty {
            TypeName::Int => Name::RESULT_INT,
            TypeName::Str => Name::RESULT_STR,
            TypeName::Bool => Name::RESULT_BOOL,
            TypeName::Func => Name::RESULT_FUNC,
            TypeName::Object => Name::RESULT_OBJECT,
        }
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Error for a level outside `1..=3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language level `{}`, expected 1, 2 or 3", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for LanguageLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
