//! Interned string identifier.

use std::fmt;

/// Interned string identifier.
///
/// A plain index into the [`StringInterner`](crate::StringInterner) table.
/// The first entries are reserved for names the interpreter refers to
/// directly (entry point, receiver binding, result slots, builtins), so
/// those can be compared against constants without a lookup.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);
    /// Program entry point.
    pub const MAIN: Name = Name(1);
    /// Receiver binding inside a method call.
    pub const THIS: Name = Name(2);
    /// Activation name used for closure calls.
    pub const LAMBDA: Name = Name(3);
    /// Level 1 single result slot.
    pub const RESULT: Name = Name(4);
    /// Integer result slot.
    pub const RESULT_INT: Name = Name(5);
    /// String result slot.
    pub const RESULT_STR: Name = Name(6);
    /// Boolean result slot.
    pub const RESULT_BOOL: Name = Name(7);
    /// Function result slot.
    pub const RESULT_FUNC: Name = Name(8);
    /// Object result slot.
    pub const RESULT_OBJECT: Name = Name(9);
    /// `print` builtin.
    pub const PRINT: Name = Name(10);
    /// `input` builtin.
    pub const INPUT: Name = Name(11);
    /// `strtoint` builtin.
    pub const STRTOINT: Name = Name(12);

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
