//! Interned identifier.
//!
//! Atoms, variables, function and module names are all `Name`s: a 32-bit
//! index into the process-wide [`StringInterner`]. Equality and hashing are
//! O(1); ordering by text goes through [`Name::cmp_text`] because the index
//! order is the interning order, not the alphabetical one.

use std::cmp::Ordering;
use std::fmt;

use crate::StringInterner;

/// Interned string identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);
    /// `_`, the wildcard pattern.
    pub const WILDCARD: Name = Name(1);
    /// The atom `true`.
    pub const TRUE: Name = Name(2);
    /// The atom `false`.
    pub const FALSE: Name = Name(3);
    /// `module_info`, answered by every module.
    pub const MODULE_INFO: Name = Name(4);
    /// `erlang`, the builtin module searched for unqualified calls.
    pub const ERLANG: Name = Name(5);
    /// The atom `ok`.
    pub const OK: Name = Name(6);

    /// Strings interned at these exact indices by every interner.
    pub(crate) const PRE_INTERNED: [&'static str; 7] = [
        "",
        "_",
        "true",
        "false",
        "module_info",
        "erlang",
        "ok",
    ];

    /// Intern `text` in the global interner.
    #[inline]
    pub fn intern(text: &str) -> Name {
        StringInterner::global().intern(text)
    }

    /// Resolve this name through the global interner.
    #[inline]
    pub fn as_str(self) -> &'static str {
        StringInterner::global().lookup(self)
    }

    /// Compare two names by their text.
    pub fn cmp_text(self, other: Name) -> Ordering {
        if self == other {
            Ordering::Equal
        } else {
            self.as_str().cmp(other.as_str())
        }
    }

    /// Whether this is the `_` wildcard.
    #[inline]
    pub const fn is_wildcard(self) -> bool {
        self.0 == Self::WILDCARD.0
    }

    /// Raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}: {:?})", self.0, self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::intern(text)
    }
}
