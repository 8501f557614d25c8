//! String interner backing [`Name`].
//!
//! Interned strings are leaked and never freed, so lookups hand out
//! `&'static str`. One global instance is shared by every process; names
//! are only meaningful relative to the interner that produced them, and the
//! evaluator only ever uses the global one.

use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct strings.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// Reads take a shared lock; a miss upgrades to the write lock and
/// re-checks before inserting.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

static GLOBAL: OnceLock<StringInterner> = OnceLock::new();

impl StringInterner {
    /// Create an interner with the well-known names at their fixed indices.
    pub fn new() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        for (index, text) in (0u32..).zip(Name::PRE_INTERNED) {
            table.map.insert(text, index);
            table.strings.push(text);
        }
        Self {
            table: RwLock::new(table),
        }
    }

    /// The process-wide interner used by [`Name::intern`] and [`Name::as_str`].
    pub fn global() -> &'static StringInterner {
        GLOBAL.get_or_init(StringInterner::new)
    }

    /// Intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&index) = self.table.read().map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let mut guard = self.table.write();
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` strings have been interned.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the text for a Name. Unknown names resolve to `""`.
    pub fn lookup(&self, name: Name) -> &'static str {
        let index = name.raw() as usize;
        self.table.read().strings.get(index).copied().unwrap_or("")
    }

    /// Number of interned strings, including the pre-interned ones.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Never true: the pre-interned names are always present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
