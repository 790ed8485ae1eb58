//! Symbol type for interned strings.
//!
//! A symbol is the identity of an interned string. Two symbols are equal iff
//! they were issued for the same string by the same interner; the string
//! contents are never compared. Each symbol also carries the 32-bit hash of
//! its string, computed once at interning time, so hash tables keyed by
//! symbols never touch the string data.
//!
//! # Examples
//!
//! ```
//! use sable_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//! let a = interner.intern("Point");
//! let b = interner.intern("Point");
//!
//! assert_eq!(a, b);
//! assert_eq!(a.hash32(), b.hash32());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

/// Handle to an interned string.
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    id: u32,
    hash: u32,
}

impl Symbol {
    /// Creates a symbol from a raw id and its string hash.
    ///
    /// Only the interner should need this; a symbol built by hand with a
    /// wrong hash will not be found in a type table.
    #[must_use]
    pub const fn new(id: u32, hash: u32) -> Self {
        Self { id, hash }
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.id
    }

    /// Returns the raw id as an index.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.id as usize
    }

    /// Returns the precomputed hash of the interned string.
    #[must_use]
    pub const fn hash32(self) -> u32 {
        self.hash
    }

    /// Returns true if this symbol names the given well-known type.
    ///
    /// Well-known names are interned first, so this is an id comparison.
    ///
    /// ```
    /// use sable_mem::{StringInterner, WellKnown};
    ///
    /// let mut interner = StringInterner::new();
    /// assert!(interner.intern("Object").is(WellKnown::Object));
    /// assert!(!interner.intern("Objective").is(WellKnown::Object));
    /// ```
    #[must_use]
    pub const fn is(self, name: WellKnown) -> bool {
        self.id == name as u32
    }

    /// The invalid/placeholder symbol (`u32::MAX`).
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            id: u32::MAX,
            hash: 0,
        }
    }

    /// Returns true if this is [`Symbol::invalid`].
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.id == u32::MAX
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.id)
    }
}

/// Type names the type core treats specially.
///
/// The interner pre-interns these in declaration order, so each one's
/// symbol id equals its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnown {
    /// Universal supertype.
    Object = 0,
    /// Universal subtype.
    Nil = 1,
    /// Marker class every callable conforms to.
    Function = 2,
    /// Marker trait every callable conforms to.
    TCallable = 3,
}

impl WellKnown {
    /// All well-known names, in interning order.
    pub const ALL: [WellKnown; 4] = [
        WellKnown::Object,
        WellKnown::Nil,
        WellKnown::Function,
        WellKnown::TCallable,
    ];

    /// Returns the source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WellKnown::Object => "Object",
            WellKnown::Nil => "Nil",
            WellKnown::Function => "Function",
            WellKnown::TCallable => "TCallable",
        }
    }
}
