//! String interning with identity-compared symbols.
//!
//! The interner keeps two structures:
//! - `strings`: symbol id -> owned string (for resolving symbols)
//! - `symbols`: string -> symbol (for interning)
//!
//! The hash stored in each [`Symbol`] is computed once here with `fxhash`,
//! which is what the type tables probe with.
//!
//! # Examples
//!
//! ```
//! use sable_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//!
//! let list = interner.intern("List");
//! let again = interner.intern("List");
//! let map = interner.intern("Map");
//!
//! assert_eq!(list, again);
//! assert_ne!(list, map);
//! assert_eq!(interner.resolve(list), Some("List"));
//! ```

use crate::symbol::{Symbol, WellKnown};

// The "symbols" feature enables hashbrown
#[cfg(feature = "symbols")]
use hashbrown::HashMap;

#[cfg(not(feature = "symbols"))]
use std::collections::HashMap;

/// String interner with bidirectional mapping.
///
/// Every [`WellKnown`] name is interned on construction, so its symbol id is
/// its discriminant and [`Symbol::is`] needs no interner.
#[derive(Debug)]
pub struct StringInterner {
    strings: Vec<Box<str>>,
    symbols: HashMap<Box<str>, Symbol>,
}

impl StringInterner {
    /// Creates an interner holding only the well-known type names.
    ///
    /// ```
    /// use sable_mem::{StringInterner, WellKnown};
    ///
    /// let interner = StringInterner::new();
    /// assert_eq!(interner.len(), WellKnown::ALL.len());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut interner = Self {
            strings: Vec::new(),
            symbols: HashMap::new(),
        };

        for name in WellKnown::ALL {
            let sym = interner.intern(name.as_str());
            debug_assert!(sym.is(name));
        }

        interner
    }

    /// Interns a string, returning its symbol.
    ///
    /// Re-interning the same contents returns the same symbol.
    ///
    /// # Panics
    ///
    /// Panics if every symbol id below [`Symbol::invalid`] has been issued.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.symbols.get(s) {
            return sym;
        }

        let id = next_id(self.strings.len());
        let sym = Symbol::new(id, fxhash::hash32(s));

        self.strings.push(s.into());
        self.symbols.insert(s.into(), sym);

        sym
    }

    /// Returns the symbol for `s` if it has been interned.
    #[must_use]
    pub fn get(&self, s: &str) -> Option<Symbol> {
        self.symbols.get(s).copied()
    }

    /// Resolves a symbol to its string. `None` if it was not issued here.
    ///
    /// ```
    /// use sable_mem::{StringInterner, Symbol};
    ///
    /// let mut interner = StringInterner::new();
    /// let sym = interner.intern("Int");
    /// assert_eq!(interner.resolve(sym), Some("Int"));
    /// assert_eq!(interner.resolve(Symbol::invalid()), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.strings.get(sym.as_usize()).map(|s| &**s)
    }

    /// Returns the symbol of a well-known type name.
    #[must_use]
    pub fn well_known(&self, name: WellKnown) -> Symbol {
        let s = name.as_str();
        Symbol::new(name as u32, fxhash::hash32(s))
    }

    /// Returns the number of interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if nothing is interned. Never true after [`StringInterner::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Id for the symbol interned after `len` others. `u32::MAX` is reserved
/// for [`Symbol::invalid`].
fn next_id(len: usize) -> u32 {
    u32::try_from(len)
        .ok()
        .filter(|&id| id != u32::MAX)
        .expect("string interner exhausted symbol ids")
}
