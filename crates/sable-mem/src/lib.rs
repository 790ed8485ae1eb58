//! Sable memory infrastructure
//!
//! - **Symbols**: copyable handles to interned strings, compared by identity
//!   and carrying a precomputed hash
//! - **String interning**: deduplicated string storage that issues symbols
//!
//! The `symbols` feature backs the interner with `hashbrown`.

pub mod interner;
pub mod symbol;

pub use interner::StringInterner;
pub use symbol::{Symbol, WellKnown};
