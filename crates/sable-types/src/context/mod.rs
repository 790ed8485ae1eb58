//! Scopes and name resolution.
//!
//! - **TypeTable**: open-addressed map from names to entity handles
//! - **Method lookup**: own methods, then direct traits, then superclasses

pub mod lookup;
pub mod table;

pub use table::{BASELINE_CAPACITY, TableId, TypeTable};
