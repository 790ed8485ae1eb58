//! Errors reported by the type core.
//!
//! Absence is not an error: lookups return `Option`. These variants cover
//! the cases a declaration pass has to report or that indicate a handle was
//! used with the wrong arena.

use crate::context::TableId;
use crate::types::{Category, TypeId};
use sable_mem::Symbol;
use std::fmt;

/// Errors raised while building or editing type entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeError {
    /// A table already holds an entry under this name.
    DuplicateDeclaration {
        /// The clashing key.
        name: Symbol,
        /// Id of the table that rejected it.
        table: i32,
    },

    /// A constructor or accessor was given an entity of the wrong category.
    CategoryMismatch {
        /// What the operation accepts.
        expected: &'static str,
        /// What it got.
        found: Category,
    },

    /// The handle names an entity that is not a class, metaclass, or trait.
    NotABehavior(TypeId),

    /// The handle was not issued by this arena, or was released.
    UnknownType(TypeId),

    /// The table handle was not issued by this arena, or was released.
    UnknownTable(TableId),

    /// A declaration inside a temporary scope targeted a table that
    /// outlives the scope.
    TemporaryEscape(TableId),

    /// The arena has issued every available handle.
    ArenaFull,
}

impl TypeError {
    /// Returns a short description of this error.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            TypeError::DuplicateDeclaration { .. } => "duplicate declaration",
            TypeError::CategoryMismatch { .. } => "category mismatch",
            TypeError::NotABehavior(_) => "not a behavior type",
            TypeError::UnknownType(_) => "unknown type handle",
            TypeError::UnknownTable(_) => "unknown table handle",
            TypeError::TemporaryEscape(_) => "temporary type escapes its scope",
            TypeError::ArenaFull => "type arena full",
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::DuplicateDeclaration { name, table } => {
                write!(f, "duplicate declaration of {name} in table {table}")
            }
            TypeError::CategoryMismatch { expected, found } => {
                write!(f, "category mismatch: expected {expected}, found {found}")
            }
            TypeError::NotABehavior(ty) => {
                write!(f, "type {ty} is not a class, metaclass or trait")
            }
            TypeError::UnknownType(ty) => write!(f, "unknown type handle {ty}"),
            TypeError::UnknownTable(table) => write!(f, "unknown table handle {table}"),
            TypeError::TemporaryEscape(table) => {
                write!(f, "temporary type would outlive its scope in {table}")
            }
            TypeError::ArenaFull => write!(f, "type arena full"),
        }
    }
}

impl std::error::Error for TypeError {}

/// Result type for type-core operations.
pub type Result<T> = std::result::Result<T, TypeError>;
