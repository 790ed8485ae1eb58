//! Sable type core: type representation, scopes, and type relations.
//!
//! This crate provides the static type model used by the Sable compiler:
//! - Type entities for classes, metaclasses, traits, functions, fields,
//!   methods, generic instantiations, and aliases
//! - Open-addressed type tables keyed by interned names
//! - Method resolution through traits and superclasses
//! - Equality and subtyping
//! - Canonical names for structural types and a table dump for debugging
//!
//! It does not infer types. A declaration pass builds entities through a
//! [`TypeArena`] and the type checker queries them.
//!
//! # Example
//!
//! ```
//! use sable_mem::StringInterner;
//! use sable_types::{Category, TypeArena};
//!
//! let mut interner = StringInterner::new();
//! let mut arena = TypeArena::new();
//! let globals = arena.new_table(0);
//!
//! let object = interner.intern("Object");
//! let shape = interner.intern("Shape");
//! let circle = interner.intern("Circle");
//! let area = interner.intern("area");
//!
//! let object_ty = arena.insert_behavior(globals, Category::Class, object, object, None)?;
//! let shape_ty = arena.insert_behavior(globals, Category::Class, shape, shape, Some(object_ty))?;
//! let circle_ty =
//!     arena.insert_behavior(globals, Category::Class, circle, circle, Some(shape_ty))?;
//!
//! let methods = arena[shape_ty].as_behavior().map(|b| b.methods).unwrap();
//! let area_ty = arena.insert_method(methods, area, None, false, false)?;
//!
//! assert!(arena.is_subtype(Some(circle_ty), Some(shape_ty)));
//! assert_eq!(arena.method_lookup(Some(circle_ty), area), Some(area_ty));
//! # Ok::<(), sable_types::TypeError>(())
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod dump;
pub mod error;
pub mod relation;
pub mod types;

pub use context::{BASELINE_CAPACITY, TableId, TypeTable};
pub use dump::TableDump;
pub use error::{Result, TypeError};
pub use types::{
    Alias, Behavior, Callable, CallableFlags, Category, Field, Generic, Header, IdGenerator,
    Method, TypeArena, TypeEntity, TypeId, TypeKind, TypeName,
};
