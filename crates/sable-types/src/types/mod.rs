//! Type representation.
//!
//! - **TypeEntity**: header plus one payload per declarable kind
//! - **TypeArena**: owner of every entity and table of a compilation unit
//! - **Display**: canonical names for callables and generics

pub mod arena;
pub mod display;
pub mod entity;

pub use arena::{IdGenerator, TypeArena, TypeId};
pub use display::TypeName;
pub use entity::{
    Alias, Behavior, Callable, CallableFlags, Category, Field, Generic, Header, KindMut, Method,
    TypeEntity, TypeKind,
};
