//! Canonical names for structural types.
//!
//! Callables and generics have no declared name of their own; the names
//! built here are what diagnostics print and what a declaration pass keys
//! a generic instantiation by.
//!
//! - Callable: `Ret fun(A, B)`, or `Ret fun(...A)` when variadic
//! - Generic: `Raw<A, B>`
//! - Anything else: its short name
//!
//! An absent type prints as `dynamic`.

use crate::types::{Callable, Generic, TypeArena, TypeId, TypeKind};
use sable_mem::{StringInterner, Symbol};
use std::fmt;

const DYNAMIC: &str = "dynamic";

/// Display wrapper that names a type.
pub struct TypeName<'a> {
    arena: &'a TypeArena,
    interner: &'a StringInterner,
    ty: Option<TypeId>,
}

impl<'a> TypeName<'a> {
    /// Creates a display wrapper for `ty`.
    pub fn new(arena: &'a TypeArena, interner: &'a StringInterner, ty: Option<TypeId>) -> Self {
        Self {
            arena,
            interner,
            ty,
        }
    }

    fn symbol(&self, sym: Symbol, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interner.resolve(sym).unwrap_or("<unknown>"))
    }

    fn format_type(&self, ty: Option<TypeId>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(entity) = ty.and_then(|t| self.arena.get(t)) else {
            return f.write_str(DYNAMIC);
        };
        match entity.kind() {
            TypeKind::Callable(c) => self.format_callable(c, f),
            TypeKind::Generic(g) => self.format_generic(g, f),
            _ => self.symbol(entity.short_name(), f),
        }
    }

    fn format_list(&self, types: &[Option<TypeId>], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.format_type(ty, f)?;
        }
        Ok(())
    }

    fn format_callable(&self, callable: &Callable, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_type(callable.return_type, f)?;
        f.write_str(" fun(")?;
        if callable.is_variadic() {
            f.write_str("...")?;
        }
        self.format_list(&callable.params, f)?;
        f.write_str(")")
    }

    fn format_generic(&self, generic: &Generic, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match generic.raw_type.and_then(|t| self.arena.get(t)) {
            Some(raw) => self.symbol(raw.short_name(), f)?,
            None => f.write_str(DYNAMIC)?,
        }
        f.write_str("<")?;
        self.format_list(&generic.actual_parameters, f)?;
        f.write_str(">")
    }
}

impl fmt::Display for TypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format_type(self.ty, f)
    }
}

/// Display wrapper for a callable or generic payload that is not stored in
/// an arena slot.
enum Structural<'a> {
    Callable(&'a Callable),
    Generic(&'a Generic),
}

struct PayloadName<'a> {
    inner: TypeName<'a>,
    payload: Structural<'a>,
}

impl fmt::Display for PayloadName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload {
            Structural::Callable(c) => self.inner.format_callable(c, f),
            Structural::Generic(g) => self.inner.format_generic(g, f),
        }
    }
}

impl TypeArena {
    /// Returns a display wrapper naming `ty`.
    #[must_use]
    pub fn display<'a>(&'a self, interner: &'a StringInterner, ty: Option<TypeId>) -> TypeName<'a> {
        TypeName::new(self, interner, ty)
    }

    /// Names any type: callables and generics structurally, everything else
    /// by short name.
    #[must_use]
    pub fn type_name(&self, interner: &StringInterner, ty: Option<TypeId>) -> String {
        self.display(interner, ty).to_string()
    }

    /// Names a callable signature, e.g. `Int fun(String, dynamic)`.
    ///
    /// ```
    /// use sable_mem::StringInterner;
    /// use sable_types::types::{Callable, CallableFlags, Category, TypeArena};
    ///
    /// let mut interner = StringInterner::new();
    /// let mut arena = TypeArena::new();
    /// let int = interner.intern("Int");
    /// let int_ty = arena.new_behavior(1, Category::Class, int, int, None).unwrap();
    ///
    /// let mut sig = Callable::new(None);
    /// sig.params = vec![None, Some(int_ty)];
    /// assert_eq!(arena.callable_name(&interner, &sig), "dynamic fun(dynamic, Int)");
    ///
    /// sig.flags |= CallableFlags::VARIADIC;
    /// assert_eq!(arena.callable_name(&interner, &sig), "dynamic fun(...dynamic, Int)");
    /// ```
    #[must_use]
    pub fn callable_name(&self, interner: &StringInterner, callable: &Callable) -> String {
        PayloadName {
            inner: TypeName::new(self, interner, None),
            payload: Structural::Callable(callable),
        }
        .to_string()
    }

    /// Names a generic instantiation, e.g. `Map<String, Int>`.
    #[must_use]
    pub fn generic_name(&self, interner: &StringInterner, generic: &Generic) -> String {
        PayloadName {
            inner: TypeName::new(self, interner, None),
            payload: Structural::Generic(generic),
        }
        .to_string()
    }
}
