//! Type equality and subtyping.
//!
//! Both relations treat an absent type (`None`) as dynamic: it is equal to,
//! and a subtype of, everything. Aliases are unwrapped one level on each
//! side. Behaviors compare by header id; callables and generics compare
//! structurally.
//!
//! The well-known names `Nil`, `Object`, `Function`, and `TCallable` are
//! matched by symbol identity, so the symbols must come from a
//! [`StringInterner`](sable_mem::StringInterner), which pre-interns them.

use crate::types::{TypeArena, TypeEntity, TypeId, TypeKind};
use sable_mem::WellKnown;

/// Result of unwrapping an alias.
#[derive(Clone, Copy)]
enum Unaliased<'a> {
    /// No target, or a target this arena does not know.
    Dynamic,
    Entity(&'a TypeEntity),
}

impl TypeArena {
    fn unalias<'a>(&'a self, entity: &'a TypeEntity) -> Unaliased<'a> {
        match entity.as_alias() {
            None => Unaliased::Entity(entity),
            Some(alias) => match alias.target.and_then(|t| self.get(t)) {
                Some(target) => Unaliased::Entity(target),
                None => Unaliased::Dynamic,
            },
        }
    }

    fn all_equal(&self, a: &[Option<TypeId>], b: &[Option<TypeId>]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.is_equal(x, y))
    }

    /// Returns true if `a` and `b` denote the same type.
    ///
    /// A handle is always equal to itself, and `None` is equal to anything.
    ///
    /// ```
    /// use sable_mem::StringInterner;
    /// use sable_types::types::{Category, TypeArena};
    ///
    /// let mut interner = StringInterner::new();
    /// let mut arena = TypeArena::new();
    /// let int = interner.intern("Int");
    /// let text = interner.intern("String");
    /// let int_ty = arena.new_behavior(1, Category::Class, int, int, None).unwrap();
    /// let text_ty = arena.new_behavior(2, Category::Class, text, text, None).unwrap();
    ///
    /// assert!(arena.is_equal(Some(int_ty), Some(int_ty)));
    /// assert!(arena.is_equal(None, Some(int_ty)));
    /// assert!(!arena.is_equal(Some(int_ty), Some(text_ty)));
    /// ```
    #[must_use]
    pub fn is_equal(&self, a: Option<TypeId>, b: Option<TypeId>) -> bool {
        let (Some(a), Some(b)) = (a, b) else {
            return true;
        };
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => self.is_equal_entity(a, b),
            _ => false,
        }
    }

    /// Entity-level form of [`TypeArena::is_equal`].
    ///
    /// Two formals are always equal. Behaviors are equal when their header
    /// ids agree. Callables need equal return types and pairwise equal
    /// parameters. Generics need pairwise equal actual parameters; their raw
    /// types are not compared. Any other pairing is unequal.
    #[must_use]
    pub fn is_equal_entity(&self, a: &TypeEntity, b: &TypeEntity) -> bool {
        if a.is_formal() && b.is_formal() {
            return true;
        }
        let (Unaliased::Entity(a), Unaliased::Entity(b)) = (self.unalias(a), self.unalias(b))
        else {
            return true;
        };

        match (a.kind(), b.kind()) {
            (TypeKind::Behavior(_), TypeKind::Behavior(_)) => a.id() == b.id(),
            (TypeKind::Callable(x), TypeKind::Callable(y)) => {
                self.is_equal(x.return_type, y.return_type) && self.all_equal(&x.params, &y.params)
            }
            (TypeKind::Generic(x), TypeKind::Generic(y)) => {
                self.all_equal(&x.actual_parameters, &y.actual_parameters)
            }
            _ => false,
        }
    }

    /// Returns true if a value of type `sub` may be used where `sup` is
    /// expected.
    ///
    /// Equal types are subtypes of each other. `Nil` is a subtype of
    /// everything and everything is a subtype of `Object`. A callable is a
    /// subtype of the `Function` and `TCallable` behaviors. A generic is a
    /// subtype of whatever its raw type is. Otherwise both sides must be
    /// behaviors, and `sup` must appear on the superclass chain of `sub` or
    /// among the traits `sub` composes directly.
    #[must_use]
    pub fn is_subtype(&self, sub: Option<TypeId>, sup: Option<TypeId>) -> bool {
        if self.is_equal(sub, sup) {
            return true;
        }
        match (sub.and_then(|t| self.get(t)), sup.and_then(|t| self.get(t))) {
            (Some(sub), Some(sup)) => self.is_subtype_entity(sub, sup),
            _ => false,
        }
    }

    /// Entity-level form of [`TypeArena::is_subtype`].
    #[must_use]
    pub fn is_subtype_entity(&self, sub: &TypeEntity, sup: &TypeEntity) -> bool {
        if self.is_equal_entity(sub, sup) {
            return true;
        }
        let (Unaliased::Entity(sub), Unaliased::Entity(sup)) =
            (self.unalias(sub), self.unalias(sup))
        else {
            return true;
        };

        if sub.short_name().is(WellKnown::Nil) || sup.short_name().is(WellKnown::Object) {
            return true;
        }

        if !sup.is_behavior() {
            return false;
        }
        match sub.kind() {
            TypeKind::Callable(_) => {
                let name = sup.short_name();
                name.is(WellKnown::Function) || name.is(WellKnown::TCallable)
            }
            TypeKind::Generic(g) => match g.raw_type.map(|raw| self.get(raw)) {
                None => true,
                Some(Some(raw)) => self.is_subtype_entity(raw, sup),
                Some(None) => false,
            },
            TypeKind::Behavior(_) => {
                self.inherits_from(sub, sup.id()) || self.composes_directly(sub, sup.id())
            }
            _ => false,
        }
    }

    /// Walks the superclass chain of `sub` looking for header id `id`.
    fn inherits_from(&self, sub: &TypeEntity, id: i32) -> bool {
        let mut current = sub.as_behavior().and_then(|b| b.superclass);
        // A cyclic chain stops after visiting every entity once.
        let mut remaining = self.len();

        while let Some(ty) = current {
            let Some(entity) = self.get(ty) else {
                return false;
            };
            if entity.id() == id {
                return true;
            }
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            current = entity.as_behavior().and_then(|b| b.superclass);
        }
        false
    }

    /// Scans the traits `sub` lists itself, without following their own
    /// trait lists.
    fn composes_directly(&self, sub: &TypeEntity, id: i32) -> bool {
        sub.as_behavior().is_some_and(|b| {
            b.traits
                .iter()
                .any(|&t| self.get(t).is_some_and(|entity| entity.id() == id))
        })
    }

    /// Returns true for a generic instantiation, or for a behavior, callable,
    /// or method that declares at least one formal parameter.
    #[must_use]
    pub fn has_generic_parameters(&self, ty: Option<TypeId>) -> bool {
        let Some(entity) = ty.and_then(|t| self.get(t)) else {
            return false;
        };
        match entity.kind() {
            TypeKind::Generic(_) => true,
            TypeKind::Behavior(b) => !b.formals.is_empty(),
            TypeKind::Callable(c) => !c.formals.is_empty(),
            TypeKind::Method(m) => !m.signature.formals.is_empty(),
            _ => false,
        }
    }
}
