//! Method resolution along the class hierarchy.

use crate::types::{Behavior, TypeArena, TypeId, TypeKind};
use sable_mem::Symbol;

impl TypeArena {
    /// Returns the behavior a lookup starts from: the type itself, or the
    /// raw type of a generic instantiation.
    fn lookup_base(&self, ty: TypeId) -> Option<&Behavior> {
        match self.get(ty)?.kind() {
            TypeKind::Behavior(b) => Some(b),
            TypeKind::Generic(g) => self.get(g.raw_type?)?.as_behavior(),
            _ => None,
        }
    }

    /// Finds the method `name` visible on `ty`.
    ///
    /// At each level of the superclass chain the behavior's own method table
    /// is searched first, then the method tables of its directly composed
    /// traits in declaration order. Traits composed by those traits are not
    /// searched. A generic instantiation resolves through its raw type.
    ///
    /// Returns `None` for an absent type, a type that is neither a behavior
    /// nor a generic, or a name that is not found.
    #[must_use]
    pub fn method_lookup(&self, ty: Option<TypeId>, name: Symbol) -> Option<TypeId> {
        let mut current = ty;
        // A cyclic chain stops after visiting every entity once.
        let mut remaining = self.len();

        while let Some(ty) = current {
            if remaining == 0 {
                break;
            }
            remaining -= 1;

            let behavior = self.lookup_base(ty)?;

            if let Some(method) = self.table(behavior.methods).and_then(|t| t.get(name)) {
                return Some(method);
            }

            let from_trait = behavior.traits.iter().find_map(|&t| {
                let methods = self.get(t)?.as_behavior()?.methods;
                self.table(methods)?.get(name)
            });
            if from_trait.is_some() {
                return from_trait;
            }

            current = behavior.superclass;
        }

        None
    }
}
