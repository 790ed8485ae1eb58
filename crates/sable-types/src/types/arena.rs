//! Per-compilation-unit storage for type entities and type tables.
//!
//! Every entity and every table lives in a [`TypeArena`] and is addressed by
//! a copyable handle ([`TypeId`], [`TableId`]). Cross references between
//! entities (superclass, traits, parameters, return types, alias targets)
//! are handles, so the arena is the single owner and nothing needs to be
//! freed in any particular order.
//!
//! Temporary callables and generics, built only to be named or compared,
//! are allocated inside [`TypeArena::with_temporaries`] and dropped when the
//! closure returns. Handles carry the generation they were issued in, so a
//! handle to a released slot never resolves to whatever reuses the slot.

use crate::context::{TableId, TypeTable};
use crate::error::{Result, TypeError};
use crate::types::entity::{
    Alias, Behavior, Callable, Category, Field, Generic, Header, KindMut, Method, TypeEntity,
    TypeKind,
};
use sable_log::debug;
use sable_mem::Symbol;
use std::fmt;
use std::ops::Index;

/// Handle to an entity in a [`TypeArena`].
///
/// This is the arena slot plus the generation it was issued in, not the
/// scope-local id in the entity's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId {
    index: u32,
    generation: u32,
}

impl TypeId {
    /// Returns the arena slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Hands out scope-local ids, starting at 1.
///
/// One generator per scope replaces process-wide counters.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: i32,
}

impl IdGenerator {
    /// Creates a generator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Creates a generator whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: i32) -> Self {
        Self { next: first }
    }

    /// Returns a fresh id.
    pub fn next_id(&mut self) -> i32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns the id the next call to [`IdGenerator::next_id`] will yield.
    #[must_use]
    pub const fn peek(&self) -> i32 {
        self.next
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Watermark of a temporary scope.
#[derive(Debug, Clone, Copy)]
struct Watermark {
    entities: usize,
    tables: usize,
}

/// An arena slot tagged with the generation that filled it.
#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: T,
}

/// Owner of all entities and tables of one compilation unit.
#[derive(Debug, Default)]
pub struct TypeArena {
    entities: Vec<Slot<TypeEntity>>,
    tables: Vec<Slot<TypeTable>>,
    temp_floor: Option<Watermark>,
    /// Bumped whenever a temporary scope releases its slots.
    generation: u32,
}

impl TypeArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the entity behind `id`, or `None` for a handle this arena
    /// did not issue or has released.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeEntity> {
        self.entities
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &slot.value)
    }

    /// Mutable counterpart of [`TypeArena::get`].
    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeEntity> {
        self.entities
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .map(|slot| &mut slot.value)
    }

    /// Returns the table behind `id`, or `None` for a foreign or released
    /// handle.
    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&TypeTable> {
        self.tables
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .map(|slot| &slot.value)
    }

    /// Mutable counterpart of [`TypeArena::table`].
    pub fn table_mut(&mut self, id: TableId) -> Option<&mut TypeTable> {
        self.tables
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .map(|slot| &mut slot.value)
    }

    /// Creates an empty table owned by scope `id`.
    ///
    /// # Panics
    ///
    /// Panics once the arena holds `u32::MAX` tables.
    pub fn new_table(&mut self, id: i32) -> TableId {
        let index = u32::try_from(self.tables.len()).expect("type arena exhausted table handles");
        self.tables.push(Slot {
            generation: self.generation,
            value: TypeTable::new(id),
        });
        TableId::new(index, self.generation)
    }

    fn alloc(&mut self, header: Header, kind: TypeKind) -> Result<TypeId> {
        let found = header.category;
        let entity = TypeEntity::new(header, kind).ok_or(TypeError::CategoryMismatch {
            expected: "a category matching the payload",
            found,
        })?;
        let index = u32::try_from(self.entities.len()).map_err(|_| TypeError::ArenaFull)?;
        self.entities.push(Slot {
            generation: self.generation,
            value: entity,
        });
        Ok(TypeId {
            index,
            generation: self.generation,
        })
    }

    fn check_category(category: Category, ok: bool, expected: &'static str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(TypeError::CategoryMismatch {
                expected,
                found: category,
            })
        }
    }

    fn behavior(
        &mut self,
        id: i32,
        category: Category,
        short_name: Symbol,
        full_name: Symbol,
        superclass: Option<TypeId>,
        methods: Option<TableId>,
    ) -> Result<TypeId> {
        Self::check_category(category, category.is_behavior(), "class, metaclass or trait")?;
        if let Some(table) = methods {
            self.table(table).ok_or(TypeError::UnknownTable(table))?;
        }

        let fields = self.new_table(-1);
        let methods = match methods {
            Some(table) => table,
            None => self.new_table(id),
        };

        let header = Header {
            id,
            category,
            short_name,
            full_name,
        };
        let payload = Behavior {
            superclass,
            traits: Vec::new(),
            formals: Vec::new(),
            fields,
            methods,
        };
        self.alloc(header, TypeKind::Behavior(payload))
    }

    /// Creates a class, metaclass, or trait with fresh field and method tables.
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` if `category` is not a behavior category.
    pub fn new_behavior(
        &mut self,
        id: i32,
        category: Category,
        short_name: Symbol,
        full_name: Symbol,
        superclass: Option<TypeId>,
    ) -> Result<TypeId> {
        self.behavior(id, category, short_name, full_name, superclass, None)
    }

    /// Creates a behavior composing `traits`, in order.
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` if `category` is not a behavior category.
    pub fn new_behavior_with_traits(
        &mut self,
        id: i32,
        category: Category,
        short_name: Symbol,
        full_name: Symbol,
        superclass: Option<TypeId>,
        traits: &[TypeId],
    ) -> Result<TypeId> {
        let ty = self.behavior(id, category, short_name, full_name, superclass, None)?;
        self.behavior_mut(ty)?.traits.extend_from_slice(traits);
        Ok(ty)
    }

    /// Creates a behavior declaring the generic parameters `formals`.
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` if `category` is not a behavior category.
    pub fn new_behavior_with_formals(
        &mut self,
        id: i32,
        category: Category,
        short_name: Symbol,
        full_name: Symbol,
        superclass: Option<TypeId>,
        formals: &[TypeId],
    ) -> Result<TypeId> {
        let ty = self.behavior(id, category, short_name, full_name, superclass, None)?;
        self.behavior_mut(ty)?.formals.extend_from_slice(formals);
        Ok(ty)
    }

    /// Creates a behavior that uses an existing method table.
    ///
    /// The metaclass of a class is built this way so both share one table.
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` for a non-behavior category, `UnknownTable` if
    /// `methods` was not issued by this arena.
    pub fn new_behavior_with_methods(
        &mut self,
        id: i32,
        category: Category,
        short_name: Symbol,
        full_name: Symbol,
        superclass: Option<TypeId>,
        methods: TableId,
    ) -> Result<TypeId> {
        self.behavior(id, category, short_name, full_name, superclass, Some(methods))
    }

    /// Creates a function signature with no parameters.
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` unless `category` is `Function`.
    pub fn new_callable(
        &mut self,
        id: i32,
        category: Category,
        name: Symbol,
        return_type: Option<TypeId>,
    ) -> Result<TypeId> {
        self.new_callable_with_formals(id, category, name, return_type, &[])
    }

    /// Creates a function signature declaring the generic parameters `formals`.
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` unless `category` is `Function`.
    pub fn new_callable_with_formals(
        &mut self,
        id: i32,
        category: Category,
        name: Symbol,
        return_type: Option<TypeId>,
        formals: &[TypeId],
    ) -> Result<TypeId> {
        Self::check_category(category, category == Category::Function, "function")?;
        let mut callable = Callable::new(return_type);
        callable.formals.extend_from_slice(formals);
        self.alloc(Header::named(id, category, name), TypeKind::Callable(callable))
    }

    /// Creates a field whose storage slot is `id - 1`.
    ///
    /// # Errors
    ///
    /// `ArenaFull` once the arena has issued `u32::MAX` handles.
    pub fn new_field(
        &mut self,
        id: i32,
        name: Symbol,
        declared_type: Option<TypeId>,
        is_mutable: bool,
        has_initializer: bool,
    ) -> Result<TypeId> {
        let field = Field {
            declared_type,
            index: id - 1,
            is_mutable,
            has_initializer,
        };
        self.alloc(Header::named(id, Category::Field, name), TypeKind::Field(field))
    }

    /// Creates a method with an empty signature returning `return_type`.
    ///
    /// # Errors
    ///
    /// `ArenaFull` once the arena has issued `u32::MAX` handles.
    pub fn new_method(
        &mut self,
        id: i32,
        name: Symbol,
        return_type: Option<TypeId>,
        is_class: bool,
        is_initializer: bool,
    ) -> Result<TypeId> {
        let method = Method {
            signature: Callable::new(return_type),
            is_class,
            is_initializer,
        };
        self.alloc(Header::named(id, Category::Method, name), TypeKind::Method(method))
    }

    /// Creates an instantiation of `raw_type` with no arguments yet.
    ///
    /// # Errors
    ///
    /// `ArenaFull` once the arena has issued `u32::MAX` handles.
    pub fn new_generic(
        &mut self,
        id: i32,
        short_name: Symbol,
        full_name: Symbol,
        raw_type: Option<TypeId>,
    ) -> Result<TypeId> {
        self.new_generic_with_parameters(id, short_name, full_name, raw_type, &[])
    }

    /// Creates an instantiation of `raw_type` bound to `parameters`.
    ///
    /// # Errors
    ///
    /// `ArenaFull` once the arena has issued `u32::MAX` handles.
    pub fn new_generic_with_parameters(
        &mut self,
        id: i32,
        short_name: Symbol,
        full_name: Symbol,
        raw_type: Option<TypeId>,
        parameters: &[TypeId],
    ) -> Result<TypeId> {
        let generic = Generic {
            raw_type,
            actual_parameters: parameters.iter().copied().map(Some).collect(),
            is_fully_instantiated: false,
        };
        let header = Header {
            id,
            category: Category::Generic,
            short_name,
            full_name,
        };
        self.alloc(header, TypeKind::Generic(generic))
    }

    /// Creates an alias of `target`.
    ///
    /// # Errors
    ///
    /// `ArenaFull` once the arena has issued `u32::MAX` handles.
    pub fn new_alias(
        &mut self,
        id: i32,
        short_name: Symbol,
        full_name: Symbol,
        target: Option<TypeId>,
    ) -> Result<TypeId> {
        let header = Header {
            id,
            category: Category::Alias,
            short_name,
            full_name,
        };
        self.alloc(header, TypeKind::Alias(Alias { target }))
    }

    /// Creates a formal, void, or none entity.
    ///
    /// # Errors
    ///
    /// `CategoryMismatch` for any category that needs a payload.
    pub fn new_basic(
        &mut self,
        id: i32,
        category: Category,
        short_name: Symbol,
        full_name: Symbol,
    ) -> Result<TypeId> {
        Self::check_category(category, category.is_basic(), "formal, void or none")?;
        let header = Header {
            id,
            category,
            short_name,
            full_name,
        };
        self.alloc(header, TypeKind::Basic)
    }

    /// Returns the behavior payload of `ty` for editing.
    ///
    /// # Errors
    ///
    /// `UnknownType` for a foreign handle, `NotABehavior` otherwise.
    pub fn behavior_mut(&mut self, ty: TypeId) -> Result<&mut Behavior> {
        match self.get_mut(ty).ok_or(TypeError::UnknownType(ty))?.kind_mut() {
            KindMut::Behavior(b) => Ok(b),
            _ => Err(TypeError::NotABehavior(ty)),
        }
    }

    /// Returns the signature of a callable, or of a method, for editing.
    ///
    /// # Errors
    ///
    /// `UnknownType` for a foreign handle, `CategoryMismatch` otherwise.
    pub fn callable_mut(&mut self, ty: TypeId) -> Result<&mut Callable> {
        let entity = self.get_mut(ty).ok_or(TypeError::UnknownType(ty))?;
        let found = entity.category();
        match entity.kind_mut() {
            KindMut::Callable(c) => Ok(c),
            KindMut::Method(m) => Ok(&mut m.signature),
            _ => Err(TypeError::CategoryMismatch {
                expected: "function or method",
                found,
            }),
        }
    }

    /// Returns the method payload of `ty` for editing.
    ///
    /// # Errors
    ///
    /// `UnknownType` for a foreign handle, `CategoryMismatch` otherwise.
    pub fn method_mut(&mut self, ty: TypeId) -> Result<&mut Method> {
        let entity = self.get_mut(ty).ok_or(TypeError::UnknownType(ty))?;
        let found = entity.category();
        match entity.kind_mut() {
            KindMut::Method(m) => Ok(m),
            _ => Err(TypeError::CategoryMismatch {
                expected: "method",
                found,
            }),
        }
    }

    /// Returns the generic payload of `ty` for editing.
    ///
    /// # Errors
    ///
    /// `UnknownType` for a foreign handle, `CategoryMismatch` otherwise.
    pub fn generic_mut(&mut self, ty: TypeId) -> Result<&mut Generic> {
        let entity = self.get_mut(ty).ok_or(TypeError::UnknownType(ty))?;
        let found = entity.category();
        match entity.kind_mut() {
            KindMut::Generic(g) => Ok(g),
            _ => Err(TypeError::CategoryMismatch {
                expected: "generic",
                found,
            }),
        }
    }

    /// Runs `f` in a temporary scope.
    ///
    /// Every entity and table allocated inside `f` is released when it
    /// returns, and handles to them stop resolving: [`TypeArena::get`]
    /// returns `None` for them even after the slot is reused. The `insert_*`
    /// helpers and [`TypeArena::fields_copy`] refuse to write into a table
    /// that outlives the scope.
    ///
    /// ```
    /// use sable_types::types::{Category, TypeArena};
    /// use sable_mem::StringInterner;
    ///
    /// let mut interner = StringInterner::new();
    /// let mut arena = TypeArena::new();
    /// let int = interner.intern("Int");
    /// let int_ty = arena.new_behavior(1, Category::Class, int, int, None).unwrap();
    ///
    /// let same = arena.with_temporaries(|arena| {
    ///     let sig = interner.intern("sig");
    ///     let a = arena.new_callable(-1, Category::Function, sig, Some(int_ty)).unwrap();
    ///     let b = arena.new_callable(-1, Category::Function, sig, Some(int_ty)).unwrap();
    ///     arena.is_equal(Some(a), Some(b))
    /// });
    ///
    /// assert!(same);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn with_temporaries<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let mark = Watermark {
            entities: self.entities.len(),
            tables: self.tables.len(),
        };
        let outer = self.temp_floor.replace(mark);

        let result = f(self);

        let released = self.entities.len() - mark.entities;
        self.entities.truncate(mark.entities);
        self.tables.truncate(mark.tables);
        self.temp_floor = outer;
        self.generation = self.generation.wrapping_add(1);

        if released > 0 {
            debug!("released {} temporary types", released);
        }
        result
    }

    /// Returns true inside a temporary scope if `table` was created before
    /// the scope began. Anything allocated now would escape through it.
    pub(crate) fn outlives_scope(&self, table: TableId) -> bool {
        self.temp_floor.is_some_and(|mark| table.index() < mark.tables)
    }
}

impl Index<TypeId> for TypeArena {
    type Output = TypeEntity;

    /// # Panics
    ///
    /// Panics on a handle this arena did not issue or has released.
    fn index(&self, id: TypeId) -> &TypeEntity {
        match self.get(id) {
            Some(entity) => entity,
            None => panic!("stale or foreign type handle {id}"),
        }
    }
}

impl Index<TableId> for TypeArena {
    type Output = TypeTable;

    /// # Panics
    ///
    /// Panics on a handle this arena did not issue or has released.
    fn index(&self, id: TableId) -> &TypeTable {
        match self.table(id) {
            Some(table) => table,
            None => panic!("stale or foreign table handle {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_mem::StringInterner;

    #[test]
    fn test_id_generator() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.peek(), 3);

        let mut globals = IdGenerator::starting_at(100);
        assert_eq!(globals.next_id(), 100);
    }

    #[test]
    fn test_behavior_owns_two_tables() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let name = interner.intern("Point");

        let point = arena.new_behavior(7, Category::Class, name, name, None).unwrap();
        let behavior = arena[point].as_behavior().unwrap().clone();

        assert_eq!(arena[behavior.fields].id(), -1);
        assert_eq!(arena[behavior.methods].id(), 7);
        assert!(behavior.traits.is_empty());
        assert!(behavior.formals.is_empty());
    }

    #[test]
    fn test_behavior_rejects_function_category() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let name = interner.intern("f");

        let err = arena.new_behavior(1, Category::Function, name, name, None).unwrap_err();
        assert!(matches!(err, TypeError::CategoryMismatch { found: Category::Function, .. }));
        assert!(arena.is_empty());
    }

    #[test]
    fn test_callable_rejects_class_category() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let name = interner.intern("f");
        assert!(arena.new_callable(1, Category::Class, name, None).is_err());
        assert!(arena.new_basic(1, Category::Alias, name, name).is_err());
    }

    #[test]
    fn test_variadic_constructors_keep_order() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let a = interner.intern("A");
        let b = interner.intern("B");
        let c = interner.intern("C");
        let t = interner.intern("T");

        let ta = arena.new_behavior(1, Category::Trait, a, a, None).unwrap();
        let tb = arena.new_behavior(2, Category::Trait, b, b, None).unwrap();
        let formal = arena.new_basic(-1, Category::Formal, t, t).unwrap();

        let class = arena
            .new_behavior_with_traits(3, Category::Class, c, c, None, &[tb, ta])
            .unwrap();
        assert_eq!(arena[class].as_behavior().unwrap().traits, vec![tb, ta]);

        let generic_class = arena
            .new_behavior_with_formals(4, Category::Class, c, c, None, &[formal])
            .unwrap();
        assert_eq!(arena[generic_class].as_behavior().unwrap().formals, vec![formal]);

        let f = arena
            .new_callable_with_formals(5, Category::Function, c, None, &[formal])
            .unwrap();
        assert_eq!(arena[f].as_callable().unwrap().formals, vec![formal]);
    }

    #[test]
    fn test_metaclass_shares_method_table() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let name = interner.intern("Shape");
        let meta = interner.intern("Shape class");

        let class = arena.new_behavior(1, Category::Class, name, name, None).unwrap();
        let methods = arena[class].as_behavior().unwrap().methods;
        let metaclass = arena
            .new_behavior_with_methods(2, Category::Metaclass, meta, meta, None, methods)
            .unwrap();

        assert_eq!(arena[metaclass].as_behavior().unwrap().methods, methods);
        assert_ne!(
            arena[metaclass].as_behavior().unwrap().fields,
            arena[class].as_behavior().unwrap().fields
        );
    }

    #[test]
    fn test_unknown_method_table_rejected() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let name = interner.intern("Shape");
        let bogus = TableId::new(42, 0);

        let err = arena
            .new_behavior_with_methods(1, Category::Class, name, name, None, bogus)
            .unwrap_err();
        assert_eq!(err, TypeError::UnknownTable(bogus));
    }

    #[test]
    fn test_field_index_follows_id() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let x = interner.intern("x");

        let field = arena.new_field(3, x, None, true, false).unwrap();
        let payload = arena[field].as_field().unwrap();
        assert_eq!(payload.index, 2);
        assert!(payload.is_mutable);
        assert!(!payload.has_initializer);
    }

    #[test]
    fn test_callable_mut_reaches_method_signature() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let m = interner.intern("area");
        let method = arena.new_method(1, m, None, false, false).unwrap();

        arena.callable_mut(method).unwrap().params.push(None);
        assert_eq!(arena[method].signature().unwrap().params.len(), 1);

        arena.method_mut(method).unwrap().is_class = true;
        assert!(arena[method].as_method().unwrap().is_class);
        assert!(arena.generic_mut(method).is_err());
        assert!(matches!(arena.behavior_mut(method), Err(TypeError::NotABehavior(_))));
    }

    #[test]
    fn test_temporaries_released() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let list = interner.intern("List");
        let raw = arena.new_behavior(1, Category::Class, list, list, None).unwrap();

        let created = arena.with_temporaries(|arena| {
            let g = arena.new_generic_with_parameters(-1, list, list, Some(raw), &[raw]).unwrap();
            let nested = arena.with_temporaries(|arena| {
                arena.new_generic(-1, list, list, Some(raw)).unwrap();
                arena.len()
            });
            assert_eq!(arena.len(), 2);
            assert!(arena.get(g).is_some());
            nested
        });

        assert_eq!(created, 3);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_get_rejects_foreign_handle() {
        let arena = TypeArena::new();
        let bogus = TypeId {
            index: 0,
            generation: 0,
        };
        assert!(arena.get(bogus).is_none());
        assert!(arena.table(TableId::new(0, 0)).is_none());
    }

    #[test]
    fn test_released_handle_never_resolves_to_reused_slot() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let int = interner.intern("Int");
        let tmp = interner.intern("tmp");
        let other = interner.intern("Other");
        let int_ty = arena.new_behavior(1, Category::Class, int, int, None).unwrap();

        let stale = arena.with_temporaries(|arena| {
            let t = arena.new_behavior(-1, Category::Trait, tmp, tmp, None).unwrap();
            arena.behavior_mut(int_ty).unwrap().traits.push(t);
            t
        });
        assert!(arena.get(stale).is_none());

        let reused = arena.new_behavior(99, Category::Class, other, other, None).unwrap();
        assert_eq!(reused.index(), stale.index());
        assert_ne!(reused, stale);
        assert!(arena.get(stale).is_none());
        assert!(arena.get(reused).is_some());

        // The leaked trait handle stays dead instead of naming `Other`.
        assert!(!arena.is_subtype(Some(int_ty), Some(reused)));
        assert_eq!(arena[int_ty].as_behavior().unwrap().traits, vec![stale]);
    }

    #[test]
    fn test_released_table_handle_never_resolves() {
        let mut arena = TypeArena::new();
        let stale = arena.with_temporaries(|arena| arena.new_table(5));
        assert!(arena.table(stale).is_none());

        let reused = arena.new_table(6);
        assert_eq!(reused.index(), stale.index());
        assert!(arena.table(stale).is_none());
        assert_eq!(arena[reused].id(), 6);
    }

    #[test]
    #[should_panic(expected = "stale or foreign type handle")]
    fn test_index_panics_on_released_handle() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let name = interner.intern("f");
        let stale = arena.with_temporaries(|arena| {
            arena.new_callable(-1, Category::Function, name, None).unwrap()
        });
        let _ = &arena[stale];
    }
}
