//! Open-addressed symbol tables.
//!
//! A [`TypeTable`] maps interned names to entity handles. Slots are probed
//! linearly from `hash & (capacity - 1)`; capacity is zero or a power of two
//! and the table grows before an insertion would push the load past 0.75.
//! There is no deletion, so a probe stops at the first empty slot.
//!
//! Tables live in the [`TypeArena`]; the `insert_*` helpers at the bottom of
//! this file allocate an entity and register it in one step.

use crate::error::{Result, TypeError};
use crate::types::{Category, TypeArena, TypeId};
use sable_log::{debug, trace};
use sable_mem::Symbol;
use std::fmt;

/// Capacity of a table after its first growth.
pub const BASELINE_CAPACITY: usize = 8;

/// Load factor a table never exceeds after an insertion, as a ratio.
const MAX_LOAD_NUM: usize = 3;
const MAX_LOAD_DEN: usize = 4;

/// Handle to a [`TypeTable`] in a [`TypeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId {
    index: u32,
    generation: u32,
}

impl TableId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the arena slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table#{}", self.index)
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: Symbol,
    value: TypeId,
}

/// Hash map from names to entity handles.
#[derive(Debug, Clone)]
pub struct TypeTable {
    id: i32,
    count: usize,
    entries: Vec<Option<Entry>>,
}

impl TypeTable {
    /// Creates an empty table. `id` is the owning behavior's id, -1 for a
    /// fields table, or any free id for a global scope.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self {
            id,
            count: 0,
            entries: Vec::new(),
        }
    }

    /// Returns the owner id this table was created with.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Returns the number of live entries.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Same as [`TypeTable::count`].
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if nothing has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of slots. Zero or a power of two.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the slot holding `key`, or the empty slot where it would go.
    /// Capacity must be non-zero.
    fn find_slot(entries: &[Option<Entry>], key: Symbol) -> usize {
        let mask = entries.len() - 1;
        let mut index = key.hash32() as usize & mask;
        loop {
            match entries[index] {
                Some(entry) if entry.key != key => index = (index + 1) & mask,
                _ => return index,
            }
        }
    }

    fn grow(&mut self) {
        let capacity = match self.entries.len() {
            0 => BASELINE_CAPACITY,
            n => n * 2,
        };
        trace!("table {} grows {} -> {}", self.id, self.entries.len(), capacity);

        let mut entries = vec![None; capacity];
        for entry in self.entries.iter().flatten() {
            let slot = Self::find_slot(&entries, entry.key);
            entries[slot] = Some(*entry);
        }
        self.entries = entries;
    }

    /// Looks up `key`.
    #[must_use]
    pub fn get(&self, key: Symbol) -> Option<TypeId> {
        if self.count == 0 {
            return None;
        }
        self.entries[Self::find_slot(&self.entries, key)].map(|entry| entry.value)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: Symbol) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key -> value`.
    ///
    /// Returns `false` and leaves the table untouched if `key` is already
    /// present; the existing entry is never overwritten.
    ///
    /// ```
    /// use sable_mem::StringInterner;
    /// use sable_types::context::TypeTable;
    /// # use sable_types::types::{Category, TypeArena};
    ///
    /// let mut interner = StringInterner::new();
    /// # let mut arena = TypeArena::new();
    /// let name = interner.intern("Point");
    /// # let ty = arena.new_behavior(1, Category::Class, name, name, None).unwrap();
    /// let mut table = TypeTable::new(0);
    ///
    /// assert!(table.set(name, ty));
    /// assert!(!table.set(name, ty));
    /// assert_eq!(table.get(name), Some(ty));
    /// assert_eq!(table.capacity(), 8);
    /// ```
    pub fn set(&mut self, key: Symbol, value: TypeId) -> bool {
        if self.contains(key) {
            return false;
        }
        if (self.count + 1) * MAX_LOAD_DEN > self.entries.len() * MAX_LOAD_NUM {
            self.grow();
        }

        let slot = Self::find_slot(&self.entries, key);
        self.entries[slot] = Some(Entry { key, value });
        self.count += 1;
        true
    }

    /// Iterates live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, TypeId)> + '_ {
        self.entries
            .iter()
            .flatten()
            .map(|entry| (entry.key, entry.value))
    }
}

impl TypeArena {
    fn register(
        &mut self,
        table: TableId,
        key: Symbol,
        build: impl FnOnce(&mut Self, i32) -> Result<TypeId>,
    ) -> Result<TypeId> {
        let target = self.table(table).ok_or(TypeError::UnknownTable(table))?;
        if self.outlives_scope(table) {
            return Err(TypeError::TemporaryEscape(table));
        }
        if target.contains(key) {
            debug!("rejected duplicate {} in table {}", key, target.id());
            return Err(TypeError::DuplicateDeclaration {
                name: key,
                table: target.id(),
            });
        }
        let id = i32::try_from(target.count() + 1).map_err(|_| TypeError::ArenaFull)?;

        let ty = build(self, id)?;
        let target = self.table_mut(table).ok_or(TypeError::UnknownTable(table))?;
        target.set(key, ty);
        Ok(ty)
    }

    /// Declares a class, metaclass, or trait in `table`, keyed by its full name.
    ///
    /// Every `insert_*` helper fails with `TemporaryEscape` when called
    /// inside [`TypeArena::with_temporaries`] on a table created before the
    /// scope began.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if the full name is taken, `CategoryMismatch`
    /// for a non-behavior category, `UnknownTable` for a foreign handle.
    pub fn insert_behavior(
        &mut self,
        table: TableId,
        category: Category,
        short_name: Symbol,
        full_name: Symbol,
        superclass: Option<TypeId>,
    ) -> Result<TypeId> {
        self.register(table, full_name, |arena, id| {
            arena.new_behavior(id, category, short_name, full_name, superclass)
        })
    }

    /// Declares a function signature in `table`, keyed by `name`.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if `name` is taken, `CategoryMismatch` unless
    /// `category` is `Function`.
    pub fn insert_callable(
        &mut self,
        table: TableId,
        category: Category,
        name: Symbol,
        return_type: Option<TypeId>,
    ) -> Result<TypeId> {
        self.register(table, name, |arena, id| {
            arena.new_callable(id, category, name, return_type)
        })
    }

    /// Declares a field in `table`. Its storage slot is its position in the
    /// table, counting from zero.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if `name` is taken.
    pub fn insert_field(
        &mut self,
        table: TableId,
        name: Symbol,
        declared_type: Option<TypeId>,
        is_mutable: bool,
        has_initializer: bool,
    ) -> Result<TypeId> {
        self.register(table, name, |arena, id| {
            arena.new_field(id, name, declared_type, is_mutable, has_initializer)
        })
    }

    /// Declares a method in `table`, keyed by `name`.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if `name` is taken.
    pub fn insert_method(
        &mut self,
        table: TableId,
        name: Symbol,
        return_type: Option<TypeId>,
        is_class: bool,
        is_initializer: bool,
    ) -> Result<TypeId> {
        self.register(table, name, |arena, id| {
            arena.new_method(id, name, return_type, is_class, is_initializer)
        })
    }

    /// Declares a generic instantiation in `table`, keyed by its full name.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if the full name is taken.
    pub fn insert_generic(
        &mut self,
        table: TableId,
        short_name: Symbol,
        full_name: Symbol,
        raw_type: Option<TypeId>,
    ) -> Result<TypeId> {
        self.register(table, full_name, |arena, id| {
            arena.new_generic(id, short_name, full_name, raw_type)
        })
    }

    /// Declares a type alias in `table`, keyed by its full name.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if the full name is taken.
    pub fn insert_alias(
        &mut self,
        table: TableId,
        short_name: Symbol,
        full_name: Symbol,
        target: Option<TypeId>,
    ) -> Result<TypeId> {
        self.register(table, full_name, |arena, id| {
            arena.new_alias(id, short_name, full_name, target)
        })
    }

    /// Copies every field of `from` into `to` as fresh field entities with
    /// the same id, declared type, and flags. Names already present in `to`
    /// are skipped without allocating.
    ///
    /// Returns the number of fields copied.
    ///
    /// # Errors
    ///
    /// `UnknownTable` if either handle is foreign or released,
    /// `TemporaryEscape` if `to` outlives the current temporary scope.
    pub fn fields_copy(&mut self, from: TableId, to: TableId) -> Result<usize> {
        self.table(to).ok_or(TypeError::UnknownTable(to))?;
        if self.outlives_scope(to) {
            return Err(TypeError::TemporaryEscape(to));
        }
        let source: Vec<(Symbol, TypeId)> = self
            .table(from)
            .ok_or(TypeError::UnknownTable(from))?
            .iter()
            .collect();

        let mut copied = 0;
        for (name, ty) in source {
            if self[to].contains(name) {
                continue;
            }
            let entity = &self[ty];
            let Some(field) = entity.as_field().copied() else {
                continue;
            };
            let id = entity.id();

            let clone = self.new_field(
                id,
                name,
                field.declared_type,
                field.is_mutable,
                field.has_initializer,
            )?;
            if self.table_mut(to).is_some_and(|t| t.set(name, clone)) {
                copied += 1;
            }
        }
        Ok(copied)
    }
}
