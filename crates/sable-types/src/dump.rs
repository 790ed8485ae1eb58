//! Human-readable listing of a type table.
//!
//! The format is for debugging only and may change:
//!
//! ```text
//! type table(count: 1)
//!   Point(geometry.Point)
//!     id: 1
//!     category: class
//!     superclass: Object
//!     fields:
//!       var Int x(index: 0)
//!     methods:
//!       Int length()
//! ```

use crate::context::TableId;
use crate::types::{
    Behavior, Callable, CallableFlags, Generic, TypeArena, TypeEntity, TypeId, TypeKind,
};
use sable_log::debug;
use sable_mem::{StringInterner, Symbol};
use std::fmt;

/// Display wrapper that lists every entry of a table.
pub struct TableDump<'a> {
    arena: &'a TypeArena,
    interner: &'a StringInterner,
    table: TableId,
}

impl<'a> TableDump<'a> {
    /// Creates a dump of `table`.
    pub fn new(arena: &'a TypeArena, interner: &'a StringInterner, table: TableId) -> Self {
        Self {
            arena,
            interner,
            table,
        }
    }

    fn name(&self, sym: Symbol) -> &'a str {
        self.interner.resolve(sym).unwrap_or("<unknown>")
    }

    fn short(&self, ty: Option<TypeId>) -> &'a str {
        match ty.and_then(|t| self.arena.get(t)) {
            Some(entity) => self.name(entity.short_name()),
            None => "dynamic",
        }
    }

    fn full(&self, ty: TypeId) -> &'a str {
        match self.arena.get(ty) {
            Some(entity) => self.name(entity.full_name()),
            None => "dynamic",
        }
    }

    fn list<I>(&self, f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(item)?;
        }
        Ok(())
    }

    fn return_type(&self, f: &mut fmt::Formatter<'_>, sig: &Callable) -> fmt::Result {
        if sig.return_type.is_some() && sig.flags.contains(CallableFlags::VOID) {
            f.write_str("void ")
        } else {
            write!(f, "{} ", self.short(sig.return_type))
        }
    }

    fn fields(&self, f: &mut fmt::Formatter<'_>, table: TableId) -> fmt::Result {
        writeln!(f, "    fields:")?;
        for (key, ty) in self.arena[table].iter() {
            let Some(field) = self.arena.get(ty).and_then(TypeEntity::as_field) else {
                continue;
            };
            f.write_str(if field.is_mutable { "      var " } else { "      val " })?;
            if field.declared_type.is_some() {
                write!(f, "{} ", self.short(field.declared_type))?;
            }
            writeln!(f, "{}(index: {})", self.name(key), field.index)?;
        }
        Ok(())
    }

    fn methods(&self, f: &mut fmt::Formatter<'_>, table: TableId) -> fmt::Result {
        writeln!(f, "    methods:")?;
        for (key, ty) in self.arena[table].iter() {
            let Some(sig) = self.arena.get(ty).and_then(TypeEntity::signature) else {
                continue;
            };
            f.write_str("      ")?;
            if sig.flags.contains(CallableFlags::ASYNC) {
                f.write_str("async ")?;
            }
            self.return_type(f, sig)?;
            write!(f, "{}(", self.name(key))?;
            self.list(f, sig.params.iter().map(|&p| self.short(p)))?;
            writeln!(f, ")")?;
        }
        Ok(())
    }

    fn behavior(&self, f: &mut fmt::Formatter<'_>, behavior: &Behavior) -> fmt::Result {
        if let Some(superclass) = behavior.superclass {
            writeln!(f, "    superclass: {}", self.full(superclass))?;
        }
        if !behavior.traits.is_empty() {
            f.write_str("    traits: ")?;
            self.list(f, behavior.traits.iter().map(|&t| self.full(t)))?;
            writeln!(f)?;
        }
        if !behavior.formals.is_empty() {
            f.write_str("    formal parameters: ")?;
            self.list(f, behavior.formals.iter().map(|&t| self.short(Some(t))))?;
            writeln!(f)?;
        }
        if self.arena.table(behavior.fields).is_some_and(|t| !t.is_empty()) {
            self.fields(f, behavior.fields)?;
        }
        if self.arena.table(behavior.methods).is_some_and(|t| !t.is_empty()) {
            self.methods(f, behavior.methods)?;
        }
        Ok(())
    }

    fn callable(
        &self,
        f: &mut fmt::Formatter<'_>,
        entity: &TypeEntity,
        sig: &Callable,
    ) -> fmt::Result {
        f.write_str("    signature: ")?;
        self.return_type(f, sig)?;
        f.write_str(self.name(entity.short_name()))?;
        if !sig.formals.is_empty() {
            f.write_str("<")?;
            self.list(f, sig.formals.iter().map(|&t| self.short(Some(t))))?;
            f.write_str(">")?;
        }
        f.write_str("(")?;
        self.list(f, sig.params.iter().map(|&p| self.short(p)))?;
        writeln!(f, ")")
    }

    fn generic(&self, f: &mut fmt::Formatter<'_>, generic: &Generic) -> fmt::Result {
        writeln!(f, "    generic type: {}", self.short(generic.raw_type))?;
        if !generic.actual_parameters.is_empty() {
            f.write_str("    parameters: ")?;
            self.list(f, generic.actual_parameters.iter().map(|&p| self.short(p)))?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn entry(&self, f: &mut fmt::Formatter<'_>, entity: &TypeEntity) -> fmt::Result {
        write!(f, "  {}", self.name(entity.short_name()))?;
        if entity.is_behavior() {
            write!(f, "({})", self.name(entity.full_name()))?;
        }
        writeln!(f, "\n    id: {}\n    category: {}", entity.id(), entity.category())?;

        match entity.kind() {
            TypeKind::Behavior(b) => self.behavior(f, b)?,
            TypeKind::Callable(c) => self.callable(f, entity, c)?,
            TypeKind::Generic(g) => self.generic(f, g)?,
            TypeKind::Alias(a) => {
                if a.target.is_some() {
                    writeln!(f, "    target: {}", self.short(a.target))?;
                }
            }
            _ => {}
        }
        writeln!(f)
    }
}

impl fmt::Display for TableDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(table) = self.arena.table(self.table) else {
            return writeln!(f, "type table(unknown: {})", self.table);
        };

        writeln!(f, "type table(count: {})", table.count())?;
        for (_, ty) in table.iter() {
            if let Some(entity) = self.arena.get(ty) {
                self.entry(f, entity)?;
            }
        }
        Ok(())
    }
}

impl TypeArena {
    /// Returns a display wrapper listing `table`.
    #[must_use]
    pub fn dump<'a>(&'a self, interner: &'a StringInterner, table: TableId) -> TableDump<'a> {
        TableDump::new(self, interner, table)
    }

    /// Writes the listing of `table` to the log at debug level.
    pub fn dump_table(&self, interner: &StringInterner, table: TableId) {
        debug!("{}", self.dump(interner, table));
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{CallableFlags, Category, TypeArena};
    use sable_mem::StringInterner;

    #[test]
    fn test_dump_behavior() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let globals = arena.new_table(0);

        let object = interner.intern("Object");
        let int = interner.intern("Int");
        let short = interner.intern("Point");
        let full = interner.intern("geometry.Point");
        let x = interner.intern("x");
        let length = interner.intern("length");

        let object_ty = arena.new_behavior(100, Category::Class, object, object, None).unwrap();
        let int_ty = arena.new_behavior(101, Category::Class, int, int, None).unwrap();
        let point = arena
            .insert_behavior(globals, Category::Class, short, full, Some(object_ty))
            .unwrap();

        let behavior = arena[point].as_behavior().unwrap().clone();
        arena.insert_field(behavior.fields, x, Some(int_ty), true, false).unwrap();
        arena.insert_method(behavior.methods, length, Some(int_ty), false, false).unwrap();

        let out = arena.dump(&interner, globals).to_string();
        assert_eq!(
            out,
            "type table(count: 1)\n\
             \x20 Point(geometry.Point)\n\
             \x20   id: 1\n\
             \x20   category: class\n\
             \x20   superclass: Object\n\
             \x20   fields:\n\
             \x20     var Int x(index: 0)\n\
             \x20   methods:\n\
             \x20     Int length()\n\
             \n"
        );
    }

    #[test]
    fn test_dump_structural_entries() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let globals = arena.new_table(0);

        let list = interner.intern("List");
        let int = interner.intern("Int");
        let t = interner.intern("T");
        let apply = interner.intern("apply");
        let list_int = interner.intern("List<Int>");
        let ints = interner.intern("Ints");

        let list_ty = arena.new_behavior(100, Category::Class, list, list, None).unwrap();
        let int_ty = arena.new_behavior(101, Category::Class, int, int, None).unwrap();
        let formal = arena.new_basic(-1, Category::Formal, t, t).unwrap();

        let f = arena.insert_callable(globals, Category::Function, apply, Some(int_ty)).unwrap();
        let sig = arena.callable_mut(f).unwrap();
        sig.formals.push(formal);
        sig.params = vec![Some(formal), None];
        sig.flags |= CallableFlags::GENERIC;

        let g = arena.insert_generic(globals, list, list_int, Some(list_ty)).unwrap();
        arena.generic_mut(g).unwrap().actual_parameters.push(Some(int_ty));
        arena.insert_alias(globals, ints, ints, Some(g)).unwrap();

        let out = arena.dump(&interner, globals).to_string();
        assert!(out.starts_with("type table(count: 3)\n"));
        assert!(out.contains("    category: function\n    signature: Int apply<T>(T, dynamic)\n"));
        assert!(
            out.contains("    category: generic\n    generic type: List\n    parameters: Int\n")
        );
        assert!(out.contains("  Ints\n    id: 3\n    category: typealias\n    target: List\n"));
    }

    #[test]
    fn test_dump_void_and_async_methods() {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let globals = arena.new_table(0);
        let name = interner.intern("Task");
        let void = interner.intern("void");
        let run = interner.intern("run");

        let void_ty = arena.new_basic(-1, Category::Void, void, void).unwrap();
        let task = arena.insert_behavior(globals, Category::Class, name, name, None).unwrap();
        let methods = arena[task].as_behavior().unwrap().methods;
        let m = arena.insert_method(methods, run, Some(void_ty), false, false).unwrap();
        arena.callable_mut(m).unwrap().flags |= CallableFlags::ASYNC | CallableFlags::VOID;

        let out = arena.dump(&interner, globals).to_string();
        assert!(out.contains("    methods:\n      async void run()\n"));
        arena.dump_table(&interner, globals);
    }
}
