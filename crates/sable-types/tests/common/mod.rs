// Common test utilities for integration tests
//
// Builds a small class/trait hierarchy in a fresh arena:
//
//   Object
//   ├── Nil
//   ├── Int        : Comparable
//   └── Shape      : Drawable
//       └── Circle : Named
//
// Traits: Comparable, Named, Drawable (composes Named).
// Also declares the marker class `Function` and trait `TCallable`.

#![allow(dead_code)]

use sable_mem::{StringInterner, Symbol};
use sable_types::{Category, TableId, TypeArena, TypeId};

/// A populated arena plus the handles tests need.
pub struct Hierarchy {
    pub interner: StringInterner,
    pub arena: TypeArena,
    pub globals: TableId,
    pub object: TypeId,
    pub nil: TypeId,
    pub function: TypeId,
    pub tcallable: TypeId,
    pub comparable: TypeId,
    pub named: TypeId,
    pub drawable: TypeId,
    pub int: TypeId,
    pub shape: TypeId,
    pub circle: TypeId,
}

impl Hierarchy {
    pub fn new() -> Self {
        let mut interner = StringInterner::new();
        let mut arena = TypeArena::new();
        let globals = arena.new_table(0);

        let mut class = |arena: &mut TypeArena, name: &str, category, superclass| {
            let sym = interner.intern(name);
            arena
                .insert_behavior(globals, category, sym, sym, superclass)
                .expect("fixture declaration")
        };

        let object = class(&mut arena, "Object", Category::Class, None);
        let nil = class(&mut arena, "Nil", Category::Class, Some(object));
        let function = class(&mut arena, "Function", Category::Class, Some(object));
        let tcallable = class(&mut arena, "TCallable", Category::Trait, None);
        let comparable = class(&mut arena, "Comparable", Category::Trait, None);
        let named = class(&mut arena, "Named", Category::Trait, None);
        let drawable = class(&mut arena, "Drawable", Category::Trait, None);
        let int = class(&mut arena, "Int", Category::Class, Some(object));
        let shape = class(&mut arena, "Shape", Category::Class, Some(object));
        let circle = class(&mut arena, "Circle", Category::Class, Some(shape));

        arena.behavior_mut(drawable).expect("trait").traits.push(named);
        arena.behavior_mut(int).expect("class").traits.push(comparable);
        arena.behavior_mut(shape).expect("class").traits.push(drawable);
        arena.behavior_mut(circle).expect("class").traits.push(named);

        Self {
            interner,
            arena,
            globals,
            object,
            nil,
            function,
            tcallable,
            comparable,
            named,
            drawable,
            int,
            shape,
            circle,
        }
    }

    pub fn sym(&mut self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    /// Declares a method named `name` on `owner`.
    pub fn method(&mut self, owner: TypeId, name: &str, ret: Option<TypeId>) -> TypeId {
        let sym = self.sym(name);
        let methods = self.arena[owner].as_behavior().expect("behavior").methods;
        self.arena
            .insert_method(methods, sym, ret, false, false)
            .expect("method declaration")
    }

    /// All behaviors of the fixture.
    pub fn behaviors(&self) -> Vec<TypeId> {
        vec![
            self.object,
            self.nil,
            self.function,
            self.tcallable,
            self.comparable,
            self.named,
            self.drawable,
            self.int,
            self.shape,
            self.circle,
        ]
    }
}
