//! Type table and type relation benchmarks.
//!
//! - Declaring types into a table (insert with growth)
//! - Looking names up in a populated table
//! - Subtype queries down a deep superclass chain
//! - Method lookup through traits and superclasses

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sable_mem::{StringInterner, Symbol};
use sable_types::{Category, TypeArena, TypeId};

fn bench_table_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_insert");

    for size in [10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut interner = StringInterner::new();
            let names: Vec<Symbol> = (0..size).map(|i| interner.intern(&format!("T{i}"))).collect();

            b.iter(|| {
                let mut arena = TypeArena::new();
                let table = arena.new_table(0);
                for &name in &names {
                    black_box(arena.insert_field(table, name, None, false, false).ok());
                }
            });
        });
    }

    group.finish();
}

fn bench_table_get(c: &mut Criterion) {
    let mut interner = StringInterner::new();
    let mut arena = TypeArena::new();
    let table = arena.new_table(0);
    let names: Vec<Symbol> = (0..1_000).map(|i| interner.intern(&format!("T{i}"))).collect();
    for &name in &names {
        arena.insert_field(table, name, None, false, false).ok();
    }

    c.bench_function("table_get_1000", |b| {
        b.iter(|| {
            for &name in &names {
                black_box(arena[table].get(name));
            }
        });
    });
}

/// Builds `Object <- C1 <- ... <- C{depth}`, each class composing one trait.
fn chain(depth: usize) -> (StringInterner, TypeArena, Vec<TypeId>) {
    let mut interner = StringInterner::new();
    let mut arena = TypeArena::new();
    let globals = arena.new_table(0);

    let object = interner.intern("Object");
    let root = arena
        .insert_behavior(globals, Category::Class, object, object, None)
        .ok();
    let mut classes: Vec<TypeId> = root.into_iter().collect();

    for i in 0..depth {
        let trait_name = interner.intern(&format!("T{i}"));
        let class_name = interner.intern(&format!("C{i}"));
        let Ok(t) =
            arena.insert_behavior(globals, Category::Trait, trait_name, trait_name, None)
        else {
            break;
        };
        let superclass = classes.last().copied();
        let Ok(class) =
            arena.insert_behavior(globals, Category::Class, class_name, class_name, superclass)
        else {
            break;
        };
        if let Ok(behavior) = arena.behavior_mut(class) {
            behavior.traits.push(t);
        }
        classes.push(class);
    }

    (interner, arena, classes)
}

fn bench_subtype_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("subtype_chain");

    for depth in [4, 16, 64] {
        let (_interner, arena, classes) = chain(depth);
        let (Some(&leaf), Some(&root)) = (classes.last(), classes.get(1)) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(arena.is_subtype(Some(leaf), Some(root))));
        });
    }

    group.finish();
}

fn bench_method_lookup(c: &mut Criterion) {
    let (mut interner, mut arena, classes) = chain(32);
    let name = interner.intern("describe");
    if let Some(&base) = classes.get(1) {
        if let Some(methods) = arena[base].as_behavior().map(|b| b.methods) {
            arena.insert_method(methods, name, None, false, false).ok();
        }
    }
    let leaf = classes.last().copied();

    c.bench_function("method_lookup_depth_32", |b| {
        b.iter(|| black_box(arena.method_lookup(leaf, name)));
    });
}

criterion_group!(
    benches,
    bench_table_insert,
    bench_table_get,
    bench_subtype_chain,
    bench_method_lookup
);
criterion_main!(benches);
