use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;

use crate::derive::prototype;
use crate::dynamic::{Cloneable, Dyn, Qualifier, ShimRegistry, Unique};

// -----------------------------------------------------------------------------
// Fixtures

#[prototype]
trait Animal {
    fn name(&self) -> String;
    fn legs(&self) -> u32;
    fn feed(&mut self, grams: u32);
    fn eaten(&self) -> u32;
    fn into_name(self) -> String;
}

#[prototype]
trait Named {
    fn name(&self) -> String;
}

#[prototype]
trait Swimmer {
    fn swim(&self, meters: u32) -> String;
}

#[derive(Clone, Default)]
struct Cat {
    eaten: u32,
}

impl Animal for Cat {
    fn name(&self) -> String {
        String::from("cat")
    }
    fn legs(&self) -> u32 {
        4
    }
    fn feed(&mut self, grams: u32) {
        self.eaten += grams;
    }
    fn eaten(&self) -> u32 {
        self.eaten
    }
    fn into_name(self) -> String {
        format!("cat after {}g", self.eaten)
    }
}

#[derive(Clone)]
struct Duck {
    name: String,
}

impl Animal for Duck {
    fn name(&self) -> String {
        self.name.clone()
    }
    fn legs(&self) -> u32 {
        2
    }
    fn feed(&mut self, _grams: u32) {}
    fn eaten(&self) -> u32 {
        0
    }
    fn into_name(self) -> String {
        self.name
    }
}

impl Swimmer for Duck {
    fn swim(&self, meters: u32) -> String {
        format!("{} swam {meters}m", self.name)
    }
}

fn duck() -> Duck {
    Duck {
        name: String::from("Donald"),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn prototype_describes_slots() {
    use crate::dynamic::Prototype;

    let info = <dyn Animal as Prototype>::prototype_info();
    assert_eq!(info.name(), "Animal");
    assert_eq!(info.path(), "vc_reflect::tests::dyn_objects::Animal");

    let names: alloc::vec::Vec<_> = info.slots().iter().map(|s| s.name()).collect();
    assert_eq!(names, ["name", "legs", "feed", "eaten", "into_name"]);

    let (index, feed) = info.slot("feed").unwrap();
    assert_eq!(index, 2);
    assert_eq!(feed.overloads()[0].qualifier(), Qualifier::Mut);
    assert_eq!(info.slot("into_name").unwrap().1.overloads()[0].qualifier(), Qualifier::Owned);
    assert!(info.slot("swim").is_none());
}

#[test]
fn dispatch_through_vtable() {
    let mut animal: Dyn<dyn Animal> = Dyn::new(Cat::default());
    assert_eq!(animal.name(), "cat");
    assert_eq!(animal.legs(), 4);

    animal.feed(30);
    animal.feed(12);
    assert_eq!(animal.eaten(), 42);
    assert_eq!(animal.downcast_ref::<Cat>().map(|c| c.eaten), Some(42));
    assert!(animal.downcast_ref::<Duck>().is_none());

    assert_eq!(animal.into_name(), "cat after 42g");
}

#[test]
fn clone_and_reassign() {
    let mut a: Dyn<dyn Animal, Cloneable> = Dyn::new(Cat::default());
    a.feed(5);

    let mut b = a.clone();
    b.feed(5);
    assert_eq!(a.eaten(), 5);
    assert_eq!(b.eaten(), 10);

    // the clone shares the static table
    assert!(core::ptr::eq(a.vtable().unwrap(), b.vtable().unwrap()));

    a = Dyn::new(duck());
    assert_eq!(a.name(), "Donald");
    assert_eq!(a.legs(), 2);

    b = a.clone();
    assert_eq!(b.name(), "Donald");
    assert_eq!(b.type_name(), a.type_name());

    // copy-assign leaves the target owning its own value
    a = Dyn::new(Cat { eaten: 1 });
    b = a.clone();
    b.feed(9);
    assert_eq!(a.eaten(), 1);
    assert_eq!(b.eaten(), 10);
    assert_eq!(b.downcast_ref::<Cat>().map(|c| c.eaten), Some(10));
    assert_eq!(a.downcast_ref::<Cat>().map(|c| c.eaten), Some(1));
}

#[test]
fn take_leaves_source_empty() {
    let mut source: Dyn<dyn Animal> = Dyn::new(Cat::default());
    let moved = core::mem::take(&mut source);
    assert!(source.is_empty());
    assert!(source.type_id().is_none());
    assert!(!moved.is_empty());
    assert_eq!(moved.name(), "cat");

    let mut moved = moved;
    let again = moved.take();
    assert!(moved.is_empty());
    assert_eq!(again.legs(), 4);
}

#[test]
#[should_panic(expected = "on an empty Dyn")]
fn empty_call_panics() {
    let empty: Dyn<dyn Animal> = Dyn::empty();
    empty.legs();
}

#[test]
fn into_inner_restores_value() {
    let animal: Dyn<dyn Animal> = Dyn::new(duck());
    let animal = animal.into_inner::<Cat>().err().unwrap();
    let duck = animal.into_inner::<Duck>().ok().unwrap();
    assert_eq!(duck.name, "Donald");
}

#[test]
fn convert_to_subset_prototype() {
    let registry = ShimRegistry::new();
    let animal: Dyn<dyn Animal> = Dyn::new(Cat::default());

    let named: Dyn<dyn Named> = animal.try_convert_in(&registry).unwrap();
    assert_eq!(named.name(), "cat");
    assert!(named.is_shared());
    assert_eq!(named.vtable().unwrap().slots().len(), 1);
    assert_eq!(registry.len(), 1);

    // empty converts to empty without a table
    let empty: Dyn<dyn Animal> = Dyn::empty();
    let empty: Dyn<dyn Named> = empty.try_convert_in(&registry).unwrap();
    assert!(empty.is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn shim_tables_are_shared_and_evicted() {
    let registry = ShimRegistry::new();

    let first: Dyn<dyn Named> = Dyn::<dyn Animal>::new(Cat::default())
        .try_convert_in(&registry)
        .unwrap();
    let second: Dyn<dyn Named> = Dyn::<dyn Animal>::new(Cat { eaten: 7 })
        .try_convert_in(&registry)
        .unwrap();

    let table = Arc::clone(first.shim_table().unwrap());
    assert!(Arc::ptr_eq(&table, second.shim_table().unwrap()));
    assert_eq!(registry.len(), 1);

    // another concrete type gets its own table
    let third: Dyn<dyn Named> = Dyn::<dyn Animal>::new(duck())
        .try_convert_in(&registry)
        .unwrap();
    assert!(!Arc::ptr_eq(&table, third.shim_table().unwrap()));
    assert_eq!(registry.len(), 2);

    drop(third);
    assert_eq!(registry.len(), 1);

    drop(first);
    drop(second);
    assert_eq!(registry.len(), 1);
    assert!(registry.contains::<dyn Named, Unique>(
        crate::dynamic::VTable::of::<dyn Animal, Cat, Unique>()
    ));

    drop(table);
    assert!(registry.is_empty());

    // a fresh table is synthesized after eviction
    let fresh: Dyn<dyn Named> = Dyn::<dyn Animal>::new(Cat::default())
        .try_convert_in(&registry)
        .unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(fresh.name(), "cat");
}

#[test]
fn concurrent_conversions_share_and_evict() {
    use std::thread;
    use std::vec::Vec;

    const THREADS: u32 = 8;
    const ROUNDS: u32 = 500;

    let registry = ShimRegistry::new();

    let workers: Vec<_> = (0..THREADS)
        .map(|id| {
            let registry = registry.clone();
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    let named: Dyn<dyn Named> = Dyn::<dyn Animal>::new(Cat { eaten: id + round })
                        .try_convert_in::<dyn Named, Unique>(&registry)
                        .unwrap();
                    assert_eq!(named.name(), "cat");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }
    assert!(registry.is_empty());

    // handles kept alive across threads all see one table
    let held: Vec<Dyn<dyn Named>> = (0..THREADS)
        .map(|id| {
            let registry = registry.clone();
            thread::spawn(move || {
                Dyn::<dyn Animal>::new(Cat { eaten: id })
                    .try_convert_in::<dyn Named, Unique>(&registry)
                    .unwrap()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|worker| worker.join().unwrap())
        .collect();

    let table = held[0].shim_table().unwrap();
    assert!(held.iter().all(|named| Arc::ptr_eq(table, named.shim_table().unwrap())));
    assert_eq!(registry.len(), 1);

    drop(held);
    assert!(registry.is_empty());
}

#[test]
fn cloneable_converts_to_unique() {
    let registry = ShimRegistry::new();
    let animal: Dyn<dyn Animal, Cloneable> = Dyn::new(duck());
    let copy = animal.clone();

    let named: Dyn<dyn Named, Unique> = animal.try_convert_in(&registry).unwrap();
    let named_copy: Dyn<dyn Named, Cloneable> = copy.try_convert_in(&registry).unwrap();
    assert_eq!(named.name(), "Donald");
    assert_eq!(named_copy.clone().name(), "Donald");

    // the target capability is part of the key
    assert_eq!(registry.len(), 2);
}

#[test]
fn missing_slot_returns_value() {
    let registry = ShimRegistry::new();
    let animal: Dyn<dyn Animal> = Dyn::new(duck());

    let err = animal
        .try_convert_in::<dyn Swimmer, Unique>(&registry)
        .unwrap_err();
    assert_eq!(err.slot(), "swim");
    assert_eq!(err.target(), "vc_reflect::tests::dyn_objects::Swimmer");
    assert!(format!("{err}").contains("no slot `swim`"));
    assert!(registry.is_empty());

    let animal = err.into_value();
    assert_eq!(animal.name(), "Donald");
}

#[test]
fn assign_converted_keeps_target_on_failure() {
    let mut named: Dyn<dyn Named> = Dyn::empty();
    named
        .assign_converted(Dyn::<dyn Animal>::new(Cat::default()))
        .unwrap();
    assert_eq!(named.name(), "cat");

    let mut swimmer: Dyn<dyn Swimmer> = Dyn::new(duck());
    let err = swimmer
        .assign_converted(Dyn::<dyn Animal>::new(Cat::default()))
        .unwrap_err();
    assert_eq!(err.slot(), "swim");
    assert_eq!(swimmer.swim(3), "Donald swam 3m");
}
