use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;

use crate::derive::{Reflected, reflect_methods};
use crate::info::{Attribute, Category, Reflected, TypePath};
use crate::invoke::{InvokeError, ObjectBuilder, Receiver, args};
use crate::query::MemberQuery;

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Debug)]
struct Hidden;

impl Attribute for Hidden {
    const TARGETS: Category = Category::VARIABLE.union(Category::FUNCTION);
}

#[derive(Debug)]
struct Serializable;

impl Attribute for Serializable {
    const TARGETS: Category = Category::TYPE;
}

#[derive(Reflected, Default, Clone, Debug, PartialEq)]
#[reflect(methods, @Serializable)]
struct Animal {
    legs: u32,
    #[reflect(@Hidden)]
    secret: u8,
}

#[reflect_methods]
impl Animal {
    #[reflect(constructor)]
    fn with_legs(legs: u32) -> Self {
        Self { legs, secret: 0 }
    }

    fn leg_count(&self) -> u32 {
        self.legs
    }

    fn speak(&self) -> String {
        String::from("...")
    }

    #[reflect(name = "speak")]
    fn speak_times(&self, times: u32) -> String {
        "...".repeat(times as usize)
    }

    fn grow(&mut self, by: u32) {
        self.legs += by;
    }

    fn into_legs(self) -> u32 {
        self.legs
    }

    #[reflect(instantiate(u64), instantiate(f64))]
    fn legs_as<T: From<u32>>(&self) -> T {
        T::from(self.legs)
    }

    #[reflect(@Hidden)]
    fn kind() -> String {
        String::from("animal")
    }

    #[reflect(skip)]
    #[allow(dead_code, reason = "not reflected")]
    fn legs_ref(&self) -> &u32 {
        &self.legs
    }
}

#[derive(Reflected, Default)]
#[reflect(methods)]
struct Dog {
    #[reflect(base)]
    animal: Animal,
    name: String,
}

#[reflect_methods]
impl Dog {
    fn bark(&self) -> String {
        format!("{} says woof", self.name)
    }
}

#[derive(Reflected)]
#[reflect(type_path = "zoo::Cage")]
#[allow(dead_code, reason = "only described")]
struct Cage<T> {
    occupant: T,
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn names_round_trip() {
    let info = Animal::type_info();
    assert_eq!(info.type_path(), "vc_reflect::tests::metadata::Animal");
    assert_eq!(info.type_name(), "Animal");
    assert_eq!(Animal::type_path(), info.type_path());
    assert!(info.is::<Animal>());

    assert_eq!(Cage::<u32>::type_path(), "zoo::Cage<u32>");
    assert_eq!(Cage::<u32>::type_name(), "Cage<u32>");
    assert_eq!(Cage::<u32>::type_info().category(), Category::TYPE_TEMPLATE);
    assert_eq!(Cage::<u32>::type_info().generics().len(), 1);
    assert!(!core::ptr::eq(
        Cage::<u32>::type_info(),
        Cage::<u8>::type_info()
    ));
}

#[test]
fn members_keep_declaration_order() {
    let names: Vec<_> = Animal::type_info()
        .members()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(
        names,
        ["legs", "secret", "leg_count", "speak", "grow", "into_legs", "legs_as", "kind"]
    );
}

#[test]
fn categories_partition_members() {
    let members = Animal::type_info().members();
    let variables = members.filter_by_category(Category::VARIABLE);
    let functions = members.filter_by_category(Category::FUNCTION);
    assert_eq!(variables.len(), 2);
    assert_eq!(functions.len(), 6);
    assert_eq!(variables.len() + functions.len(), members.len());
    assert!(members.filter_by_category(Category::TYPE).is_empty());
}

#[test]
fn find_if_returns_first_match() {
    let members = Animal::type_info().members();
    let first = members
        .find_if(|m| m.category() == Category::FUNCTION)
        .unwrap();
    assert_eq!(first.name(), "leg_count");
    assert!(members.find_if(|m| m.name() == "wings").is_none());
}

#[test]
fn attributes_are_attached() {
    let info = Animal::type_info();
    assert!(info.attributes().contains::<Serializable>());
    assert!(!info.attributes().contains::<Hidden>());

    let hidden: Vec<_> = info
        .members()
        .filter_by_attribute::<Hidden>()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(hidden, ["secret", "kind"]);
}

#[test]
fn overloads_resolve_by_arguments() {
    let info = Animal::type_info();
    let animal = Animal::with_legs(4);

    let out = info
        .invoke("speak", Receiver::Ref(&animal), None, args![])
        .unwrap();
    assert_eq!(out.downcast::<String>().unwrap(), "...");

    let out = info
        .invoke("speak", Receiver::Ref(&animal), None, args![2_u32])
        .unwrap();
    assert_eq!(out.downcast::<String>().unwrap(), "......");

    let err = info
        .invoke("speak", Receiver::Ref(&animal), None, args![2_i32])
        .unwrap_err();
    assert!(matches!(err, InvokeError::NoMatchingOverload(_)));
}

#[test]
fn receivers_are_ranked() {
    let info = Animal::type_info();
    let mut animal = Animal::with_legs(4);

    // `&mut` can lend `&`
    let out = info
        .invoke("leg_count", Receiver::Mut(&mut animal), None, args![])
        .unwrap();
    assert_eq!(out.downcast::<u32>().unwrap(), 4);

    info.invoke("grow", Receiver::Mut(&mut animal), None, args![2_u32])
        .unwrap();
    assert_eq!(animal.legs, 6);

    let err = info
        .invoke("grow", Receiver::Ref(&animal), None, args![2_u32])
        .unwrap_err();
    assert!(matches!(err, InvokeError::NoMatchingOverload(_)));

    let out = info
        .invoke("into_legs", Receiver::owned(animal.clone()), None, args![])
        .unwrap();
    assert_eq!(out.downcast::<u32>().unwrap(), 6);

    // static functions accept any receiver
    let out = info
        .invoke("kind", Receiver::Ref(&animal), None, args![])
        .unwrap();
    assert_eq!(out.downcast::<String>().unwrap(), "animal");
}

#[test]
fn templates_need_type_arguments() {
    let info = Animal::type_info();
    let animal = Animal::with_legs(3);

    let err = info
        .invoke("legs_as", Receiver::Ref(&animal), None, args![])
        .unwrap_err();
    assert_eq!(err, InvokeError::Ambiguous(2));

    let out = info
        .invoke(
            "legs_as",
            Receiver::Ref(&animal),
            Some(&[TypeId::of::<f64>()]),
            args![],
        )
        .unwrap();
    assert_eq!(out.downcast::<f64>().unwrap(), 3.0);

    let err = info
        .invoke(
            "legs_as",
            Receiver::Ref(&animal),
            Some(&[TypeId::of::<u8>()]),
            args![],
        )
        .unwrap_err();
    assert!(matches!(err, InvokeError::NoMatchingOverload(_)));
}

#[test]
fn constructors_build_values() {
    let info = Animal::type_info();
    let animal: Animal = info.construct_as(args![8_u32]).unwrap();
    assert_eq!(animal, Animal::with_legs(8));

    assert_eq!(
        Dog::type_info().construct(None, args![]).unwrap_err(),
        InvokeError::NoConstructor(Dog::type_path()),
    );
}

#[test]
fn base_members_are_inherited() {
    let info = Dog::type_info();
    assert!(info.is_derived_from(TypeId::of::<Animal>()));
    assert!(!Animal::type_info().is_derived_from(TypeId::of::<Dog>()));

    // bases first, then own members
    let names: Vec<_> = info.all_members().iter().map(|m| m.name()).collect();
    assert_eq!(names.len(), Animal::type_info().members().len() + 2);
    assert_eq!(names[0], "legs");
    assert_eq!(names[names.len() - 2..], ["name", "bark"]);

    let mut dog = Dog {
        animal: Animal::with_legs(4),
        name: String::from("Rex"),
    };
    let out = info
        .invoke("leg_count", Receiver::Ref(&dog), None, args![])
        .unwrap();
    assert_eq!(out.downcast::<u32>().unwrap(), 4);

    info.invoke("grow", Receiver::Mut(&mut dog), None, args![1_u32])
        .unwrap();
    assert_eq!(dog.animal.legs, 5);

    let out = info
        .invoke("bark", Receiver::Ref(&dog), None, args![])
        .unwrap();
    assert_eq!(out.downcast::<String>().unwrap(), "Rex says woof");
}

#[test]
fn object_builder_sets_inherited_variables() {
    let dog = ObjectBuilder::<Dog>::default()
        .set("name", String::from("Fido"))
        .unwrap()
        .set("legs", 3_u32)
        .unwrap()
        .build();
    assert_eq!(dog.name, "Fido");
    assert_eq!(dog.animal.legs, 3);

    let err = ObjectBuilder::new(dog).set("legs", 3_u8).err().unwrap();
    assert!(matches!(err, InvokeError::ArgumentType { .. }));
}
