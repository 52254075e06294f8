use numtower::{SlotId, Type, TypeRegistry, init_types};
use strum::IntoEnumIterator;

#[test]
fn init_is_idempotent() {
    let first = init_types();
    let second = init_types();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, TypeRegistry::global().unwrap()));
}

#[test]
fn complex_fills_its_slots() {
    let slots = init_types().slots(Type::Complex);
    for slot in [
        SlotId::Add,
        SlotId::RAdd,
        SlotId::Sub,
        SlotId::RSub,
        SlotId::Eq,
        SlotId::Ne,
        SlotId::Lt,
        SlotId::Le,
        SlotId::Gt,
        SlotId::Ge,
    ] {
        assert!(slots.binary(slot).is_some(), "complex is missing {slot}");
    }
    assert!(slots.hash.is_some());
    assert!(slots.repr.is_some());
}

#[test]
fn hash_and_repr_are_not_binary_slots() {
    let slots = init_types().slots(Type::Complex);
    assert!(slots.binary(SlotId::Hash).is_none());
    assert!(slots.binary(SlotId::Repr).is_none());
}

#[test]
fn every_type_has_a_repr() {
    let registry = init_types();
    for ty in Type::iter() {
        assert!(registry.slots(ty).repr.is_some(), "{ty} has no repr");
    }
}

#[test]
fn bool_shares_the_int_table() {
    let registry = init_types();
    let int = registry.slots(Type::Int);
    let bool_ = registry.slots(Type::Bool);
    assert_eq!(int.radd.is_some(), bool_.radd.is_some());
    assert_eq!(int.rsub.is_some(), bool_.rsub.is_some());
    assert!(bool_.hash.is_some());
}

#[test]
fn partial_tables() {
    let registry = init_types();
    assert!(registry.slots(Type::Str).radd.is_none());
    assert!(registry.slots(Type::Str).sub.is_none());
    assert!(registry.slots(Type::NoneType).eq.is_none());
    assert!(registry.slots(Type::NotImplementedType).hash.is_none());
}

#[test]
fn slot_names_are_dunders() {
    assert_eq!(SlotId::RSub.to_string(), "__rsub__");
    assert_eq!(SlotId::Ge.to_string(), "__ge__");
}
