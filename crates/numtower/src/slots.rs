//! Per-type operation tables and the process-wide type registry.
//!
//! Each builtin type advertises the operations it supports by filling a
//! [`TypeSlots`] table at startup. Unset slots mean "this type has no
//! implementation", which the dispatcher treats exactly like a slot that
//! returned `NotImplemented`.
//!
//! The registry is built once by [`init_types`] and is read-only afterwards.
//! Hosts call it explicitly during startup, before any dispatch happens.

use std::sync::OnceLock;

use ahash::AHashMap;
use strum::{Display, IntoEnumIterator, IntoStaticStr};

use crate::{
    exception::{RunError, RunResult},
    types::{
        Type, init_complex_type, init_float_type, init_int_type, init_none_type, init_not_implemented_type,
        init_str_type,
    },
    value::Value,
};

/// Binary slot: `(self, other)`. `self` is always an instance of the type
/// owning the table; for reflected slots `other` is the original left operand.
pub type BinarySlot = fn(&Value, &Value) -> RunResult<Value>;
/// `__hash__` slot.
pub type HashSlot = fn(&Value) -> RunResult<i64>;
/// `__repr__` slot.
pub type ReprSlot = fn(&Value) -> RunResult<String>;

/// Names of the slots a type can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum SlotId {
    #[strum(serialize = "__add__")]
    Add,
    #[strum(serialize = "__radd__")]
    RAdd,
    #[strum(serialize = "__sub__")]
    Sub,
    #[strum(serialize = "__rsub__")]
    RSub,
    #[strum(serialize = "__eq__")]
    Eq,
    #[strum(serialize = "__ne__")]
    Ne,
    #[strum(serialize = "__lt__")]
    Lt,
    #[strum(serialize = "__le__")]
    Le,
    #[strum(serialize = "__gt__")]
    Gt,
    #[strum(serialize = "__ge__")]
    Ge,
    #[strum(serialize = "__hash__")]
    Hash,
    #[strum(serialize = "__repr__")]
    Repr,
}

/// Operation table of one type.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeSlots {
    pub add: Option<BinarySlot>,
    pub radd: Option<BinarySlot>,
    pub sub: Option<BinarySlot>,
    pub rsub: Option<BinarySlot>,
    pub eq: Option<BinarySlot>,
    pub ne: Option<BinarySlot>,
    pub lt: Option<BinarySlot>,
    pub le: Option<BinarySlot>,
    pub gt: Option<BinarySlot>,
    pub ge: Option<BinarySlot>,
    pub hash: Option<HashSlot>,
    pub repr: Option<ReprSlot>,
}

impl TypeSlots {
    /// Looks up a binary slot by name. `Hash` and `Repr` are never binary.
    #[must_use]
    pub fn binary(&self, slot: SlotId) -> Option<BinarySlot> {
        match slot {
            SlotId::Add => self.add,
            SlotId::RAdd => self.radd,
            SlotId::Sub => self.sub,
            SlotId::RSub => self.rsub,
            SlotId::Eq => self.eq,
            SlotId::Ne => self.ne,
            SlotId::Lt => self.lt,
            SlotId::Le => self.le,
            SlotId::Gt => self.gt,
            SlotId::Ge => self.ge,
            SlotId::Hash | SlotId::Repr => None,
        }
    }

    /// Sets the four ordering slots to the same function.
    pub(crate) fn set_ordering(&mut self, slot: BinarySlot) {
        self.lt = Some(slot);
        self.le = Some(slot);
        self.gt = Some(slot);
        self.ge = Some(slot);
    }
}

static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Builds the global registry on first call and returns it.
///
/// Later calls return the same table without re-registering anything.
pub fn init_types() -> &'static TypeRegistry {
    REGISTRY.get_or_init(TypeRegistry::build)
}

/// Maps every builtin [`Type`] to its [`TypeSlots`].
#[derive(Debug)]
pub struct TypeRegistry {
    tables: AHashMap<Type, TypeSlots>,
}

impl TypeRegistry {
    /// Returns the global registry, or `None` if [`init_types`] has not run yet.
    #[must_use]
    pub fn get() -> Option<&'static Self> {
        REGISTRY.get()
    }

    /// Like [`TypeRegistry::get`], but reports a missing startup step as an internal error.
    pub fn global() -> RunResult<&'static Self> {
        Self::get().ok_or_else(|| RunError::internal("type registry used before init_types()"))
    }

    /// Returns the operation table for `ty`.
    #[must_use]
    pub fn slots(&self, ty: Type) -> TypeSlots {
        self.tables.get(&ty).copied().unwrap_or_default()
    }

    fn build() -> Self {
        let mut tables: AHashMap<Type, TypeSlots> = Type::iter().map(|ty| (ty, TypeSlots::default())).collect();
        let mut register = |ty: Type, init: fn(&mut TypeSlots)| {
            init(tables.entry(ty).or_default());
        };
        // bool inherits every int slot
        register(Type::Int, init_int_type);
        register(Type::Bool, init_int_type);
        register(Type::Float, init_float_type);
        register(Type::Complex, init_complex_type);
        register(Type::Str, init_str_type);
        register(Type::NoneType, init_none_type);
        register(Type::NotImplementedType, init_not_implemented_type);
        Self { tables }
    }
}
