//! Operator dispatch over the type registry.
//!
//! Binary operations follow the Python dunder protocol:
//! 1. Call the left operand's forward slot (`__add__`).
//! 2. If it is missing or returns `NotImplemented`, and the operands have
//!    different types, call the right operand's reflected slot (`__radd__`)
//!    with the arguments swapped.
//! 3. If both defer, raise `TypeError`.
//!
//! Rich comparisons use the same two steps with the swapped comparison as the
//! reflection (`<` becomes `>`, `==` stays `==`). When both sides defer, `==`
//! and `!=` fall back to identity while ordering raises `TypeError`.

use strum::{Display, IntoStaticStr};

use crate::{
    exception::{ExcType, RunError, RunResult},
    slots::{SlotId, TypeRegistry},
    tracer::{DispatchTracer, NoopTracer},
    value::Value,
};

/// Arithmetic operators with forward and reflected slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
}

impl BinaryOp {
    #[must_use]
    pub fn forward(self) -> SlotId {
        match self {
            Self::Add => SlotId::Add,
            Self::Sub => SlotId::Sub,
        }
    }

    #[must_use]
    pub fn reflected(self) -> SlotId {
        match self {
            Self::Add => SlotId::RAdd,
            Self::Sub => SlotId::RSub,
        }
    }

    /// Operator symbol as it appears in error messages.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.into()
    }
}

/// Rich comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum CompareOp {
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Ge,
}

impl CompareOp {
    #[must_use]
    pub fn slot(self) -> SlotId {
        match self {
            Self::Eq => SlotId::Eq,
            Self::Ne => SlotId::Ne,
            Self::Lt => SlotId::Lt,
            Self::Le => SlotId::Le,
            Self::Gt => SlotId::Gt,
            Self::Ge => SlotId::Ge,
        }
    }

    /// The operator that gives the same answer with the operands swapped.
    #[must_use]
    pub fn swapped(self) -> Self {
        match self {
            Self::Eq => Self::Eq,
            Self::Ne => Self::Ne,
            Self::Lt => Self::Gt,
            Self::Le => Self::Ge,
            Self::Gt => Self::Lt,
            Self::Ge => Self::Le,
        }
    }

    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.into()
    }
}

/// Evaluates operators on [`Value`]s by looking up slots in a [`TypeRegistry`].
///
/// The tracer is a type parameter so the default [`NoopTracer`] costs nothing.
#[derive(Debug)]
pub struct Runtime<Tr: DispatchTracer = NoopTracer> {
    registry: &'static TypeRegistry,
    tracer: Tr,
}

impl Runtime<NoopTracer> {
    #[must_use]
    pub fn new(registry: &'static TypeRegistry) -> Self {
        Self::with_tracer(registry, NoopTracer)
    }

    /// Builds a runtime on the global registry.
    ///
    /// # Errors
    /// Returns an internal error if [`init_types`](crate::slots::init_types) has not run.
    pub fn from_global() -> RunResult<Self> {
        TypeRegistry::global().map(Self::new)
    }
}

impl<Tr: DispatchTracer> Runtime<Tr> {
    #[must_use]
    pub fn with_tracer(registry: &'static TypeRegistry, tracer: Tr) -> Self {
        Self { registry, tracer }
    }

    #[must_use]
    pub fn tracer(&self) -> &Tr {
        &self.tracer
    }

    pub fn tracer_mut(&mut self) -> &mut Tr {
        &mut self.tracer
    }

    #[must_use]
    pub fn into_tracer(self) -> Tr {
        self.tracer
    }

    /// Evaluates `lhs <op> rhs`.
    ///
    /// # Errors
    /// `TypeError` when neither operand supports the operation, or whatever the
    /// slot raised (for example `OverflowError` for an int too large for a float).
    pub fn binary_op(&mut self, lhs: &Value, op: BinaryOp, rhs: &Value) -> RunResult<Value> {
        let result = self.binary_op_inner(lhs, op, rhs);
        if let Err(err) = &result {
            self.tracer.on_error(op.forward(), err);
        }
        result
    }

    fn binary_op_inner(&mut self, lhs: &Value, op: BinaryOp, rhs: &Value) -> RunResult<Value> {
        if let Some(value) = self.call_binary(op.forward(), lhs, rhs)? {
            return Ok(value);
        }
        let (lhs_type, rhs_type) = (lhs.py_type(), rhs.py_type());
        // same-type operands never try the reflected slot
        if lhs_type != rhs_type {
            let reflected = op.reflected();
            self.tracer.on_reflected(reflected, rhs_type);
            if let Some(value) = self.call_binary(reflected, rhs, lhs)? {
                return Ok(value);
            }
        }
        Err(ExcType::binary_type_error(op.symbol(), lhs_type, rhs_type))
    }

    /// Evaluates `lhs <op> rhs` for a rich comparison.
    ///
    /// # Errors
    /// `TypeError` for an ordering between types that do not support it,
    /// including any ordering that involves a complex number.
    pub fn compare(&mut self, lhs: &Value, op: CompareOp, rhs: &Value) -> RunResult<bool> {
        let result = self.compare_inner(lhs, op, rhs);
        if let Err(err) = &result {
            self.tracer.on_error(op.slot(), err);
        }
        result
    }

    fn compare_inner(&mut self, lhs: &Value, op: CompareOp, rhs: &Value) -> RunResult<bool> {
        if let Some(value) = self.call_binary(op.slot(), lhs, rhs)? {
            return comparison_truth(&value);
        }
        let reflected = op.swapped().slot();
        self.tracer.on_reflected(reflected, rhs.py_type());
        if let Some(value) = self.call_binary(reflected, rhs, lhs)? {
            return comparison_truth(&value);
        }
        match op {
            CompareOp::Eq => Ok(lhs.is_identical(rhs)),
            CompareOp::Ne => Ok(!lhs.is_identical(rhs)),
            _ => Err(ExcType::compare_type_error(op.symbol(), lhs.py_type(), rhs.py_type())),
        }
    }

    /// `hash(value)`.
    ///
    /// # Errors
    /// `TypeError` if the value's type has no hash slot.
    pub fn hash(&mut self, value: &Value) -> RunResult<i64> {
        let ty = value.py_type();
        let result = match self.registry.slots(ty).hash {
            Some(slot) => slot(value),
            None => Err(ExcType::type_error_unhashable(ty)),
        };
        if let Err(err) = &result {
            self.tracer.on_error(SlotId::Hash, err);
        }
        result
    }

    /// `repr(value)`.
    ///
    /// # Errors
    /// Only fails if the registry has no repr for the value's type.
    pub fn repr(&mut self, value: &Value) -> RunResult<String> {
        let ty = value.py_type();
        let result = match self.registry.slots(ty).repr {
            Some(slot) => slot(value),
            None => Err(RunError::internal(format!("no __repr__ registered for '{ty}'"))),
        };
        if let Err(err) = &result {
            self.tracer.on_error(SlotId::Repr, err);
        }
        result
    }

    /// Calls one binary slot; `None` means the receiver's type deferred.
    fn call_binary(&mut self, slot: SlotId, receiver: &Value, other: &Value) -> RunResult<Option<Value>> {
        let ty = receiver.py_type();
        let Some(fun) = self.registry.slots(ty).binary(slot) else {
            self.tracer.on_deferral(slot, ty);
            return Ok(None);
        };
        self.tracer.on_dispatch(slot, ty, other.py_type());
        match fun(receiver, other)? {
            Value::NotImplemented => {
                self.tracer.on_deferral(slot, ty);
                Ok(None)
            }
            value => Ok(Some(value)),
        }
    }
}

/// Shorthands for the individual operators.
impl<Tr: DispatchTracer> Runtime<Tr> {
    pub fn add(&mut self, lhs: &Value, rhs: &Value) -> RunResult<Value> {
        self.binary_op(lhs, BinaryOp::Add, rhs)
    }

    pub fn sub(&mut self, lhs: &Value, rhs: &Value) -> RunResult<Value> {
        self.binary_op(lhs, BinaryOp::Sub, rhs)
    }

    pub fn eq(&mut self, lhs: &Value, rhs: &Value) -> RunResult<bool> {
        self.compare(lhs, CompareOp::Eq, rhs)
    }

    pub fn ne(&mut self, lhs: &Value, rhs: &Value) -> RunResult<bool> {
        self.compare(lhs, CompareOp::Ne, rhs)
    }

    pub fn lt(&mut self, lhs: &Value, rhs: &Value) -> RunResult<bool> {
        self.compare(lhs, CompareOp::Lt, rhs)
    }

    pub fn le(&mut self, lhs: &Value, rhs: &Value) -> RunResult<bool> {
        self.compare(lhs, CompareOp::Le, rhs)
    }

    pub fn gt(&mut self, lhs: &Value, rhs: &Value) -> RunResult<bool> {
        self.compare(lhs, CompareOp::Gt, rhs)
    }

    pub fn ge(&mut self, lhs: &Value, rhs: &Value) -> RunResult<bool> {
        self.compare(lhs, CompareOp::Ge, rhs)
    }
}

fn comparison_truth(value: &Value) -> RunResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(RunError::internal(format!(
            "comparison slot returned '{}' instead of bool",
            other.py_type()
        ))),
    }
}
