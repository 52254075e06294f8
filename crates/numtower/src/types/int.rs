//! `int` and `bool` slots.
//!
//! Small ints stay on the checked `i64` fast path and promote to [`LongInt`]
//! when a result overflows. Mixing with `float` converts the int operand, which
//! raises `OverflowError` when the int has no double representation.

use std::ops::{Add, Sub};

use crate::{
    exception::{RunError, RunResult},
    py_hash::cpython_hash_int,
    slots::TypeSlots,
    types::{
        LongInt,
        float::{real_eq, real_ge, real_gt, real_le, real_lt, real_ne, real_operand},
    },
    value::Value,
};

/// Registers the `int` operation table. `bool` shares it.
pub(crate) fn init_int_type(slots: &mut TypeSlots) {
    slots.add = Some(int_add);
    slots.radd = Some(int_add);
    slots.sub = Some(int_sub);
    slots.rsub = Some(int_rsub);
    slots.eq = Some(real_eq);
    slots.ne = Some(real_ne);
    slots.lt = Some(real_lt);
    slots.le = Some(real_le);
    slots.gt = Some(real_gt);
    slots.ge = Some(real_ge);
    slots.hash = Some(int_hash);
    slots.repr = Some(int_repr);
}

/// Arithmetic shared by the int slots; `small` is the checked i64 form of `big`.
struct IntOp {
    small: fn(i64, i64) -> Option<i64>,
    big: fn(LongInt, LongInt) -> LongInt,
    float: fn(f64, f64) -> f64,
}

const ADD: IntOp = IntOp {
    small: i64::checked_add,
    big: <LongInt as Add>::add,
    float: <f64 as Add>::add,
};

const SUB: IntOp = IntOp {
    small: i64::checked_sub,
    big: <LongInt as Sub>::sub,
    float: <f64 as Sub>::sub,
};

/// Applies `op` to `(lhs, rhs)` where at least one side is `self`.
fn int_op(lhs: &Value, rhs: &Value, op: &IntOp) -> RunResult<Value> {
    if let (Some(a), Some(b)) = (small_int(lhs), small_int(rhs))
        && let Some(result) = (op.small)(a, b)
    {
        return Ok(Value::Int(result));
    }
    if let (Some(a), Some(b)) = (lhs.as_bigint(), rhs.as_bigint()) {
        return Ok((op.big)(LongInt::new(a), LongInt::new(b)).into_value());
    }
    if matches!(lhs, Value::Float(_)) || matches!(rhs, Value::Float(_)) {
        let (Some(a), Some(b)) = (real_operand(lhs)?, real_operand(rhs)?) else {
            return Ok(Value::NotImplemented);
        };
        return Ok(Value::Float((op.float)(a, b)));
    }
    Ok(Value::NotImplemented)
}

fn small_int(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Int(i) => Some(*i),
        _ => None,
    }
}

fn check_receiver(value: &Value) -> RunResult<()> {
    match value {
        Value::Bool(_) | Value::Int(_) | Value::LongInt(_) => Ok(()),
        _ => Err(RunError::internal("int slot called on a non-int receiver")),
    }
}

fn int_add(v: &Value, w: &Value) -> RunResult<Value> {
    check_receiver(v)?;
    int_op(v, w, &ADD)
}

fn int_sub(v: &Value, w: &Value) -> RunResult<Value> {
    check_receiver(v)?;
    int_op(v, w, &SUB)
}

fn int_rsub(v: &Value, w: &Value) -> RunResult<Value> {
    check_receiver(v)?;
    int_op(w, v, &SUB)
}

fn int_hash(v: &Value) -> RunResult<i64> {
    match v {
        Value::Bool(b) => Ok(cpython_hash_int(i64::from(*b))),
        Value::Int(i) => Ok(cpython_hash_int(*i)),
        Value::LongInt(li) => Ok(li.hash()),
        _ => Err(RunError::internal("int slot called on a non-int receiver")),
    }
}

fn int_repr(v: &Value) -> RunResult<String> {
    match v {
        Value::Bool(true) => Ok("True".to_owned()),
        Value::Bool(false) => Ok("False".to_owned()),
        Value::Int(i) => Ok(i.to_string()),
        Value::LongInt(li) => Ok(li.to_string()),
        _ => Err(RunError::internal("int slot called on a non-int receiver")),
    }
}
