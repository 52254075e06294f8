//! `str` slots. `str` is the one non-numeric type in the table, so it exercises
//! the deferral paths of the numeric slots.

use std::fmt::Write;

use crate::{
    exception::{RunError, RunResult},
    py_hash::cpython_hash_str,
    slots::TypeSlots,
    value::Value,
};

pub(crate) fn init_str_type(slots: &mut TypeSlots) {
    slots.add = Some(str_add);
    slots.eq = Some(str_eq);
    slots.ne = Some(str_ne);
    slots.lt = Some(str_lt);
    slots.le = Some(str_le);
    slots.gt = Some(str_gt);
    slots.ge = Some(str_ge);
    slots.hash = Some(str_hash);
    slots.repr = Some(str_repr);
}

fn receiver(value: &Value) -> RunResult<&str> {
    match value {
        Value::Str(s) => Ok(s),
        _ => Err(RunError::internal("str slot called on a non-str receiver")),
    }
}

fn str_add(v: &Value, w: &Value) -> RunResult<Value> {
    let lhs = receiver(v)?;
    Ok(match w {
        Value::Str(rhs) => Value::Str(format!("{lhs}{rhs}")),
        _ => Value::NotImplemented,
    })
}

/// Compares by code point; anything other than a `str` defers.
fn str_compare(v: &Value, w: &Value, predicate: fn(&str, &str) -> bool) -> RunResult<Value> {
    let lhs = receiver(v)?;
    Ok(match w {
        Value::Str(rhs) => Value::Bool(predicate(lhs, rhs)),
        _ => Value::NotImplemented,
    })
}

fn str_eq(v: &Value, w: &Value) -> RunResult<Value> {
    str_compare(v, w, |a, b| a == b)
}

fn str_ne(v: &Value, w: &Value) -> RunResult<Value> {
    str_compare(v, w, |a, b| a != b)
}

fn str_lt(v: &Value, w: &Value) -> RunResult<Value> {
    str_compare(v, w, |a, b| a < b)
}

fn str_le(v: &Value, w: &Value) -> RunResult<Value> {
    str_compare(v, w, |a, b| a <= b)
}

fn str_gt(v: &Value, w: &Value) -> RunResult<Value> {
    str_compare(v, w, |a, b| a > b)
}

fn str_ge(v: &Value, w: &Value) -> RunResult<Value> {
    str_compare(v, w, |a, b| a >= b)
}

fn str_hash(v: &Value) -> RunResult<i64> {
    receiver(v).map(cpython_hash_str)
}

fn str_repr(v: &Value) -> RunResult<String> {
    receiver(v).map(string_repr)
}

/// Quotes a string like CPython's `repr(str)`: single quotes unless the text
/// contains a single quote and no double quote.
pub(crate) fn string_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
