//! `float` slots, shared real-number comparison and CPython float formatting.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::{
    exception::{ExcType, RunError, RunResult},
    py_hash::cpython_hash_float,
    slots::TypeSlots,
    value::{FloatCoercion, Value},
};

/// Registers the `float` operation table.
pub(crate) fn init_float_type(slots: &mut TypeSlots) {
    slots.add = Some(float_add);
    slots.radd = Some(float_add);
    slots.sub = Some(float_sub);
    slots.rsub = Some(float_rsub);
    slots.eq = Some(real_eq);
    slots.ne = Some(real_ne);
    slots.lt = Some(real_lt);
    slots.le = Some(real_le);
    slots.gt = Some(real_gt);
    slots.ge = Some(real_ge);
    slots.hash = Some(float_hash);
    slots.repr = Some(float_repr_slot);
}

fn receiver(value: &Value) -> RunResult<f64> {
    match value {
        Value::Float(f) => Ok(*f),
        _ => Err(RunError::internal("float slot called on a non-float receiver")),
    }
}

/// Coerces a real operand for float arithmetic.
///
/// Returns `Ok(None)` when `other` is not a real number, so the caller defers.
pub(crate) fn real_operand(other: &Value) -> RunResult<Option<f64>> {
    match other.float_coerce() {
        FloatCoercion::Ok(f) => Ok(Some(f)),
        FloatCoercion::Overflow(_) => Err(ExcType::overflow_int_to_float()),
        FloatCoercion::NotNumeric => Ok(None),
    }
}

fn float_op(v: &Value, w: &Value, fun: fn(f64, f64) -> f64) -> RunResult<Value> {
    let lhs = receiver(v)?;
    Ok(match real_operand(w)? {
        Some(rhs) => Value::Float(fun(lhs, rhs)),
        None => Value::NotImplemented,
    })
}

fn float_add(v: &Value, w: &Value) -> RunResult<Value> {
    float_op(v, w, |lhs, rhs| lhs + rhs)
}

fn float_sub(v: &Value, w: &Value) -> RunResult<Value> {
    float_op(v, w, |lhs, rhs| lhs - rhs)
}

fn float_rsub(v: &Value, w: &Value) -> RunResult<Value> {
    float_op(v, w, |lhs, rhs| rhs - lhs)
}

pub(crate) fn real_eq(v: &Value, w: &Value) -> RunResult<Value> {
    real_compare(v, w, Ordering::is_eq)
}

/// `!=` is true for unordered pairs, so it is not expressible as a predicate.
pub(crate) fn real_ne(v: &Value, w: &Value) -> RunResult<Value> {
    Ok(match real_partial_cmp(v, w) {
        Some(ordering) => Value::Bool(ordering != Some(Ordering::Equal)),
        None => Value::NotImplemented,
    })
}

fn float_hash(v: &Value) -> RunResult<i64> {
    receiver(v).map(cpython_hash_float)
}

fn float_repr_slot(v: &Value) -> RunResult<String> {
    receiver(v).map(float_repr)
}

pub(crate) fn real_lt(v: &Value, w: &Value) -> RunResult<Value> {
    real_compare(v, w, Ordering::is_lt)
}

pub(crate) fn real_le(v: &Value, w: &Value) -> RunResult<Value> {
    real_compare(v, w, Ordering::is_le)
}

pub(crate) fn real_gt(v: &Value, w: &Value) -> RunResult<Value> {
    real_compare(v, w, Ordering::is_gt)
}

pub(crate) fn real_ge(v: &Value, w: &Value) -> RunResult<Value> {
    real_compare(v, w, Ordering::is_ge)
}

/// Evaluates a comparison between two real numbers, deferring for anything else.
///
/// NaN is unordered, so every predicate is false for it.
fn real_compare(v: &Value, w: &Value, predicate: fn(Ordering) -> bool) -> RunResult<Value> {
    Ok(match real_partial_cmp(v, w) {
        Some(ordering) => Value::Bool(ordering.is_some_and(predicate)),
        None => Value::NotImplemented,
    })
}

/// Compares two real numbers exactly.
///
/// The outer `None` means one operand is not a real number; the inner `None`
/// means the pair is unordered (NaN). Int/int comparisons go through `BigInt`;
/// int/float comparisons never round the int, so `2**53 + 1 != 2.0**53`.
pub(crate) fn real_partial_cmp(lhs: &Value, rhs: &Value) -> Option<Option<Ordering>> {
    match (lhs, rhs) {
        (Value::Float(a), Value::Float(b)) => Some(a.partial_cmp(b)),
        (Value::Float(a), other) => other.as_bigint().map(|b| cmp_int_float(&b, *a).map(Ordering::reverse)),
        (other, Value::Float(b)) => other.as_bigint().map(|a| cmp_int_float(&a, *b)),
        _ => {
            let a = lhs.as_bigint()?;
            let b = rhs.as_bigint()?;
            Some(Some(a.cmp(&b)))
        }
    }
}

/// Orders an integer against a float without converting the integer to a double.
fn cmp_int_float(int: &BigInt, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float.is_infinite() {
        return Some(if float > 0.0 { Ordering::Less } else { Ordering::Greater });
    }
    let floor = float.floor();
    let floor_int = BigInt::from_f64(floor)?;
    Some(match int.cmp(&floor_int) {
        Ordering::Equal if float > floor => Ordering::Less,
        ordering => ordering,
    })
}

/// Formats a float the way CPython's `repr(float)` does (`1.0`, `1e+16`, `inf`).
#[must_use]
pub(crate) fn float_repr(value: f64) -> String {
    format_shortest(value, true)
}

/// Shortest round-tripping decimal text for a double.
///
/// Positional notation is used while the decimal exponent is in `[-4, 16)`,
/// scientific notation (`d.ddde±XX`) otherwise. With `point_zero` set, integral
/// positional values keep a trailing `.0` as `float` reprs do; complex
/// components drop it.
pub(crate) fn format_shortest(value: f64, point_zero: bool) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_owned();
    }

    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }
    if value == 0.0 {
        out.push('0');
        if point_zero {
            out.push_str(".0");
        }
        return out;
    }

    let (digits, point) = shortest_digits(value.abs());
    let exponent = point - 1;
    if (-4..16).contains(&exponent) {
        if point <= 0 {
            out.push_str("0.");
            out.extend(std::iter::repeat_n('0', point.unsigned_abs() as usize));
            out.push_str(&digits);
        } else {
            let point = point as usize;
            if point >= digits.len() {
                out.push_str(&digits);
                out.extend(std::iter::repeat_n('0', point - digits.len()));
                if point_zero {
                    out.push_str(".0");
                }
            } else {
                out.push_str(&digits[..point]);
                out.push('.');
                out.push_str(&digits[point..]);
            }
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        out.push_str(&format!("e{sign}{:02}", exponent.unsigned_abs()));
    }
    out
}

/// Splits a finite, positive double into its shortest significant digits and
/// the position of the decimal point relative to the first digit.
///
/// `1234.5` becomes `("12345", 4)` and `0.001` becomes `("1", -2)`.
fn shortest_digits(value: f64) -> (String, i32) {
    let mut buffer = ryu::Buffer::new();
    let text = buffer.format_finite(value);

    let (mantissa, exponent) = match text.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (text, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let mut point = int_part.len() as i32 + exponent;

    let leading = digits.len() - digits.trim_start_matches('0').len();
    digits.replace_range(..leading, "");
    point -= leading as i32;
    digits.truncate(digits.trim_end_matches('0').len());

    (digits, point)
}
