//! Python `complex` numbers and their place in the numeric tower.
//!
//! A [`Complex`] is an immutable pair of doubles. The slot functions below are
//! what the dispatcher calls for `complex` operands:
//!
//! - arithmetic (`+`, `-` and their reflected forms) coerces the other operand
//!   onto the complex plane, raising `OverflowError` for ints too large for a
//!   double and returning `NotImplemented` for non-numbers;
//! - equality compares both components exactly against the coerced operand;
//! - ordering is undefined: any numeric operand raises `TypeError`, anything
//!   else defers so the other type (or the final "not supported" error) decides;
//! - hashing agrees with `int` and `float` for real-only values;
//! - `repr` produces text the literal parser reads back to the same components.

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Sub},
};

use crate::{
    exception::{ExcType, RunError, RunResult},
    py_hash::{cpython_hash_float, fix_sentinel},
    slots::TypeSlots,
    types::float::{format_shortest, real_partial_cmp},
    value::{FloatCoercion, Value},
};

/// Multiplier applied to the imaginary part's hash, as in CPython's `complex_hash`.
const IMAG_HASH_MULTIPLIER: i64 = 1_000_003;

/// A point in the complex plane.
///
/// Components may be any double, including infinities and NaN carried in from
/// upstream operations. `PartialEq` is exact componentwise equality, so NaN
/// components never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

/// How a value reached the complex plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoerceStatus {
    Ok,
    /// An int beyond the double range. The coerced value is `(±inf, 0)`.
    Overflow,
    /// Not a number at all. The coerced value is `(0, 0)`.
    NotNumeric,
}

/// Result of [`Complex::coerce`]: the complex representation and a status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced {
    pub value: Complex,
    pub status: CoerceStatus,
}

impl Coerced {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == CoerceStatus::Ok
    }
}

impl Complex {
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// The complex number `re + 0j`.
    #[must_use]
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Coerces any value onto the complex plane.
    ///
    /// Complex values pass through unchanged. Real numbers become `(x, 0.0)`;
    /// `float('inf')` is a legitimate value and coerces with status `Ok`, while an
    /// int too large for a double yields `(±inf, 0.0)` with status `Overflow`.
    /// Anything else is `(0, 0)` with status `NotNumeric`.
    #[must_use]
    pub fn coerce(value: &Value) -> Coerced {
        if let Value::Complex(c) = value {
            return Coerced {
                value: *c,
                status: CoerceStatus::Ok,
            };
        }
        let (value, status) = match value.float_coerce() {
            FloatCoercion::Ok(f) => (Self::from_real(f), CoerceStatus::Ok),
            FloatCoercion::Overflow(inf) => (Self::from_real(inf), CoerceStatus::Overflow),
            FloatCoercion::NotNumeric => (Self::default(), CoerceStatus::NotNumeric),
        };
        Coerced { value, status }
    }

    /// `hash(re) + 1000003 * hash(im)` in wrapping 64-bit arithmetic.
    ///
    /// `hash(0.0) == 0`, so a real-only value hashes like the equal float or int.
    #[must_use]
    pub fn hash(self) -> i64 {
        let hash_re = cpython_hash_float(self.re);
        let hash_im = cpython_hash_float(self.im);
        fix_sentinel(hash_re.wrapping_add(IMAG_HASH_MULTIPLIER.wrapping_mul(hash_im)))
    }

    /// Python `repr()`: `1j`, `(1-1j)`, `(1.5+2e+16j)`.
    ///
    /// A zero real part of either sign gives the bare `<imag>j` form. The
    /// imaginary sign follows its sign bit, except that NaN is never signed.
    #[must_use]
    pub fn repr(self) -> String {
        let imag = format_shortest(self.im.abs(), false);
        let imag_negative = self.im.is_sign_negative() && !self.im.is_nan();
        if self.re == 0.0 {
            let sign = if imag_negative { "-" } else { "" };
            format!("{sign}{imag}j")
        } else {
            let real = format_shortest(self.re, false);
            let sign = if imag_negative { '-' } else { '+' };
            format!("({real}{sign}{imag}j)")
        }
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

/// Registers the `complex` operation table.
///
/// Only the slots below are provided; multiplication, division and the rest
/// are left unset.
pub(crate) fn init_complex_type(slots: &mut TypeSlots) {
    slots.add = Some(complex_add);
    slots.radd = Some(complex_radd);
    slots.sub = Some(complex_sub);
    slots.rsub = Some(complex_rsub);
    slots.eq = Some(complex_eq);
    slots.ne = Some(complex_ne);
    slots.set_ordering(complex_compare_not_supported);
    slots.hash = Some(complex_hash);
    slots.repr = Some(complex_repr);
}

fn receiver(value: &Value) -> RunResult<Complex> {
    match value {
        Value::Complex(c) => Ok(*c),
        _ => Err(RunError::internal("complex slot called on a non-complex receiver")),
    }
}

/// Shared body of the arithmetic slots: `fun(self, other)` on the coerced operand.
fn complex_arithmetic_op(v: &Value, w: &Value, fun: fn(Complex, Complex) -> Complex) -> RunResult<Value> {
    let lhs = receiver(v)?;
    let rhs = Complex::coerce(w);
    match rhs.status {
        CoerceStatus::Ok => Ok(Value::Complex(fun(lhs, rhs.value))),
        CoerceStatus::Overflow => Err(ExcType::overflow_int_to_float()),
        CoerceStatus::NotNumeric => Ok(Value::NotImplemented),
    }
}

pub(crate) fn complex_add(v: &Value, w: &Value) -> RunResult<Value> {
    complex_arithmetic_op(v, w, |lhs, rhs| lhs + rhs)
}

pub(crate) fn complex_radd(v: &Value, w: &Value) -> RunResult<Value> {
    complex_arithmetic_op(v, w, |lhs, rhs| rhs + lhs)
}

pub(crate) fn complex_sub(v: &Value, w: &Value) -> RunResult<Value> {
    complex_arithmetic_op(v, w, |lhs, rhs| lhs - rhs)
}

/// `other - self`: the receiver is the right-hand operand of the original `-`.
pub(crate) fn complex_rsub(v: &Value, w: &Value) -> RunResult<Value> {
    complex_arithmetic_op(v, w, |lhs, rhs| rhs - lhs)
}

/// Compares `self` against the coerced operand, or `None` to defer.
///
/// An overflowing int defers too; it cannot equal any finite complex value and
/// the int side is left to decide. Ints are compared exactly against the real
/// part, so `complex(2**53) != 2**53 + 1` just like the float comparison.
fn complex_compare(v: &Value, w: &Value) -> RunResult<Option<bool>> {
    let lhs = receiver(v)?;
    let rhs = Complex::coerce(w);
    if !rhs.is_ok() {
        return Ok(None);
    }
    if matches!(w, Value::Bool(_) | Value::Int(_) | Value::LongInt(_)) {
        let real_eq = real_partial_cmp(&Value::Float(lhs.re), w) == Some(Some(Ordering::Equal));
        return Ok(Some(lhs.im == 0.0 && real_eq));
    }
    Ok(Some(lhs == rhs.value))
}

pub(crate) fn complex_eq(v: &Value, w: &Value) -> RunResult<Value> {
    Ok(complex_compare(v, w)?.map_or(Value::NotImplemented, Value::Bool))
}

pub(crate) fn complex_ne(v: &Value, w: &Value) -> RunResult<Value> {
    Ok(complex_compare(v, w)?.map_or(Value::NotImplemented, |eq| Value::Bool(!eq)))
}

/// Shared `<`, `<=`, `>`, `>=` slot.
pub(crate) fn complex_compare_not_supported(v: &Value, w: &Value) -> RunResult<Value> {
    receiver(v)?;
    if w.py_type().is_number() {
        return Err(ExcType::complex_ordering());
    }
    Ok(Value::NotImplemented)
}

pub(crate) fn complex_hash(v: &Value) -> RunResult<i64> {
    receiver(v).map(Complex::hash)
}

pub(crate) fn complex_repr(v: &Value) -> RunResult<String> {
    receiver(v).map(Complex::repr)
}
