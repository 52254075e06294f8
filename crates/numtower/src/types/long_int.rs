//! LongInt wrapper for arbitrary precision integer support.
//!
//! Python has one `int` type; the runtime stores values that fit in `i64` as
//! `Value::Int` and promotes to `LongInt` on overflow. `LongInt` centralizes the
//! BigInt-related logic the numeric tower needs: hashing, demotion and
//! overflow-aware conversion to `f64`.

use std::{
    fmt::{self, Display},
    ops::{Add, Sub},
};

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::{
    py_hash::{MODULUS, cpython_hash_int, fix_sentinel},
    value::Value,
};

/// Wrapper around `num_bigint::BigInt` for arbitrary precision integers.
///
/// Named `LongInt` to avoid confusion with the external `BigInt` type from `num_bigint`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct LongInt(pub BigInt);

impl LongInt {
    /// Creates a new `LongInt` from a `BigInt`.
    #[must_use]
    pub fn new(bi: BigInt) -> Self {
        Self(bi)
    }

    /// Converts to a `Value`, demoting to `Value::Int` if it fits in an i64.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self.0.to_i64() {
            Some(i) => Value::Int(i),
            None => Value::LongInt(self),
        }
    }

    /// Computes a CPython-compatible hash using the Mersenne-prime modular algorithm.
    ///
    /// Values that fit in i64 delegate to [`cpython_hash_int`] so that
    /// `hash(5) == hash(5.0)`. Larger values reduce `n % (2^61 - 1)` with the
    /// sign of `n`, as CPython's `long_hash` does.
    #[must_use]
    pub fn hash(&self) -> i64 {
        if let Some(i) = self.0.to_i64() {
            return cpython_hash_int(i);
        }
        let remainder = &self.0 % BigInt::from(MODULUS);
        fix_sentinel(remainder.to_i64().unwrap_or(0))
    }

    /// Returns a reference to the inner `BigInt`.
    #[must_use]
    pub fn inner(&self) -> &BigInt {
        &self.0
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Converts to the nearest `f64`.
    ///
    /// Returns `None` when the magnitude is too large for a double. `num_bigint`
    /// reports such values as `Some(inf)`, which would be indistinguishable from a
    /// legitimate infinity, so they are filtered out here.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64().filter(|f| f.is_finite())
    }
}

impl From<BigInt> for LongInt {
    fn from(bi: BigInt) -> Self {
        Self(bi)
    }
}

impl From<i64> for LongInt {
    fn from(i: i64) -> Self {
        Self(BigInt::from(i))
    }
}

impl Add for LongInt {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for LongInt {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Display for LongInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
