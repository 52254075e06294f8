use num_bigint::BigInt;

use crate::types::{Complex, LongInt, Type};

/// Runtime value handed to the numeric slots: an opaque object handle.
///
/// Every value is stored inline. `Complex` is `Copy` and immutable, so cloning a
/// value never shares mutable state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Value {
    None,
    /// Python's `NotImplemented` singleton.
    ///
    /// Returned by binary slots (`__add__`, `__eq__`, etc.) to signal that the
    /// operation is not supported for the given operand types. The dispatcher
    /// then tries the reflected operation on the other operand.
    NotImplemented,
    Bool(bool),
    Int(i64),
    /// An `int` outside the i64 range. Always normalized through
    /// [`LongInt::into_value`], so it never holds an i64-sized value.
    LongInt(LongInt),
    Float(f64),
    Complex(Complex),
    Str(String),
}

/// Outcome of asking a value for its `float` representation.
///
/// Overflow and "not a number" are distinct so callers can raise
/// `OverflowError` for the former and defer for the latter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatCoercion {
    /// The value converted; this includes legitimate `float('inf')`.
    Ok(f64),
    /// An integer too large for a double; carries `inf` with the integer's sign.
    Overflow(f64),
    /// The value is not a real number.
    NotNumeric,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Complex> for Value {
    fn from(v: Complex) -> Self {
        Self::Complex(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        LongInt::new(v).into_value()
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl Value {
    #[must_use]
    pub fn py_type(&self) -> Type {
        match self {
            Self::None => Type::NoneType,
            Self::NotImplemented => Type::NotImplementedType,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) | Self::LongInt(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Complex(_) => Type::Complex,
            Self::Str(_) => Type::Str,
        }
    }

    /// `isinstance(self, ty)` for builtin types.
    #[must_use]
    pub fn is_instance(&self, ty: Type) -> bool {
        self.py_type().is_instance_of(ty)
    }

    /// Python's `is` for the values that have identity without a heap: the
    /// `None` and `NotImplemented` singletons.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::None, Self::None) | (Self::NotImplemented, Self::NotImplemented)
        )
    }

    /// Returns the `float` value of a real number.
    ///
    /// `bool` and `int` convert with round-to-nearest; a `LongInt` beyond the
    /// double range reports [`FloatCoercion::Overflow`]. Complex numbers are not
    /// real, so they are `NotNumeric` here.
    #[must_use]
    pub fn float_coerce(&self) -> FloatCoercion {
        match self {
            Self::Bool(b) => FloatCoercion::Ok(f64::from(u8::from(*b))),
            Self::Int(i) => FloatCoercion::Ok(*i as f64),
            Self::Float(f) => FloatCoercion::Ok(*f),
            Self::LongInt(li) => match li.to_f64() {
                Some(f) => FloatCoercion::Ok(f),
                None if li.is_negative() => FloatCoercion::Overflow(f64::NEG_INFINITY),
                None => FloatCoercion::Overflow(f64::INFINITY),
            },
            Self::None | Self::NotImplemented | Self::Complex(_) | Self::Str(_) => FloatCoercion::NotNumeric,
        }
    }

    /// Returns the integer payload of `bool`/`int` values as a `BigInt`.
    #[must_use]
    pub(crate) fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Self::Bool(b) => Some(BigInt::from(u8::from(*b))),
            Self::Int(i) => Some(BigInt::from(*i)),
            Self::LongInt(li) => Some(li.inner().clone()),
            _ => None,
        }
    }
}
