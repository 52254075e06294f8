use std::fmt;

use strum::{EnumIter, EnumString};

/// Represents the Python type of a value.
///
/// Arbitrary-precision integers are an implementation detail of `int`, so
/// `Value::Int` and `Value::LongInt` both report [`Type::Int`].
///
/// Parsing from a string uses the Python builtin name (e.g. `"complex"`).
#[derive(Debug, Clone, Copy, EnumString, EnumIter, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Type {
    #[strum(serialize = "NoneType")]
    NoneType,
    #[strum(serialize = "NotImplementedType")]
    NotImplementedType,
    Bool,
    Int,
    Float,
    /// A complex number value.
    Complex,
    Str,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoneType => f.write_str("NoneType"),
            Self::NotImplementedType => f.write_str("NotImplementedType"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Complex => f.write_str("complex"),
            Self::Str => f.write_str("str"),
        }
    }
}

impl Type {
    /// Checks `isinstance` semantics between two builtin types.
    ///
    /// `bool` is a subtype of `int`; every other type only matches itself.
    #[must_use]
    pub fn is_instance_of(self, other: Self) -> bool {
        self == other || (self == Self::Bool && other == Self::Int)
    }

    /// True for members of the numeric tower: `bool`, `int`, `float` and `complex`.
    #[must_use]
    pub fn is_number(self) -> bool {
        [Self::Int, Self::Float, Self::Complex]
            .into_iter()
            .any(|numeric| self.is_instance_of(numeric))
    }
}
