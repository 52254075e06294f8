use std::{
    borrow::Cow,
    fmt::{self, Write},
};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::types::Type;

/// Result type alias for operations that can produce a runtime error.
pub type RunResult<T> = Result<T, RunError>;

/// Python exception types raised by numeric dispatch.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and `Into<&'static str>` implementations.
/// The string representation matches the variant name exactly (e.g., `TypeError` -> "TypeError").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ExcType {
    /// Base class of everything below.
    Exception,

    // --- ArithmeticError hierarchy ---
    ArithmeticError,
    /// Subclass of ArithmeticError.
    OverflowError,

    TypeError,
}

impl ExcType {
    /// Checks if this exception type is a subclass of another exception type.
    ///
    /// Returns true if `self` would be caught by `except handler_type:`.
    #[must_use]
    pub fn is_subclass_of(self, handler_type: Self) -> bool {
        if self == handler_type {
            return true;
        }
        match handler_type {
            Self::Exception => true,
            Self::ArithmeticError => self == Self::OverflowError,
            _ => false,
        }
    }

    /// OverflowError raised when an integer operand cannot be represented as a double.
    #[must_use]
    pub(crate) fn overflow_int_to_float() -> RunError {
        SimpleException::new_msg(Self::OverflowError, "int too large to convert to float").into()
    }

    /// TypeError raised when a complex number takes part in an ordering comparison
    /// with another number.
    #[must_use]
    pub(crate) fn complex_ordering() -> RunError {
        SimpleException::new_msg(Self::TypeError, "no ordering relation is defined for complex numbers").into()
    }

    /// Creates a TypeError for unsupported binary operations.
    ///
    /// For `+` with a str on the left side, uses CPython's special format:
    /// `can only concatenate str (not "{other}") to str`
    ///
    /// For other cases, uses the generic format:
    /// `unsupported operand type(s) for {op}: '{left}' and '{right}'`
    #[must_use]
    pub(crate) fn binary_type_error(op: &str, lhs_type: Type, rhs_type: Type) -> RunError {
        let message = if op == "+" && lhs_type == Type::Str {
            format!("can only concatenate str (not \"{rhs_type}\") to str")
        } else {
            format!("unsupported operand type(s) for {op}: '{lhs_type}' and '{rhs_type}'")
        };
        SimpleException::new_msg(Self::TypeError, message).into()
    }

    /// Creates a TypeError for an ordering comparison no operand implements.
    ///
    /// Uses CPython's format: `'<' not supported between instances of 'complex' and 'str'`
    #[must_use]
    pub(crate) fn compare_type_error(op: &str, lhs_type: Type, rhs_type: Type) -> RunError {
        SimpleException::new_msg(
            Self::TypeError,
            format!("'{op}' not supported between instances of '{lhs_type}' and '{rhs_type}'"),
        )
        .into()
    }

    /// Creates a TypeError for unhashable types when calling `hash()`.
    #[must_use]
    pub(crate) fn type_error_unhashable(type_: Type) -> RunError {
        SimpleException::new_msg(Self::TypeError, format!("unhashable type: '{type_}'")).into()
    }
}

/// Lightweight representation of a raised exception: its type and message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleException {
    exc_type: ExcType,
    arg: Option<String>,
}

impl fmt::Display for SimpleException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.py_repr_fmt(f)
    }
}

impl SimpleException {
    /// Creates a new exception with the given type and optional argument message.
    #[must_use]
    pub fn new(exc_type: ExcType, arg: Option<String>) -> Self {
        Self { exc_type, arg }
    }

    /// Creates a new exception with the given type and argument message.
    #[must_use]
    pub fn new_msg(exc_type: ExcType, arg: impl fmt::Display) -> Self {
        Self {
            exc_type,
            arg: Some(arg.to_string()),
        }
    }

    #[must_use]
    pub fn exc_type(&self) -> ExcType {
        self.exc_type
    }

    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    /// Writes `TypeError('message')`, escaping the message like a str repr.
    pub fn py_repr_fmt(&self, f: &mut impl Write) -> fmt::Result {
        let type_str: &'static str = self.exc_type.into();
        write!(f, "{type_str}(")?;
        if let Some(arg) = &self.arg {
            f.write_char('\'')?;
            for c in arg.chars() {
                match c {
                    '\'' => f.write_str("\\'")?,
                    '\\' => f.write_str("\\\\")?,
                    '\n' => f.write_str("\\n")?,
                    _ => f.write_char(c)?,
                }
            }
            f.write_char('\'')?;
        }
        f.write_char(')')
    }
}

/// Runtime error types that can occur during dispatch.
///
/// - `Internal`: bug in the host, e.g. a slot table reached before initialization
/// - `Exc`: Python exception propagated to the caller's handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunError {
    /// Internal error - indicates a bug in the runtime, not user code.
    Internal(Cow<'static, str>),
    /// Catchable Python exception (e.g., OverflowError, TypeError).
    Exc(Box<SimpleException>),
}

impl From<SimpleException> for RunError {
    fn from(exc: SimpleException) -> Self {
        Self::Exc(Box::new(exc))
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(msg) => write!(f, "Internal error in numtower: {msg}"),
            Self::Exc(exc) => exc.py_repr_fmt(f),
        }
    }
}

impl std::error::Error for RunError {}

impl RunError {
    #[must_use]
    pub fn internal(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the raised exception, or `None` for internal errors.
    #[must_use]
    pub fn exception(&self) -> Option<&SimpleException> {
        match self {
            Self::Exc(exc) => Some(exc),
            Self::Internal(_) => None,
        }
    }

    /// Returns true if this error is a catchable exception of `exc_type`.
    #[must_use]
    pub fn is_exception_type(&self, exc_type: ExcType) -> bool {
        match self {
            Self::Exc(exc) => exc.exc_type() == exc_type,
            Self::Internal(_) => false,
        }
    }
}
