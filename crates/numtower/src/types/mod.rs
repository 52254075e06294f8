/// Builtin types of the numeric tower and their slot implementations.
///
/// Each type module exposes an `init_*_type` function that fills the type's
/// [`TypeSlots`](crate::slots::TypeSlots) when the registry is built.
pub mod complex;
pub(crate) mod float;
pub(crate) mod int;
pub mod long_int;
pub(crate) mod str;
pub mod r#type;

pub use complex::{CoerceStatus, Coerced, Complex};
pub(crate) use complex::init_complex_type;
pub(crate) use float::init_float_type;
pub(crate) use int::init_int_type;
pub use long_int::LongInt;
pub(crate) use str::init_str_type;
pub use r#type::Type;

use crate::{exception::RunResult, slots::TypeSlots, value::Value};

/// `hash(None)` on CPython 3.12+, which no longer derives it from the address.
const NONE_HASH: i64 = 0xFCA8_6420;

/// Registers `NoneType`: hashable, with a fixed repr.
pub(crate) fn init_none_type(slots: &mut TypeSlots) {
    slots.hash = Some(none_hash);
    slots.repr = Some(none_repr);
}

/// Registers `NotImplementedType`, which only has a repr.
pub(crate) fn init_not_implemented_type(slots: &mut TypeSlots) {
    slots.repr = Some(not_implemented_repr);
}

fn none_hash(_: &Value) -> RunResult<i64> {
    Ok(NONE_HASH)
}

fn none_repr(_: &Value) -> RunResult<String> {
    Ok("None".to_owned())
}

fn not_implemented_repr(_: &Value) -> RunResult<String> {
    Ok("NotImplemented".to_owned())
}
