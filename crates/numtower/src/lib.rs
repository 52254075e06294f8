#![doc = include_str!("../../../README.md")]
#![expect(clippy::cast_possible_truncation, reason = "numeric narrowing is checked")]
#![expect(clippy::cast_sign_loss, reason = "sign-changing casts are intentional")]
#![expect(clippy::cast_possible_wrap, reason = "wrap behavior mirrors CPython")]
#![expect(clippy::float_cmp, reason = "parity requires exact float comparison")]
#![expect(clippy::unnecessary_wraps, reason = "slot signatures are uniform")]

pub mod dispatch;
pub mod exception;
pub mod py_hash;
pub mod slots;
pub mod tracer;
pub mod types;
pub mod value;

pub use crate::{
    dispatch::{BinaryOp, CompareOp, Runtime},
    exception::{ExcType, RunError, RunResult, SimpleException},
    slots::{SlotId, TypeRegistry, TypeSlots, init_types},
    tracer::{DispatchTracer, NoopTracer, RecordingTracer, StderrTracer, TraceEvent},
    types::{CoerceStatus, Coerced, Complex, LongInt, Type},
    value::{FloatCoercion, Value},
};
