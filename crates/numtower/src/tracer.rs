//! Dispatch tracing.
//!
//! The [`Runtime`](crate::dispatch::Runtime) carries its tracer as a type
//! parameter `Tr: DispatchTracer`, so the default [`NoopTracer`] is inlined
//! away entirely. Other tracers are chosen at construction time:
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | No-op (production default) |
//! | [`StderrTracer`] | Human-readable dispatch log to stderr |
//! | [`RecordingTracer`] | Records every event for assertions or post-mortem |
//!
//! ```ignore
//! let registry = init_types();
//! let mut rt = Runtime::with_tracer(registry, RecordingTracer::new());
//! rt.add(&Value::Int(1), &Value::from(Complex::new(0.0, 1.0)))?;
//! let events = rt.into_tracer().into_events();
//! ```

use crate::{exception::RunError, slots::SlotId, types::Type};

/// Event captured by [`RecordingTracer`].
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A slot was called with operands of the given types.
    Dispatch {
        slot: SlotId,
        receiver: Type,
        other: Type,
    },
    /// A slot was missing or returned `NotImplemented`.
    Deferral { slot: SlotId, receiver: Type },
    /// The right operand's reflected slot is about to be tried.
    Reflected { slot: SlotId, receiver: Type },
    /// The operation finished with an error.
    Error { slot: SlotId, error: RunError },
}

/// Hooks invoked by the dispatcher.
///
/// All methods default to no-ops, so implementations only override what they need.
pub trait DispatchTracer: std::fmt::Debug {
    /// Called right before `slot` of `receiver`'s type runs.
    #[inline(always)]
    fn on_dispatch(&mut self, _slot: SlotId, _receiver: Type, _other: Type) {}

    /// Called when `receiver`'s type has no `slot`, or the slot returned `NotImplemented`.
    #[inline(always)]
    fn on_deferral(&mut self, _slot: SlotId, _receiver: Type) {}

    /// Called before falling back to the right operand's reflected slot.
    #[inline(always)]
    fn on_reflected(&mut self, _slot: SlotId, _receiver: Type) {}

    /// Called once when an operation produces an error.
    #[inline(always)]
    fn on_error(&mut self, _slot: SlotId, _error: &RunError) {}
}

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl DispatchTracer for NoopTracer {}

/// Prints one line per event to stderr.
///
/// ```text
///   >>> __add__ int, complex
///   ... defer       __add__ on int
///   <-> reflect     __radd__ on complex
/// ```
#[derive(Debug, Default)]
pub struct StderrTracer {
    /// Stops printing after this many events. `None` means unlimited.
    limit: Option<usize>,
    count: usize,
}

impl StderrTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracer that goes quiet after `limit` events.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            count: 0,
        }
    }

    /// Counts the event and reports whether it should be printed.
    fn admit(&mut self) -> bool {
        if self.limit.is_some_and(|limit| self.count >= limit) {
            return false;
        }
        self.count += 1;
        if let Some(limit) = self.limit
            && self.count == limit
        {
            eprintln!("--- trace limit reached ({limit} events) ---");
        }
        true
    }
}

impl DispatchTracer for StderrTracer {
    fn on_dispatch(&mut self, slot: SlotId, receiver: Type, other: Type) {
        if self.admit() {
            eprintln!("  >>> {slot} {receiver}, {other}");
        }
    }

    fn on_deferral(&mut self, slot: SlotId, receiver: Type) {
        if self.admit() {
            eprintln!("  ... defer       {slot} on {receiver}");
        }
    }

    fn on_reflected(&mut self, slot: SlotId, receiver: Type) {
        if self.admit() {
            eprintln!("  <-> reflect     {slot} on {receiver}");
        }
    }

    fn on_error(&mut self, slot: SlotId, error: &RunError) {
        if self.admit() {
            eprintln!("  !!! {slot} {error}");
        }
    }
}

/// Records every event in order.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Vec<TraceEvent>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Consumes the tracer and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DispatchTracer for RecordingTracer {
    fn on_dispatch(&mut self, slot: SlotId, receiver: Type, other: Type) {
        self.events.push(TraceEvent::Dispatch { slot, receiver, other });
    }

    fn on_deferral(&mut self, slot: SlotId, receiver: Type) {
        self.events.push(TraceEvent::Deferral { slot, receiver });
    }

    fn on_reflected(&mut self, slot: SlotId, receiver: Type) {
        self.events.push(TraceEvent::Reflected { slot, receiver });
    }

    fn on_error(&mut self, slot: SlotId, error: &RunError) {
        self.events.push(TraceEvent::Error {
            slot,
            error: error.clone(),
        });
    }
}
