//! Radio readiness notifications
//!
//! Some radios are shared or power-gated and can become unusable at runtime.
//! The readiness source reports every availability change as a boolean.

use crate::event::RegisterError;

/// Receiver of readiness changes
///
/// Called from the notifier's context. Implementations latch the value and
/// wake their waiter without blocking.
pub trait ReadinessSink: Sync {
    fn on_readiness(&self, ready: bool);
}

/// Source of radio readiness changes
pub trait ReadinessSource {
    fn register(&mut self, sink: &'static dyn ReadinessSink) -> Result<(), RegisterError>;
}
