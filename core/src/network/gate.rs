//! Readiness gate
//!
//! Latches the last readiness value reported by the radio and wakes the
//! lifecycle task once per burst of changes. Several changes before the
//! waiter runs collapse into one wake that carries the newest value.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use hal_abstractions::ReadinessSink;

pub struct ReadinessGate<M: RawMutex> {
    latched: Mutex<M, Cell<bool>>,
    pending: Signal<M, bool>,
}

impl<M: RawMutex> ReadinessGate<M> {
    pub const fn new() -> Self {
        Self {
            latched: Mutex::new(Cell::new(false)),
            pending: Signal::new(),
        }
    }

    /// Record a readiness change and release the waiter
    ///
    /// Never blocks; safe from the notifier's context.
    pub fn signal(&self, ready: bool) {
        self.latched.lock(|latched| latched.set(ready));
        self.pending.signal(ready);
    }

    /// Block until a change is pending, consume it, return the latched value
    pub async fn wait_and_consume(&self) -> bool {
        self.pending.wait().await;
        self.is_ready()
    }

    /// Last reported readiness; does not consume a pending wake
    pub fn is_ready(&self) -> bool {
        self.latched.lock(|latched| latched.get())
    }

    pub fn has_pending(&self) -> bool {
        self.pending.signaled()
    }
}

impl<M: RawMutex> Default for ReadinessGate<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex + Sync> ReadinessSink for ReadinessGate<M> {
    fn on_readiness(&self, ready: bool) {
        debug!("Wi-Fi readiness changed: {}", ready);
        self.signal(ready);
    }
}
