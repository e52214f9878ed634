//! Wi-Fi connectivity controller
//!
//! This module turns three asynchronous sources (link events, DHCP events and
//! radio readiness) into one consistent "is the network usable" answer:
//! - **`event`**: decodes raw management events and queues them
//! - **`state`**: pure connection state machine
//! - **`gate`**: latched, single-slot readiness signal
//! - **`poller`**: link status queries for diagnostics
//! - **`station`**: shared record, predicates and consumer waits
//! - **`manager`**: the lifecycle task, sole writer of the record
//! - **`client`**: telemetry publisher gated on connectivity
//! - **`config`**: configuration structs with `Default` implementations
//! - **`error`**: error enums
//!
//! ## Threading
//!
//! Callbacks from the network stack only decode, latch and `try_send`.
//! Every transition runs on the lifecycle task behind a single blocking
//! mutex, so readers never see `connected` and `connect_result_received`
//! out of step.

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod gate;
pub mod manager;
pub mod poller;
pub mod state;
pub mod station;

// Re-export commonly used types
pub use client::TelemetryClient;
pub use config::{IpReleasePolicy, StationConfig, TelemetryConfig};
pub use error::{InitError, ProtocolViolation, TelemetryError};
pub use event::{EventBus, LinkEvent, Outcome};
pub use gate::ReadinessGate;
pub use manager::LifecycleDriver;
pub use poller::{PollReason, Status, StatusPoller};
pub use state::{ConnectionState, ConnectionStateMachine, IpState, LinkState};
pub use station::{Snapshot, Station};
