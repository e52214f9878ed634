//! Platform-agnostic core logic for Wi-Fi station firmware
//!
//! This crate contains the connectivity controller and the application tasks
//! built on top of it. It has NO hardware dependencies: boards plug in
//! through the traits in `hal-abstractions`.
//!
//! - **`network`**: connection state machine, readiness gate, event bus,
//!   status poller and the lifecycle driver that ties them together
//! - **`indicator`**: LED task mirroring the link state

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

pub mod indicator;
pub mod network;

pub use network::{
    ConnectionState, InitError, IpReleasePolicy, IpState, LifecycleDriver, LinkState, Station,
    StationConfig, TelemetryClient, TelemetryConfig,
};
