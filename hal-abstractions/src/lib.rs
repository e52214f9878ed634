//! Hardware abstraction traits for Wi-Fi station firmware
//!
//! This crate defines the boundary between the connectivity controller and
//! the board. BSPs implement these traits on top of their Wi-Fi driver,
//! network stack, sensors and transport.
//!
//! - **`wifi`**: `LinkLayer` requests and the `LinkStatus` snapshot
//! - **`event`**: raw management events and the subscription traits
//! - **`readiness`**: radio availability notifications
//! - **`sensor`**: single synchronous sample read
//! - **`telemetry`**: payload delivery to a remote endpoint

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod event;
pub mod readiness;
pub mod sensor;
pub mod telemetry;
pub mod wifi;

pub use event::{Ipv4Address, NetEventSink, NetEventSource, RawEvent, RawPayload, RegisterError};
pub use readiness::{ReadinessSink, ReadinessSource};
pub use sensor::{Sample, Sensor};
pub use telemetry::{TelemetrySender, TransportError};
pub use wifi::{LinkError, LinkLayer, LinkStatus, MacAddress, WifiState};
