//! Connectivity and telemetry error types

use hal_abstractions::{RegisterError, TransportError};

use super::state::LinkState;

/// Startup errors; the controller cannot run without its subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Readiness callback could not be registered
    ReadinessRegistration(RegisterError),
    /// Link or IP event subscription failed
    EventSubscription(RegisterError),
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ReadinessRegistration(e) => {
                write!(f, "Failed to register Wi-Fi ready callback: {}", e)
            }
            Self::EventSubscription(e) => write!(f, "Failed to subscribe to net events: {}", e),
        }
    }
}

impl core::error::Error for InitError {}

/// A request made in a state that does not allow it
///
/// Logged and dropped; never escalated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolViolation {
    /// Connect requested while an attempt or session is live
    ConnectWhileBusy(LinkState),
    /// Disconnect requested without an established link
    DisconnectWithoutLink(LinkState),
}

impl core::fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConnectWhileBusy(state) => {
                write!(f, "connect requested while {}", state.as_str())
            }
            Self::DisconnectWithoutLink(state) => {
                write!(f, "disconnect requested while {}", state.as_str())
            }
        }
    }
}

impl core::error::Error for ProtocolViolation {}

/// Telemetry publish errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError<E> {
    /// Sensor read failed
    Sensor(E),
    /// Payload did not fit the encode buffer
    Payload,
    /// Sender could not deliver the payload
    Transport(TransportError),
}

impl<E: core::fmt::Debug> core::fmt::Display for TelemetryError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "Sensor sample update error: {:?}", e),
            Self::Payload => write!(f, "Payload buffer too small"),
            Self::Transport(e) => write!(f, "Telemetry transport error: {}", e),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for TelemetryError<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = InitError::ReadinessRegistration(RegisterError::NoInterface);
        assert_eq!(
            err.to_string(),
            "Failed to register Wi-Fi ready callback: Failed to get Wi-Fi interface"
        );

        let violation = ProtocolViolation::ConnectWhileBusy(LinkState::Connecting);
        assert_eq!(violation.to_string(), "connect requested while Connecting");

        let err: TelemetryError<()> = TelemetryError::Transport(TransportError::Connect);
        assert_eq!(err.to_string(), "Telemetry transport error: Connect failed");
    }
}
