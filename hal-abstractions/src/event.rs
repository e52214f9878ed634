//! Raw network management events
//!
//! The link and IP layers report asynchronously, often from interrupt or
//! callback context. Events arrive here undecoded. Interpreting them is the
//! controller's job.

/// Management event identifiers, one bit each so they can be combined into
/// subscription masks
pub mod event_id {
    pub const WIFI_CONNECT_RESULT: u32 = 1 << 0;
    pub const WIFI_DISCONNECT_RESULT: u32 = 1 << 1;
    pub const WIFI_SCAN_DONE: u32 = 1 << 2;
    pub const IPV4_DHCP_BOUND: u32 = 1 << 8;
    pub const IPV4_ADDR_ADD: u32 = 1 << 9;
}

/// IPv4 address as four octets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ipv4Address(pub [u8; 4]);

impl Ipv4Address {
    pub const UNSPECIFIED: Self = Self([0, 0, 0, 0]);

    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self([a, b, c, d])
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.0
    }
}

impl core::fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

/// Event payload as delivered by the layer below
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawPayload {
    /// Management status word: 0 means success, anything else is a failure code
    Status(i32),
    /// DHCPv4 lease information
    Dhcp { requested_ip: Ipv4Address },
    Empty,
}

/// One management notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawEvent {
    pub id: u32,
    pub payload: RawPayload,
}

impl RawEvent {
    pub const fn connect_result(status: i32) -> Self {
        Self {
            id: event_id::WIFI_CONNECT_RESULT,
            payload: RawPayload::Status(status),
        }
    }

    pub const fn disconnect_result(status: i32) -> Self {
        Self {
            id: event_id::WIFI_DISCONNECT_RESULT,
            payload: RawPayload::Status(status),
        }
    }

    pub const fn dhcp_bound(requested_ip: Ipv4Address) -> Self {
        Self {
            id: event_id::IPV4_DHCP_BOUND,
            payload: RawPayload::Dhcp { requested_ip },
        }
    }
}

/// Registration errors for event and readiness callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// No Wi-Fi interface to attach the callback to
    NoInterface,
    /// The layer below refused the registration
    Rejected(i32),
}

impl core::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoInterface => write!(f, "Failed to get Wi-Fi interface"),
            Self::Rejected(code) => write!(f, "Registration rejected ({})", code),
        }
    }
}

impl core::error::Error for RegisterError {}

/// Receiver of raw events
///
/// Called from the notification context, so implementations must not block.
pub trait NetEventSink: Sync {
    fn on_event(&self, event: RawEvent);
}

/// Source of management events, filtered by an `event_id` mask
pub trait NetEventSource {
    fn subscribe(&mut self, mask: u32, sink: &'static dyn NetEventSink)
        -> Result<(), RegisterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_display() {
        assert_eq!(Ipv4Address::new(192, 168, 1, 42).to_string(), "192.168.1.42");
        assert_eq!(Ipv4Address::UNSPECIFIED.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_event_ids_are_distinct_bits() {
        let all = [
            event_id::WIFI_CONNECT_RESULT,
            event_id::WIFI_DISCONNECT_RESULT,
            event_id::WIFI_SCAN_DONE,
            event_id::IPV4_DHCP_BOUND,
            event_id::IPV4_ADDR_ADD,
        ];
        let combined = all.iter().fold(0u32, |acc, id| acc | id);
        assert_eq!(combined.count_ones() as usize, all.len());
    }

    #[test]
    fn test_raw_event_constructors() {
        let event = RawEvent::connect_result(-5);
        assert_eq!(event.id, event_id::WIFI_CONNECT_RESULT);
        assert_eq!(event.payload, RawPayload::Status(-5));

        let addr = Ipv4Address::new(10, 0, 0, 7);
        let event = RawEvent::dhcp_bound(addr);
        assert_eq!(event.payload, RawPayload::Dhcp { requested_ip: addr });
    }
}
