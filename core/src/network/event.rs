//! Event bus adapter
//!
//! Decodes raw management events into typed [`LinkEvent`]s and queues them
//! for the lifecycle task. The sink side runs in the notifier's context, so
//! it only decodes and `try_send`s. All interpretation happens in the state
//! machine.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use hal_abstractions::event::event_id;
use hal_abstractions::{Ipv4Address, NetEventSink, RawEvent, RawPayload};

/// Queue depth between the notifier and the lifecycle task
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Wi-Fi management subscription: connect and disconnect results
pub const WIFI_MGMT_EVENTS: u32 = event_id::WIFI_CONNECT_RESULT | event_id::WIFI_DISCONNECT_RESULT;

/// IPv4 subscription: DHCP lease bound
pub const IPV4_EVENTS: u32 = event_id::IPV4_DHCP_BOUND;

/// Terminal status of a management request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Success,
    Failure(i32),
}

impl Outcome {
    pub const fn from_status(status: i32) -> Self {
        if status == 0 {
            Self::Success
        } else {
            Self::Failure(status)
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure(code) => code,
        }
    }
}

/// Typed event delivered to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    ConnectResult(Outcome),
    DisconnectResult(Outcome),
    AddressBound(Ipv4Address),
}

/// Raw event whose payload does not match its id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MalformedEvent {
    pub id: u32,
}

/// Decode one raw event
///
/// Returns `Ok(None)` for ids outside the two subscribed classes.
pub fn decode(raw: &RawEvent) -> Result<Option<LinkEvent>, MalformedEvent> {
    let event = match (raw.id, raw.payload) {
        (event_id::WIFI_CONNECT_RESULT, RawPayload::Status(status)) => {
            LinkEvent::ConnectResult(Outcome::from_status(status))
        }
        (event_id::WIFI_DISCONNECT_RESULT, RawPayload::Status(status)) => {
            LinkEvent::DisconnectResult(Outcome::from_status(status))
        }
        (event_id::IPV4_DHCP_BOUND, RawPayload::Dhcp { requested_ip }) => {
            LinkEvent::AddressBound(requested_ip)
        }
        (event_id::WIFI_CONNECT_RESULT, _)
        | (event_id::WIFI_DISCONNECT_RESULT, _)
        | (event_id::IPV4_DHCP_BOUND, _) => return Err(MalformedEvent { id: raw.id }),
        _ => return Ok(None),
    };
    Ok(Some(event))
}

/// Bounded queue of decoded events
pub struct EventBus<M: RawMutex> {
    channel: Channel<M, LinkEvent, EVENT_QUEUE_DEPTH>,
    dropped: AtomicU32,
}

impl<M: RawMutex> EventBus<M> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Decode and enqueue; returns `true` if a typed event was queued
    pub fn publish(&self, raw: RawEvent) -> bool {
        let event = match decode(&raw) {
            Ok(Some(event)) => event,
            Ok(None) => {
                debug!("Ignoring net event {:#x}", raw.id);
                return false;
            }
            Err(malformed) => {
                warn!("Malformed payload for net event {:#x}", malformed.id);
                return false;
            }
        };

        if self.channel.try_send(event).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            error!("Net event queue full, event dropped");
            return false;
        }
        true
    }

    pub async fn receive(&self) -> LinkEvent {
        self.channel.receive().await
    }

    pub fn try_receive(&self) -> Option<LinkEvent> {
        self.channel.try_receive().ok()
    }

    /// Events lost to a full queue since start
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<M: RawMutex> Default for EventBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex + Sync> NetEventSink for EventBus<M> {
    fn on_event(&self, event: RawEvent) {
        self.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    #[test]
    fn test_decode_results() {
        assert_eq!(
            decode(&RawEvent::connect_result(0)),
            Ok(Some(LinkEvent::ConnectResult(Outcome::Success)))
        );
        assert_eq!(
            decode(&RawEvent::connect_result(1)),
            Ok(Some(LinkEvent::ConnectResult(Outcome::Failure(1))))
        );
        assert_eq!(
            decode(&RawEvent::disconnect_result(-3)),
            Ok(Some(LinkEvent::DisconnectResult(Outcome::Failure(-3))))
        );
        let addr = Ipv4Address::new(192, 168, 0, 14);
        assert_eq!(
            decode(&RawEvent::dhcp_bound(addr)),
            Ok(Some(LinkEvent::AddressBound(addr)))
        );
    }

    #[test]
    fn test_decode_ignores_unsubscribed_ids() {
        let scan = RawEvent {
            id: event_id::WIFI_SCAN_DONE,
            payload: RawPayload::Status(0),
        };
        assert_eq!(decode(&scan), Ok(None));
    }

    #[test]
    fn test_decode_rejects_mismatched_payload() {
        let raw = RawEvent {
            id: event_id::IPV4_DHCP_BOUND,
            payload: RawPayload::Status(0),
        };
        assert_eq!(
            decode(&raw),
            Err(MalformedEvent {
                id: event_id::IPV4_DHCP_BOUND
            })
        );
    }

    #[test]
    fn test_duplicate_notifications_are_forwarded() {
        let bus: EventBus<CriticalSectionRawMutex> = EventBus::new();
        bus.on_event(RawEvent::connect_result(0));
        bus.on_event(RawEvent::connect_result(0));
        assert_eq!(bus.try_receive(), Some(LinkEvent::ConnectResult(Outcome::Success)));
        assert_eq!(bus.try_receive(), Some(LinkEvent::ConnectResult(Outcome::Success)));
        assert_eq!(bus.try_receive(), None);
    }

    #[test]
    fn test_full_queue_drops_and_counts() {
        let bus: EventBus<CriticalSectionRawMutex> = EventBus::new();
        for _ in 0..EVENT_QUEUE_DEPTH {
            assert!(bus.publish(RawEvent::disconnect_result(0)));
        }
        assert!(!bus.publish(RawEvent::disconnect_result(0)));
        assert_eq!(bus.dropped(), 1);
    }

    #[test]
    fn test_subscription_masks() {
        assert_eq!(WIFI_MGMT_EVENTS & event_id::WIFI_SCAN_DONE, 0);
        assert_ne!(WIFI_MGMT_EVENTS & event_id::WIFI_CONNECT_RESULT, 0);
        assert_ne!(IPV4_EVENTS & event_id::IPV4_DHCP_BOUND, 0);
    }
}
