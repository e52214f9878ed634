//! Connectivity state machine
//!
//! Pure transition logic with no I/O. The caller performs the link-layer side
//! effect that a successful transition asks for, and reports request
//! rejections back through [`ConnectionStateMachine::connect_request_failed`]
//! and [`ConnectionStateMachine::disconnect_request_failed`].
//!
//! ```text
//!   Idle ──issue_connect──▶ Connecting ──result ok──▶ Connected
//!    ▲                          │                      │     │
//!    └────── result failed ─────┘                      │     │ request_disconnect
//!    ▲                                                 │     ▼
//!    ├──────────── unsolicited disconnect ─────────────┘  DisconnectRequested
//!    └──────────────────── disconnect result ────────────────────┘
//! ```

use hal_abstractions::{Ipv4Address, LinkError};

use super::config::IpReleasePolicy;
use super::error::ProtocolViolation;
use super::event::Outcome;

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No attempt outstanding
    Idle,
    /// Connect issued, result pending
    Connecting,
    Connected,
    /// We asked the link layer to drop the association
    DisconnectRequested,
}

impl LinkState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::DisconnectRequested => "DisconnectRequested",
        }
    }

    /// Whether the link is up, including while our own teardown is pending
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected | Self::DisconnectRequested)
    }
}

/// Flag view of the connection record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionState {
    pub connected: bool,
    pub connect_result_received: bool,
    pub disconnect_was_requested_by_us: bool,
}

/// Address lease state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IpState {
    pub ip_assigned: bool,
    pub address: Option<Ipv4Address>,
}

/// Why the last connect attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectFailure {
    /// Connect result reported a failure code
    Result(i32),
    /// The link layer refused the connect request itself
    Request(LinkError),
}

/// How the last link loss came about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisconnectCause {
    Requested,
    Unexpected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Connect attempts issued since start
    pub attempts: u32,
    pub last_failure: Option<ConnectFailure>,
    pub last_disconnect: Option<DisconnectCause>,
}

/// What a connect result did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectResultAction {
    Connected,
    Failed(i32),
    /// Link already up; repeated delivery
    Duplicate,
    /// No attempt outstanding
    Unexpected(LinkState),
}

/// What a disconnect result did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisconnectResultAction {
    /// Our own teardown finished
    Completed(Outcome),
    /// The link dropped without us asking
    Lost(Outcome),
    /// No live link; repeated or stray delivery
    Ignored(LinkState),
}

/// Authoritative connection record
///
/// Every field is updated together under one lock by the owner
/// (see [`super::Station`]), so readers never observe a half-applied
/// transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStateMachine {
    state: LinkState,
    connect_result_received: bool,
    ip: IpState,
    ip_policy: IpReleasePolicy,
    diagnostics: Diagnostics,
}

impl Default for ConnectionStateMachine {
    fn default() -> Self {
        Self::new(IpReleasePolicy::Retain)
    }
}

impl ConnectionStateMachine {
    pub const fn new(ip_policy: IpReleasePolicy) -> Self {
        Self {
            state: LinkState::Idle,
            connect_result_received: false,
            ip: IpState {
                ip_assigned: false,
                address: None,
            },
            ip_policy,
            diagnostics: Diagnostics {
                attempts: 0,
                last_failure: None,
                last_disconnect: None,
            },
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn connection(&self) -> ConnectionState {
        ConnectionState {
            connected: self.state.is_connected(),
            connect_result_received: self.connect_result_received,
            disconnect_was_requested_by_us: self.state == LinkState::DisconnectRequested,
        }
    }

    pub fn ip(&self) -> IpState {
        self.ip
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Start a connect attempt; returns the attempt number
    ///
    /// Only allowed from `Idle`. On success the caller must emit the connect
    /// request to the link layer.
    pub fn issue_connect(&mut self) -> Result<u32, ProtocolViolation> {
        if self.state != LinkState::Idle {
            return Err(ProtocolViolation::ConnectWhileBusy(self.state));
        }
        self.state = LinkState::Connecting;
        self.connect_result_received = false;
        self.diagnostics.attempts = self.diagnostics.attempts.wrapping_add(1);
        Ok(self.diagnostics.attempts)
    }

    /// The link layer refused the connect request; the attempt ends here
    pub fn connect_request_failed(&mut self, error: LinkError) {
        if self.state != LinkState::Connecting {
            return;
        }
        self.state = LinkState::Idle;
        self.connect_result_received = true;
        self.diagnostics.last_failure = Some(ConnectFailure::Request(error));
    }

    pub fn on_connect_result(&mut self, outcome: Outcome) -> ConnectResultAction {
        if self.state.is_connected() {
            return ConnectResultAction::Duplicate;
        }
        if self.state != LinkState::Connecting {
            return ConnectResultAction::Unexpected(self.state);
        }

        self.connect_result_received = true;
        match outcome {
            Outcome::Success => {
                self.state = LinkState::Connected;
                ConnectResultAction::Connected
            }
            Outcome::Failure(code) => {
                self.state = LinkState::Idle;
                self.diagnostics.last_failure = Some(ConnectFailure::Result(code));
                ConnectResultAction::Failed(code)
            }
        }
    }

    /// Begin our own teardown
    ///
    /// Only allowed from `Connected`. On success the caller must emit the
    /// disconnect request to the link layer.
    pub fn request_disconnect(&mut self) -> Result<(), ProtocolViolation> {
        if self.state != LinkState::Connected {
            return Err(ProtocolViolation::DisconnectWithoutLink(self.state));
        }
        self.state = LinkState::DisconnectRequested;
        Ok(())
    }

    /// The link layer refused the disconnect request; the link stays up
    pub fn disconnect_request_failed(&mut self, _error: LinkError) {
        if self.state == LinkState::DisconnectRequested {
            self.state = LinkState::Connected;
        }
    }

    pub fn on_disconnect_result(&mut self, outcome: Outcome) -> DisconnectResultAction {
        match self.state {
            LinkState::DisconnectRequested => {
                self.enter_idle(DisconnectCause::Requested);
                DisconnectResultAction::Completed(outcome)
            }
            LinkState::Connected => {
                self.enter_idle(DisconnectCause::Unexpected);
                DisconnectResultAction::Lost(outcome)
            }
            state => DisconnectResultAction::Ignored(state),
        }
    }

    /// Record a DHCP bind; returns `true` when the address is newly assigned
    ///
    /// A repeated bind (renewal, rebind) only refreshes the address.
    pub fn on_address_bound(&mut self, address: Ipv4Address) -> bool {
        let newly_assigned = !self.ip.ip_assigned;
        self.ip.ip_assigned = true;
        self.ip.address = Some(address);
        newly_assigned
    }

    fn enter_idle(&mut self, cause: DisconnectCause) {
        self.state = LinkState::Idle;
        self.diagnostics.last_disconnect = Some(cause);
        if self.ip_policy == IpReleasePolicy::ClearOnDisconnect {
            self.ip = IpState::default();
        }
    }
}
