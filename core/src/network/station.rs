//! Shared connectivity state
//!
//! A [`Station`] is meant to live in a `static`. The lifecycle task is its only
//! writer; the event and readiness callbacks only queue and latch, and any
//! number of consumer tasks read the predicates.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use hal_abstractions::{NetEventSource, ReadinessSource};

use super::config::StationConfig;
use super::error::InitError;
use super::event::{EventBus, IPV4_EVENTS, WIFI_MGMT_EVENTS};
use super::gate::ReadinessGate;
use super::state::{ConnectionState, ConnectionStateMachine, Diagnostics, IpState, LinkState};

/// Consistent view of the whole connection record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub state: LinkState,
    pub connection: ConnectionState,
    pub ip: IpState,
    pub diagnostics: Diagnostics,
    /// Events lost to a full queue
    pub dropped_events: u32,
}

pub struct Station<M: RawMutex> {
    config: StationConfig,
    machine: Mutex<M, RefCell<ConnectionStateMachine>>,
    gate: ReadinessGate<M>,
    events: EventBus<M>,
    disconnect_requests: Signal<M, ()>,
}

impl<M: RawMutex> Station<M> {
    pub const fn new(config: StationConfig) -> Self {
        Self {
            config,
            machine: Mutex::new(RefCell::new(ConnectionStateMachine::new(config.ip_policy))),
            gate: ReadinessGate::new(),
            events: EventBus::new(),
            disconnect_requests: Signal::new(),
        }
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn readiness(&self) -> &ReadinessGate<M> {
        &self.gate
    }

    pub fn events(&self) -> &EventBus<M> {
        &self.events
    }

    pub fn snapshot(&self) -> Snapshot {
        let dropped_events = self.events.dropped();
        self.machine.lock(|machine| {
            let machine = machine.borrow();
            Snapshot {
                state: machine.state(),
                connection: machine.connection(),
                ip: machine.ip(),
                diagnostics: machine.diagnostics(),
                dropped_events,
            }
        })
    }

    pub fn link_state(&self) -> LinkState {
        self.machine.lock(|machine| machine.borrow().state())
    }

    pub fn connection(&self) -> ConnectionState {
        self.machine.lock(|machine| machine.borrow().connection())
    }

    pub fn is_connected(&self) -> bool {
        self.connection().connected
    }

    pub fn ip_acquired(&self) -> bool {
        self.machine.lock(|machine| machine.borrow().ip().ip_assigned)
    }

    /// Link up and address leased, read under one lock
    pub fn is_online(&self) -> bool {
        self.machine.lock(|machine| {
            let machine = machine.borrow();
            machine.connection().connected && machine.ip().ip_assigned
        })
    }

    /// Ask the lifecycle task to tear the link down
    ///
    /// Ignored unless the link is `Connected` when the task picks it up.
    pub fn request_disconnect(&self) {
        self.disconnect_requests.signal(());
    }

    pub(crate) async fn disconnect_requested(&self) {
        self.disconnect_requests.wait().await
    }

    /// Apply a transition under the lock
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut ConnectionStateMachine) -> R) -> R {
        self.machine.lock(|machine| f(&mut machine.borrow_mut()))
    }

    pub async fn wait_for_ip(&self) {
        while !self.ip_acquired() {
            info!("Waiting for IP address assignment...");
            Timer::after(self.config.online_poll_interval).await;
        }
        info!("IP address assigned, ready to send data.");
    }

    pub async fn wait_for_connection(&self) {
        while !self.is_connected() {
            info!("Waiting for Wi-Fi to connect...");
            Timer::after(self.config.online_poll_interval).await;
        }
        info!("Wi-Fi connected");
    }

    /// Block until both predicates hold in the same read
    pub async fn wait_until_online(&self) {
        loop {
            let (connected, ip_assigned) = self.machine.lock(|machine| {
                let machine = machine.borrow();
                (machine.connection().connected, machine.ip().ip_assigned)
            });
            if connected && ip_assigned {
                return;
            }
            if !ip_assigned {
                info!("Waiting for IP address assignment...");
            } else {
                info!("Waiting for Wi-Fi to connect...");
            }
            Timer::after(self.config.online_poll_interval).await;
        }
    }
}

impl<M: RawMutex + Sync + 'static> Station<M> {
    /// Hook the station up to its notification sources
    ///
    /// Subscribes to the Wi-Fi management and IPv4 event classes, then
    /// registers for readiness changes. Either failure is fatal.
    pub fn start<R, E>(&'static self, readiness: &mut R, events: &mut E) -> Result<(), InitError>
    where
        R: ReadinessSource,
        E: NetEventSource,
    {
        events
            .subscribe(WIFI_MGMT_EVENTS, &self.events)
            .map_err(InitError::EventSubscription)?;
        events
            .subscribe(IPV4_EVENTS, &self.events)
            .map_err(InitError::EventSubscription)?;

        debug!("Registering Wi-Fi ready callbacks");
        readiness.register(&self.gate).map_err(|e| {
            error!("Failed to register Wi-Fi ready callbacks: {}", e);
            InitError::ReadinessRegistration(e)
        })?;

        info!("Station started");
        Ok(())
    }
}
