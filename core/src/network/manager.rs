//! Wi-Fi lifecycle task
//!
//! Sequences readiness wait, connect, wait for the result, and back to the
//! readiness wait. This is the only code that issues link-layer requests and
//! the only writer of the connection record. Events and disconnect requests
//! are serviced at every suspension point.
//!
//! There is no backoff and no attempt ceiling: a failed attempt is retried
//! only when readiness is signalled again.

use embassy_futures::select::{select3, Either3};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Timer;
use hal_abstractions::LinkLayer;

use super::event::{LinkEvent, Outcome};
use super::poller::{PollReason, StatusPoller};
use super::state::{ConnectResultAction, DisconnectResultAction};
use super::station::Station;

pub struct LifecycleDriver<'a, M: RawMutex, L: LinkLayer> {
    station: &'a Station<M>,
    link: L,
    poller: StatusPoller,
}

impl<'a, M: RawMutex, L: LinkLayer> LifecycleDriver<'a, M, L> {
    pub fn new(station: &'a Station<M>, link: L) -> Self {
        let poller = StatusPoller::new(station.config().status_poll_interval);
        Self {
            station,
            link,
            poller,
        }
    }

    /// Run forever; spawn as its own task
    pub async fn run(&mut self) -> ! {
        loop {
            info!("Waiting for Wi-Fi to be ready");
            let mut ready = self.wait_for_readiness().await;

            loop {
                if !ready {
                    info!("Wi-Fi is not ready");
                    break;
                }

                self.connect().await;
                if !self.station.is_connected() {
                    break;
                }

                // Keep the session; the next readiness change decides
                ready = self.wait_for_readiness().await;
            }
        }
    }

    /// Suspend until readiness changes, servicing events meanwhile
    async fn wait_for_readiness(&mut self) -> bool {
        let station = self.station;
        loop {
            match select3(
                station.readiness().wait_and_consume(),
                station.events().receive(),
                station.disconnect_requested(),
            )
            .await
            {
                Either3::First(ready) => return ready,
                Either3::Second(event) => self.handle_event(event),
                Either3::Third(()) => self.handle_disconnect_request(),
            }
        }
    }

    /// One connect attempt, from request to terminal result
    async fn connect(&mut self) {
        let station = self.station;
        let attempt = match station.update(|sm| sm.issue_connect()) {
            Ok(attempt) => attempt,
            Err(violation) => {
                warn!("Connect not issued: {}", violation);
                return;
            }
        };

        match self.link.connect_request() {
            Ok(()) => info!("Connection requested (attempt {})", attempt),
            Err(e) => {
                error!("Connection request failed: {}", e);
                station.update(|sm| sm.connect_request_failed(e));
                return;
            }
        }

        while !station.connection().connect_result_received {
            self.poller.poll_once(&mut self.link, PollReason::Progress);

            let mut tick = Timer::after(self.poller.interval());
            loop {
                match select3(
                    &mut tick,
                    station.events().receive(),
                    station.disconnect_requested(),
                )
                .await
                {
                    Either3::First(()) => break,
                    Either3::Second(event) => {
                        self.handle_event(event);
                        if station.connection().connect_result_received {
                            break;
                        }
                    }
                    Either3::Third(()) => self.handle_disconnect_request(),
                }
            }
        }

        self.poller.poll_once(&mut self.link, PollReason::Final);
    }

    fn handle_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::ConnectResult(outcome) => {
                match self.station.update(|sm| sm.on_connect_result(outcome)) {
                    ConnectResultAction::Connected => info!("Connected"),
                    ConnectResultAction::Failed(code) => error!("Connection failed ({})", code),
                    ConnectResultAction::Duplicate => debug!("Duplicate connect result ignored"),
                    ConnectResultAction::Unexpected(state) => {
                        warn!("Connect result while {} ignored", state.as_str())
                    }
                }
            }
            LinkEvent::DisconnectResult(outcome) => {
                match self.station.update(|sm| sm.on_disconnect_result(outcome)) {
                    DisconnectResultAction::Completed(outcome) => {
                        let verdict = match outcome {
                            Outcome::Success => "done",
                            Outcome::Failure(_) => "failed",
                        };
                        info!("Disconnection request {} ({})", verdict, outcome.code());
                        self.poller.poll_once(&mut self.link, PollReason::Refresh);
                    }
                    DisconnectResultAction::Lost(_) => {
                        warn!("Received Disconnected");
                        self.poller.poll_once(&mut self.link, PollReason::Refresh);
                    }
                    DisconnectResultAction::Ignored(state) => {
                        debug!("Disconnect result while {} ignored", state.as_str())
                    }
                }
            }
            LinkEvent::AddressBound(address) => {
                let newly_assigned = self.station.update(|sm| sm.on_address_bound(address));
                let [a, b, c, d] = address.octets();
                info!("DHCP IP address: {}.{}.{}.{}", a, b, c, d);
                if !newly_assigned {
                    debug!("DHCP lease re-confirmed");
                }
            }
        }
    }

    fn handle_disconnect_request(&mut self) {
        if let Err(violation) = self.station.update(|sm| sm.request_disconnect()) {
            warn!("Disconnect not issued: {}", violation);
            return;
        }

        match self.link.disconnect_request() {
            Ok(()) => info!("Disconnection requested"),
            Err(e) => {
                error!("Disconnection request failed: {}", e);
                self.station.update(|sm| sm.disconnect_request_failed(e));
            }
        }
    }
}
