//! Link status poller
//!
//! Queries the link layer for diagnostics only. Nothing here touches the
//! connection record; correctness comes from the event path.

use embassy_time::Duration;
use hal_abstractions::{LinkLayer, LinkStatus};

/// Why a status query is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollReason {
    /// Periodic query while a connect attempt is outstanding
    Progress,
    /// Snapshot right after a terminal connect result
    Final,
    /// Refresh after an unexpected link loss
    Refresh,
}

impl PollReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Final => "final",
            Self::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Known(LinkStatus),
    /// The query itself failed
    Unknown,
}

impl Status {
    pub fn link(&self) -> Option<&LinkStatus> {
        match self {
            Self::Known(status) => Some(status),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPoller {
    interval: Duration,
}

impl StatusPoller {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Cadence of `Progress` queries
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Query and dump the link status once
    pub fn poll_once<L: LinkLayer>(&self, link: &mut L, reason: PollReason) -> Status {
        trace!("Link status query ({})", reason.as_str());
        match link.query_status() {
            Ok(status) => {
                dump(&status);
                Status::Known(status)
            }
            Err(e) => {
                warn!("Status request failed: {}", e);
                Status::Unknown
            }
        }
    }
}

fn dump(status: &LinkStatus) {
    info!("==================");
    info!("State: {}", status.state.as_str());

    if status.state.is_associated() {
        info!("Interface Mode: {}", status.iface_mode.as_str());
        info!("Link Mode: {}", status.link_mode.as_str());
        info!("SSID: {}", status.ssid.as_str());
        info!("BSSID: {}", status.bssid);
        info!("Band: {}", status.band.as_str());
        info!("Channel: {}", status.channel);
        info!("Security: {}", status.security.as_str());
        info!("MFP: {}", status.mfp.as_str());
        info!("RSSI: {}", status.rssi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal_abstractions::{LinkError, WifiState};

    struct FixedLink(Result<LinkStatus, LinkError>);

    impl LinkLayer for FixedLink {
        fn connect_request(&mut self) -> Result<(), LinkError> {
            panic!("poller must not connect");
        }

        fn disconnect_request(&mut self) -> Result<(), LinkError> {
            panic!("poller must not disconnect");
        }

        fn query_status(&mut self) -> Result<LinkStatus, LinkError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_known_status() {
        let status = LinkStatus {
            state: WifiState::Completed,
            channel: 6,
            rssi: -52,
            ..Default::default()
        };
        let mut link = FixedLink(Ok(status.clone()));
        let poller = StatusPoller::new(Duration::from_millis(300));
        let polled = poller.poll_once(&mut link, PollReason::Final);
        assert_eq!(polled, Status::Known(status.clone()));
        assert_eq!(polled.link(), Some(&status));
    }

    #[test]
    fn test_query_failure_is_unknown() {
        let mut link = FixedLink(Err(LinkError::NoInterface));
        let poller = StatusPoller::new(Duration::from_millis(300));
        let polled = poller.poll_once(&mut link, PollReason::Progress);
        assert_eq!(polled, Status::Unknown);
        assert!(polled.link().is_none());
    }

    #[test]
    fn test_interval() {
        let poller = StatusPoller::new(Duration::from_millis(250));
        assert_eq!(poller.interval(), Duration::from_millis(250));
    }
}
