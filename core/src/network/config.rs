//! Network configuration structures

use embassy_time::Duration;

/// What happens to the leased address when the link goes down
///
/// The management layer never reports an address loss on its own, so the
/// choice is left to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IpReleasePolicy {
    /// Keep `ip_assigned` once set; a new bind only re-confirms it
    #[default]
    Retain,
    /// Clear `ip_assigned` whenever the station returns to `Idle` from a live link
    ClearOnDisconnect,
}

/// Connectivity controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StationConfig {
    /// Status query cadence while a connect attempt is outstanding
    pub status_poll_interval: Duration,
    /// Cadence at which consumers re-check the connectivity predicates
    pub online_poll_interval: Duration,
    pub ip_policy: IpReleasePolicy,
}

impl StationConfig {
    pub const DEFAULT: Self = Self {
        status_poll_interval: Duration::from_millis(300),
        online_poll_interval: Duration::from_millis(500),
        ip_policy: IpReleasePolicy::Retain,
    };
}

impl Default for StationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Telemetry payload configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryConfig {
    /// JSON field name carrying the sample value
    pub field: &'static str,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            field: "temperature",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StationConfig::default();
        assert_eq!(config.status_poll_interval, Duration::from_millis(300));
        assert_eq!(config.online_poll_interval, Duration::from_millis(500));
        assert_eq!(config.ip_policy, IpReleasePolicy::Retain);
    }

    #[test]
    fn test_default_telemetry_config() {
        assert_eq!(TelemetryConfig::default().field, "temperature");
    }
}
