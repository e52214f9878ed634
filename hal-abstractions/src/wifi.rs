//! Wi-Fi link layer requests and status

use heapless::String;

/// Longest SSID the link layer reports
pub const MAX_SSID_LEN: usize = 32;

/// Wi-Fi supplicant state, ordered by connection progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WifiState {
    Disconnected,
    InterfaceDisabled,
    #[default]
    Inactive,
    Scanning,
    Authenticating,
    Associating,
    Associated,
    FourWayHandshake,
    GroupHandshake,
    Completed,
    Unknown,
}

impl WifiState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "DISCONNECTED",
            Self::InterfaceDisabled => "INTERFACE_DISABLED",
            Self::Inactive => "INACTIVE",
            Self::Scanning => "SCANNING",
            Self::Authenticating => "AUTHENTICATING",
            Self::Associating => "ASSOCIATING",
            Self::Associated => "ASSOCIATED",
            Self::FourWayHandshake => "4WAY_HANDSHAKE",
            Self::GroupHandshake => "GROUP_HANDSHAKE",
            Self::Completed => "COMPLETED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether the BSS fields of a [`LinkStatus`] carry meaningful values
    pub fn is_associated(self) -> bool {
        self >= Self::Associated && self != Self::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceMode {
    #[default]
    Station,
    AccessPoint,
    Monitor,
    Unknown,
}

impl InterfaceMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Station => "STATION",
            Self::AccessPoint => "ACCESS POINT",
            Self::Monitor => "MONITOR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkMode {
    Wifi4,
    Wifi5,
    Wifi6,
    Wifi6E,
    #[default]
    Unknown,
}

impl LinkMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wifi4 => "WIFI 4 (802.11n/HT)",
            Self::Wifi5 => "WIFI 5 (802.11ac/VHT)",
            Self::Wifi6 => "WIFI 6 (802.11ax/HE)",
            Self::Wifi6E => "WIFI 6E (802.11ax 6GHz/HE)",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    Ghz2_4,
    Ghz5,
    Ghz6,
    #[default]
    Unknown,
}

impl Band {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ghz2_4 => "2.4GHz",
            Self::Ghz5 => "5GHz",
            Self::Ghz6 => "6GHz",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Security {
    #[default]
    Open,
    Wpa2Psk,
    Wpa2PskSha256,
    Wpa3Sae,
    WpaAutoPersonal,
    Eap,
    Unknown,
}

impl Security {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Wpa2Psk => "WPA2-PSK",
            Self::Wpa2PskSha256 => "WPA2-PSK-SHA256",
            Self::Wpa3Sae => "WPA3-SAE",
            Self::WpaAutoPersonal => "WPA/WPA2/WPA3 PSK",
            Self::Eap => "EAP",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Management frame protection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mfp {
    #[default]
    Disabled,
    Optional,
    Required,
    Unknown,
}

impl Mfp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "Disable",
            Self::Optional => "Optional",
            Self::Required => "Required",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Link-layer hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress(pub [u8; 6]);

impl core::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Snapshot of the interface as reported by the link layer
///
/// Everything after `state` only carries meaning once the station is
/// associated (see [`WifiState::is_associated`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    pub state: WifiState,
    pub iface_mode: InterfaceMode,
    pub link_mode: LinkMode,
    pub ssid: String<MAX_SSID_LEN>,
    pub bssid: MacAddress,
    pub band: Band,
    pub channel: u8,
    pub security: Security,
    pub mfp: Mfp,
    pub rssi: i8,
}

/// Link layer request errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No Wi-Fi interface is available
    NoInterface,
    /// The driver refused the request with an error code
    Rejected(i32),
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoInterface => write!(f, "No Wi-Fi interface"),
            Self::Rejected(code) => write!(f, "Request rejected ({})", code),
        }
    }
}

impl core::error::Error for LinkError {}

/// Requests understood by the Wi-Fi management layer
///
/// Connect and disconnect only *issue* a request. The outcome arrives later
/// as a `WIFI_CONNECT_RESULT` / `WIFI_DISCONNECT_RESULT` event.
pub trait LinkLayer {
    /// Ask the driver to connect using the stored network profile
    fn connect_request(&mut self) -> Result<(), LinkError>;

    /// Ask the driver to drop the current association
    fn disconnect_request(&mut self) -> Result<(), LinkError>;

    /// Synchronous status query, used for diagnostics only
    fn query_status(&mut self) -> Result<LinkStatus, LinkError>;
}

impl<T: LinkLayer + ?Sized> LinkLayer for &mut T {
    fn connect_request(&mut self) -> Result<(), LinkError> {
        (**self).connect_request()
    }

    fn disconnect_request(&mut self) -> Result<(), LinkError> {
        (**self).disconnect_request()
    }

    fn query_status(&mut self) -> Result<LinkStatus, LinkError> {
        (**self).query_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_associated_states() {
        assert!(!WifiState::Scanning.is_associated());
        assert!(!WifiState::Associating.is_associated());
        assert!(WifiState::Associated.is_associated());
        assert!(WifiState::Completed.is_associated());
        assert!(!WifiState::Unknown.is_associated());
    }

    #[test]
    fn test_mac_address_format() {
        let mac = MacAddress([0x02, 0x00, 0x00, 0x12, 0x34, 0xab]);
        assert_eq!(mac.to_string(), "02:00:00:12:34:ab");
    }

    #[test]
    fn test_default_status_is_not_associated() {
        let status = LinkStatus::default();
        assert_eq!(status.state, WifiState::Inactive);
        assert!(status.ssid.is_empty());
        assert!(!status.state.is_associated());
    }
}
