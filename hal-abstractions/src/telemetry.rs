//! Telemetry delivery
//!
//! The sender owns the whole transport (socket, TLS session, HTTP framing).
//! Callers hand it a finished payload.

/// Transport errors reported by a [`TelemetrySender`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Socket creation failed
    Socket,
    /// TLS credentials or session setup failed
    Tls,
    /// Connection to the endpoint failed
    Connect,
    /// Sending the request failed
    Send,
    /// Receiving the response failed
    Receive,
    /// Endpoint answered with an error status
    Rejected(u16),
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Socket => write!(f, "Socket error"),
            Self::Tls => write!(f, "TLS setup failed"),
            Self::Connect => write!(f, "Connect failed"),
            Self::Send => write!(f, "Send failed"),
            Self::Receive => write!(f, "Receive failed"),
            Self::Rejected(status) => write!(f, "Endpoint rejected payload ({})", status),
        }
    }
}

impl core::error::Error for TransportError {}

impl embedded_io_async::Error for TransportError {
    fn kind(&self) -> embedded_io_async::ErrorKind {
        match self {
            Self::Socket | Self::Send => embedded_io_async::ErrorKind::BrokenPipe,
            Self::Connect => embedded_io_async::ErrorKind::ConnectionRefused,
            Self::Receive => embedded_io_async::ErrorKind::InvalidData,
            _ => embedded_io_async::ErrorKind::Other,
        }
    }
}

/// Delivers one payload to the remote endpoint
///
/// # Example Implementation
/// ```ignore
/// struct HttpsPost { host: &'static str, path: &'static str }
///
/// impl TelemetrySender for HttpsPost {
///     async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
///         // Open TLS socket, POST payload, read status line
///     }
/// }
/// ```
pub trait TelemetrySender {
    fn send(
        &mut self,
        payload: &[u8],
    ) -> impl core::future::Future<Output = Result<(), TransportError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io_async::{Error, ErrorKind};

    #[test]
    fn test_error_kinds() {
        assert_eq!(TransportError::Send.kind(), ErrorKind::BrokenPipe);
        assert_eq!(TransportError::Connect.kind(), ErrorKind::ConnectionRefused);
        assert_eq!(TransportError::Rejected(500).kind(), ErrorKind::Other);
    }
}
