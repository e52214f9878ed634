//! Telemetry client
//!
//! Publishes one sensor sample once the station is online. The sender is
//! never invoked before both the link and the address lease are up.

use core::fmt::Write;

use embassy_sync::blocking_mutex::raw::RawMutex;
use hal_abstractions::{Sample, Sensor, TelemetrySender};
use heapless::String;

use super::config::TelemetryConfig;
use super::error::TelemetryError;
use super::station::Station;

/// Encode buffer size for one JSON sample
pub const PAYLOAD_CAPACITY: usize = 64;

/// Encode `{"<field>":<value>}` with two decimals
pub fn encode_payload(
    field: &str,
    sample: &Sample,
) -> Result<String<PAYLOAD_CAPACITY>, core::fmt::Error> {
    let centis = sample.as_centis();
    let sign = if centis < 0 { "-" } else { "" };
    let abs = centis.unsigned_abs();

    let mut payload = String::new();
    write!(
        payload,
        "{{\"{}\":{}{}.{:02}}}",
        field,
        sign,
        abs / 100,
        abs % 100
    )?;
    Ok(payload)
}

pub struct TelemetryClient<S: Sensor, T: TelemetrySender> {
    sensor: S,
    sender: T,
    config: TelemetryConfig,
}

impl<S: Sensor, T: TelemetrySender> TelemetryClient<S, T> {
    pub fn new(sensor: S, sender: T, config: TelemetryConfig) -> Self {
        Self {
            sensor,
            sender,
            config,
        }
    }

    /// Wait for connectivity, read one sample and send it
    pub async fn publish_once<M: RawMutex>(
        &mut self,
        station: &Station<M>,
    ) -> Result<Sample, TelemetryError<S::Error>> {
        station.wait_for_ip().await;
        station.wait_until_online().await;
        info!("Wi-Fi connected, proceeding to fetch sensor data.");

        let sample = self.sensor.read().map_err(|e| {
            error!("Sensor sample update error");
            TelemetryError::Sensor(e)
        })?;
        info!("{}: {}.{:06}", self.config.field, sample.integer, sample.micros);

        let payload = encode_payload(self.config.field, &sample).map_err(|_| {
            error!("Payload does not fit {} bytes", PAYLOAD_CAPACITY);
            TelemetryError::Payload
        })?;

        self.sender.send(payload.as_bytes()).await.map_err(|e| {
            error!("Failed to send telemetry: {}", e);
            TelemetryError::Transport(e)
        })?;

        debug!("Sent {} bytes", payload.len());
        Ok(sample)
    }

    pub fn release(self) -> (S, T) {
        (self.sensor, self.sender)
    }
}
