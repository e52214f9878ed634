//! Sensor sample acquisition

/// Fixed-point sensor reading: `integer + micros / 1_000_000`
///
/// Both parts carry the sign of the value, so -0.5 is `{ integer: 0, micros: -500_000 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub integer: i32,
    pub micros: i32,
}

impl Sample {
    pub const fn new(integer: i32, micros: i32) -> Self {
        Self { integer, micros }
    }

    /// Value in millionths
    pub const fn as_micros(&self) -> i64 {
        self.integer as i64 * 1_000_000 + self.micros as i64
    }

    /// Value in hundredths, rounded half away from zero
    pub const fn as_centis(&self) -> i64 {
        let micros = self.as_micros();
        if micros < 0 {
            (micros - 5_000) / 10_000
        } else {
            (micros + 5_000) / 10_000
        }
    }
}

/// A sensor that produces one sample per synchronous read
pub trait Sensor {
    type Error: core::fmt::Debug;

    fn read(&mut self) -> Result<Sample, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_micros() {
        assert_eq!(Sample::new(21, 500_000).as_micros(), 21_500_000);
        assert_eq!(Sample::new(-3, -250_000).as_micros(), -3_250_000);
    }

    #[test]
    fn test_sample_centis_rounding() {
        assert_eq!(Sample::new(21, 504_999).as_centis(), 2150);
        assert_eq!(Sample::new(21, 505_000).as_centis(), 2151);
        assert_eq!(Sample::new(0, -5_000).as_centis(), -1);
        assert_eq!(Sample::new(-1, -994_999).as_centis(), -199);
    }
}
