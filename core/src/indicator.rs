//! Link indicator LED
//!
//! Blinks while the station is connected, stays dark otherwise.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::StatefulOutputPin;

use crate::network::Station;

/// Half-period of the connected blink
pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(100);

/// Advance the LED by one step
pub fn drive_indicator<P: StatefulOutputPin>(pin: &mut P, connected: bool) -> Result<(), P::Error> {
    if connected {
        pin.toggle()
    } else {
        pin.set_low()
    }
}

/// Indicator task; never returns
pub async fn run_link_indicator<M: RawMutex, P: StatefulOutputPin>(
    station: &Station<M>,
    mut pin: P,
    period: Duration,
) -> ! {
    info!("Link indicator task started");
    loop {
        if drive_indicator(&mut pin, station.is_connected()).is_err() {
            warn!("Indicator pin write failed");
        }
        Timer::after(period).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Outcome, StationConfig};
    use core::cell::Cell;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_time::with_timeout;
    use embedded_hal::digital::{ErrorType, OutputPin};

    #[derive(Default)]
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    impl StatefulOutputPin for MockPin {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_toggles_while_connected() {
        let mut pin = MockPin::default();
        drive_indicator(&mut pin, true).unwrap();
        assert!(pin.high);
        drive_indicator(&mut pin, true).unwrap();
        assert!(!pin.high);
        drive_indicator(&mut pin, true).unwrap();
        assert!(pin.high);
    }

    #[test]
    fn test_dark_while_disconnected() {
        let mut pin = MockPin {
            high: true,
            writes: 0,
        };
        drive_indicator(&mut pin, false).unwrap();
        assert!(!pin.high);
        drive_indicator(&mut pin, false).unwrap();
        assert!(!pin.high);
        assert_eq!(pin.writes, 2);
    }

    /// Pin whose state stays observable while the task owns it
    struct SharedPin<'a> {
        high: &'a Cell<bool>,
        writes: &'a Cell<u32>,
    }

    impl ErrorType for SharedPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for SharedPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high.set(false);
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high.set(true);
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    impl StatefulOutputPin for SharedPin<'_> {
        fn is_set_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high.get())
        }

        fn is_set_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high.get())
        }
    }

    #[test]
    fn test_task_blinks_while_connected() {
        let station: Station<CriticalSectionRawMutex> = Station::new(StationConfig::DEFAULT);
        station.update(|sm| {
            sm.issue_connect().unwrap();
            sm.on_connect_result(Outcome::Success);
        });
        let high = Cell::new(false);
        let writes = Cell::new(0);
        let pin = SharedPin {
            high: &high,
            writes: &writes,
        };

        let task = run_link_indicator(&station, pin, Duration::from_millis(2));
        assert!(block_on(with_timeout(Duration::from_millis(40), task)).is_err());
        assert!(writes.get() >= 3);
    }

    #[test]
    fn test_default_period() {
        assert_eq!(DEFAULT_BLINK_PERIOD, Duration::from_millis(100));
    }
}
