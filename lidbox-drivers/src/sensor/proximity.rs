//! Analog proximity detector
//!
//! An IR distance sensor in front of the box. Something moving in front of
//! it shows up as a jump in the raw reading; something right in front of it
//! pushes the reading over a fixed ceiling.

use embedded_hal::delay::DelayNs;
use lidbox_core::config::ProximityConfig;
use lidbox_core::traits::{Clock, ProximityDetector};

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read one raw conversion (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

impl<A: AdcReader + ?Sized> AdcReader for &mut A {
    fn read(&mut self) -> Result<u16, ()> {
        (**self).read()
    }
}

/// Movement detector on an analog distance sensor
pub struct AnalogProximity<A, C, D> {
    adc: A,
    clock: C,
    delay: D,
    config: ProximityConfig,
}

impl<A, C, D> AnalogProximity<A, C, D> {
    pub fn new(adc: A, clock: C, delay: D, config: ProximityConfig) -> Self {
        Self {
            adc,
            clock,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }
}

impl<A: AdcReader, C: Clock, D: DelayNs> AnalogProximity<A, C, D> {
    /// Sample until the window closes, looking for an excursion
    ///
    /// The first good sample is the baseline. Failed conversions are skipped.
    fn watch(&mut self, threshold: u16) -> bool {
        let window = u64::from(self.config.window_ms);
        let started = self.clock.now_ms();
        let mut baseline = None;

        while self.clock.elapsed_ms(started) <= window {
            let Ok(sample) = self.adc.read() else {
                continue;
            };

            if sample > self.config.ceiling {
                return true;
            }

            match baseline {
                None => baseline = Some(sample),
                Some(first) if sample.abs_diff(first) > threshold => return true,
                Some(_) => {}
            }
        }

        false
    }
}

impl<A: AdcReader, C: Clock, D: DelayNs> ProximityDetector for AnalogProximity<A, C, D> {
    fn detect(&mut self, threshold: u16) -> bool {
        // The door has just opened and the reading needs to settle
        self.delay.delay_ms(u32::from(self.config.settle_ms));
        self.watch(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockAdc, MockClock, MockDelay};

    fn detector(adc: MockAdc, clock: &MockClock) -> AnalogProximity<MockAdc, &MockClock, MockDelay> {
        AnalogProximity::new(adc, clock, MockDelay::new(), ProximityConfig::default())
    }

    #[test]
    fn test_steady_reading_is_nobody() {
        let clock = MockClock::ticking(1);
        let mut sensor = detector(MockAdc::new(&[], 120), &clock);

        assert!(!sensor.detect(20));
        assert_eq!(sensor.delay.total_ms(), 1200);
        assert!(sensor.adc.reads > 100);
    }

    #[test]
    fn test_jump_up_detected() {
        let clock = MockClock::ticking(1);
        let mut sensor = detector(MockAdc::new(&[Ok(100), Ok(105), Ok(121)], 100), &clock);
        assert!(sensor.detect(20));
        assert_eq!(sensor.adc.reads, 3);
    }

    #[test]
    fn test_jump_down_detected() {
        let clock = MockClock::ticking(1);
        let mut sensor = detector(MockAdc::new(&[Ok(200), Ok(179)], 200), &clock);
        assert!(sensor.detect(20));
    }

    #[test]
    fn test_deviation_at_threshold_ignored() {
        let clock = MockClock::ticking(1);
        let mut sensor = detector(MockAdc::new(&[Ok(100), Ok(120), Ok(80)], 100), &clock);
        assert!(!sensor.detect(20));
    }

    #[test]
    fn test_ceiling_always_detected() {
        let clock = MockClock::ticking(1);
        let mut sensor = detector(MockAdc::new(&[Ok(301)], 301), &clock);
        assert!(sensor.detect(u16::MAX));
    }

    #[test]
    fn test_failed_reads_skipped() {
        let clock = MockClock::ticking(1);
        let mut sensor = detector(MockAdc::new(&[Err(()), Ok(100), Err(()), Ok(150)], 100), &clock);
        assert!(sensor.detect(20));
        assert_eq!(sensor.adc.reads, 4);
    }

    #[test]
    fn test_window_bounds_sampling() {
        let clock = MockClock::ticking(10);
        let config = ProximityConfig {
            window_ms: 50,
            settle_ms: 0,
            ..Default::default()
        };
        let mut sensor = AnalogProximity::new(MockAdc::new(&[], 90), &clock, MockDelay::new(), config);
        assert!(!sensor.detect(5));
        // Reads at 10, 20, 30, 40, 50 ms after start
        assert_eq!(sensor.adc.reads, 5);
    }
}
