//! embedded-hal doubles for driver tests

use core::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType as DigitalErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, ErrorType as PwmErrorType, SetDutyCycle};
use lidbox_core::traits::Clock;

use crate::sensor::AdcReader;

/// Clock that is moved by hand, optionally ticking on every read
pub struct MockClock {
    now: Cell<u64>,
    tick: u64,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            tick: 0,
        }
    }

    /// Clock that advances `tick` ms each time it is read
    pub fn ticking(tick: u64) -> Self {
        Self {
            now: Cell::new(0),
            tick,
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.tick);
        now
    }
}

/// Input pin with a level that can be changed or made to fail
pub struct MockInput {
    pub high: bool,
    pub fail: bool,
}

impl MockInput {
    pub fn new(high: bool) -> Self {
        Self { high, fail: false }
    }
}

impl DigitalErrorType for MockInput {
    type Error = digital::ErrorKind;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            Err(digital::ErrorKind::Other)
        } else {
            Ok(self.high)
        }
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Output pin that remembers its level
pub struct MockOutput {
    pub high: bool,
}

impl MockOutput {
    pub fn new() -> Self {
        Self { high: false }
    }
}

impl DigitalErrorType for MockOutput {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// PWM channel recording every duty written
pub struct MockPwm {
    max: u16,
    pub duty: u16,
    pub history: Vec<u16>,
    pub fail: bool,
}

impl MockPwm {
    pub fn new(max: u16) -> Self {
        Self {
            max,
            duty: 0,
            history: Vec::new(),
            fail: false,
        }
    }
}

impl PwmErrorType for MockPwm {
    type Error = pwm::ErrorKind;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail {
            return Err(pwm::ErrorKind::Other);
        }
        self.duty = duty;
        self.history.push(duty);
        Ok(())
    }
}

/// ADC channel replaying queued conversions, then a fixed value
pub struct MockAdc {
    queued: VecDeque<Result<u16, ()>>,
    idle: u16,
    pub reads: usize,
}

impl MockAdc {
    pub fn new(samples: &[Result<u16, ()>], idle: u16) -> Self {
        Self {
            queued: samples.iter().copied().collect(),
            idle,
            reads: 0,
        }
    }
}

impl AdcReader for MockAdc {
    fn read(&mut self) -> Result<u16, ()> {
        self.reads += 1;
        self.queued.pop_front().unwrap_or(Ok(self.idle))
    }
}

/// Delay that only adds up the time it was asked to wait
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
