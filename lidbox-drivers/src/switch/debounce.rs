//! Time-based debounce for the lid toggle
//!
//! A raw level is accepted as the stable level once it has been read
//! unchanged for the settle window. Every change in the raw reading
//! restarts the window, so contact bounce never reaches the stable level.
//!
//! ```ignore
//! let mut toggle = DebounceButton::new(pin, clock, &SwitchConfig::default());
//!
//! loop {
//!     toggle.update();
//!     if toggle.is_on() {
//!         // ...
//!     }
//! }
//! ```

use embedded_hal::digital::InputPin;
use lidbox_core::config::SwitchConfig;
use lidbox_core::traits::{Clock, DebouncedSwitch, Level};

/// Settle window used by the physical build
pub const DEFAULT_SETTLE_MS: u16 = 50;

/// Debounced switch on a digital input pin
pub struct DebounceButton<P, C> {
    pin: P,
    clock: C,
    settle_ms: u64,
    /// Report "on" when the pin reads low
    inverted: bool,
    /// Last raw reading
    raw: Level,
    /// When the raw reading last changed
    raw_since_ms: u64,
    /// Accepted level
    stable: Level,
}

impl<P: InputPin, C: Clock> DebounceButton<P, C> {
    /// Create a debounced switch
    ///
    /// The stable level starts low until the pin has held a level for the
    /// settle window.
    pub fn new(pin: P, clock: C, config: &SwitchConfig) -> Self {
        let raw_since_ms = clock.now_ms();
        Self {
            pin,
            clock,
            settle_ms: u64::from(config.settle_ms),
            inverted: config.inverted,
            raw: Level::Low,
            raw_since_ms,
            stable: Level::Low,
        }
    }

    /// Last raw level seen, before debouncing
    pub fn raw(&self) -> Level {
        self.raw
    }

    /// Release the pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    fn sample(&mut self) -> Option<Level> {
        let high = if self.inverted {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        high.ok().map(Level::from_high)
    }
}

impl<P: InputPin, C: Clock> DebouncedSwitch for DebounceButton<P, C> {
    fn update(&mut self) -> bool {
        // A failed read is treated as no new information
        let Some(reading) = self.sample() else {
            return false;
        };
        let now = self.clock.now_ms();

        if reading != self.raw {
            self.raw = reading;
            self.raw_since_ms = now;
        }

        if reading != self.stable && now.saturating_sub(self.raw_since_ms) >= self.settle_ms {
            self.stable = reading;
            return true;
        }

        false
    }

    fn read(&self) -> Level {
        self.stable
    }
}
