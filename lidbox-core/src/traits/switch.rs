//! Debounced digital input trait

use core::cell::RefCell;

/// Logical level of a digital input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Level for a boolean "is high" reading
    pub fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Check if the level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Digital input filtered against contact bounce
///
/// `update()` samples the raw pin; a new level is only accepted once the
/// raw reading has held steady for the settle window. `read()` returns the
/// last accepted level and never touches the hardware.
pub trait DebouncedSwitch {
    /// Sample the raw input. Returns true if the stable level changed.
    fn update(&mut self) -> bool;

    /// Last accepted stable level
    fn read(&self) -> Level;

    /// Check if the switch is on (stable level high)
    fn is_on(&self) -> bool {
        self.read() == Level::High
    }
}

/// A shared switch: one physical toggle can guard several actuators.
impl<S: DebouncedSwitch> DebouncedSwitch for &RefCell<S> {
    fn update(&mut self) -> bool {
        self.borrow_mut().update()
    }

    fn read(&self) -> Level {
        self.borrow().read()
    }
}
