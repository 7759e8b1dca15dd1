//! Drive motor trait
//!
//! The drive motor moves the whole box. It is driven by a direction pin
//! and a PWM throttle pin (H-bridge style), with no speed feedback.

/// Drive direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorDirection {
    /// Direction pin high
    Forward,
    /// Direction pin low
    Backward,
}

impl MotorDirection {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            MotorDirection::Forward => MotorDirection::Backward,
            MotorDirection::Backward => MotorDirection::Forward,
        }
    }
}

/// Directional PWM motor driver
pub trait MotorDriver {
    /// Set the direction output high and apply `speed` as PWM duty (0-255)
    fn forward(&mut self, speed: u8);

    /// Set the direction output low and apply `speed` as PWM duty (0-255)
    fn backward(&mut self, speed: u8);

    /// Zero the PWM duty. The direction output is left as it was.
    fn halt(&mut self);

    /// Drive in `dir` at `speed`
    fn drive(&mut self, dir: MotorDirection, speed: u8) {
        match dir {
            MotorDirection::Forward => self.forward(speed),
            MotorDirection::Backward => self.backward(speed),
        }
    }
}

impl<M: MotorDriver + ?Sized> MotorDriver for &mut M {
    fn forward(&mut self, speed: u8) {
        (**self).forward(speed)
    }

    fn backward(&mut self, speed: u8) {
        (**self).backward(speed)
    }

    fn halt(&mut self) {
        (**self).halt()
    }
}
