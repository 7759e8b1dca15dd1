//! DC drive motor on an H-bridge
//!
//! One digital output selects the direction and one PWM channel sets the
//! throttle. Speed is the raw 0-255 duty the choreography asks for; there
//! is no ramping or feedback.
//!
//! ```ignore
//! let mut motor = DcMotor::new(dir_pin, throttle_pwm);
//! motor.forward(100);
//! delay.delay_ms(300);
//! motor.halt();
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use lidbox_core::traits::{MotorDirection, MotorDriver};

/// Full-scale speed value
pub const MAX_SPEED: u8 = u8::MAX;

/// What the motor was last told to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcMotorState {
    Stopped,
    Running { direction: MotorDirection, speed: u8 },
}

/// Direction pin plus PWM throttle
pub struct DcMotor<DIR, PWM> {
    direction_pin: DIR,
    throttle: PWM,
    state: DcMotorState,
    faults: u32,
}

impl<DIR: OutputPin, PWM: SetDutyCycle> DcMotor<DIR, PWM> {
    /// Create a motor driver with the throttle off
    pub fn new(direction_pin: DIR, throttle: PWM) -> Self {
        let mut motor = Self {
            direction_pin,
            throttle,
            state: DcMotorState::Stopped,
            faults: 0,
        };
        motor.halt();
        motor
    }

    /// Get the current motor state
    pub fn state(&self) -> DcMotorState {
        self.state
    }

    /// Check if the throttle is open
    pub fn is_running(&self) -> bool {
        matches!(self.state, DcMotorState::Running { speed, .. } if speed > 0)
    }

    /// Number of pin or PWM writes that failed
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    fn run(&mut self, direction: MotorDirection, speed: u8) {
        let pin = match direction {
            MotorDirection::Forward => self.direction_pin.set_high(),
            MotorDirection::Backward => self.direction_pin.set_low(),
        };
        let duty = self
            .throttle
            .set_duty_cycle_fraction(u16::from(speed), u16::from(MAX_SPEED));

        if pin.is_err() || duty.is_err() {
            self.faults = self.faults.saturating_add(1);
            warn!("Drive motor write failed ({} so far)", self.faults);
        }
        debug!("Drive motor {} at {}", direction, speed);

        self.state = if speed == 0 {
            DcMotorState::Stopped
        } else {
            DcMotorState::Running { direction, speed }
        };
    }
}

impl<DIR: OutputPin, PWM: SetDutyCycle> MotorDriver for DcMotor<DIR, PWM> {
    fn forward(&mut self, speed: u8) {
        self.run(MotorDirection::Forward, speed);
    }

    fn backward(&mut self, speed: u8) {
        self.run(MotorDirection::Backward, speed);
    }

    fn halt(&mut self) {
        if self.throttle.set_duty_cycle_fully_off().is_err() {
            self.faults = self.faults.saturating_add(1);
        }
        self.state = DcMotorState::Stopped;
    }
}
