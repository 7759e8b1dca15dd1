//! Hobby servo on a PWM channel
//!
//! The channel is expected to run at the servo frame rate (50 Hz). Angles
//! map linearly onto pulse widths between `min_pulse_us` and
//! `max_pulse_us`. Detaching drives the output fully off so the servo
//! stops holding position and goes quiet.

use embedded_hal::pwm::SetDutyCycle;
use lidbox_core::traits::{ServoOutput, SERVO_MAX_ANGLE};

/// Pulse timing for one servo model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoTiming {
    /// Pulse width at 0°
    pub min_pulse_us: u16,
    /// Pulse width at 180°
    pub max_pulse_us: u16,
    /// PWM period (20 ms at 50 Hz)
    pub period_us: u16,
}

impl Default for ServoTiming {
    fn default() -> Self {
        Self {
            min_pulse_us: 544,
            max_pulse_us: 2400,
            period_us: 20_000,
        }
    }
}

impl ServoTiming {
    /// Pulse width for an angle, clamped to the servo's range
    pub fn pulse_us(&self, angle: u8) -> u16 {
        let angle = u32::from(angle.min(SERVO_MAX_ANGLE));
        let span = u32::from(self.max_pulse_us.saturating_sub(self.min_pulse_us));
        let pulse = u32::from(self.min_pulse_us) + span * angle / u32::from(SERVO_MAX_ANGLE);
        pulse as u16
    }

    /// Duty value for an angle on a channel with the given full scale
    pub fn duty(&self, angle: u8, max_duty: u16) -> u16 {
        let period = u32::from(self.period_us.max(1));
        let duty = u32::from(self.pulse_us(angle)) * u32::from(max_duty) / period;
        duty.min(u32::from(max_duty)) as u16
    }
}

/// Servo driven by a 50 Hz PWM output
pub struct PwmServo<PWM> {
    pwm: PWM,
    timing: ServoTiming,
    angle: u8,
    attached: bool,
    faults: u32,
}

impl<PWM: SetDutyCycle> PwmServo<PWM> {
    /// Create a detached servo
    ///
    /// The output is switched off until `attach()`. The remembered angle
    /// starts at mid-travel.
    pub fn new(pwm: PWM, timing: ServoTiming) -> Self {
        let mut servo = Self {
            pwm,
            timing,
            angle: SERVO_MAX_ANGLE / 2,
            attached: false,
            faults: 0,
        };
        servo.output_off();
        servo
    }

    /// Pulse timing in use
    pub fn timing(&self) -> &ServoTiming {
        &self.timing
    }

    /// Number of duty writes the PWM peripheral rejected
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    fn record(&mut self, result: Result<(), PWM::Error>) {
        if result.is_err() {
            self.faults = self.faults.saturating_add(1);
            warn!("Servo PWM write failed ({} so far)", self.faults);
        }
    }

    fn output_pulse(&mut self) {
        let duty = self.timing.duty(self.angle, self.pwm.max_duty_cycle());
        let result = self.pwm.set_duty_cycle(duty);
        self.record(result);
    }

    fn output_off(&mut self) {
        let result = self.pwm.set_duty_cycle_fully_off();
        self.record(result);
    }
}

impl<PWM: SetDutyCycle> ServoOutput for PwmServo<PWM> {
    fn write(&mut self, angle: u8) {
        self.angle = angle.min(SERVO_MAX_ANGLE);
        if self.attached {
            self.output_pulse();
        }
    }

    fn read(&self) -> u8 {
        self.angle
    }

    fn attach(&mut self) {
        self.attached = true;
        self.output_pulse();
    }

    fn detach(&mut self) {
        self.attached = false;
        self.output_off();
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}
