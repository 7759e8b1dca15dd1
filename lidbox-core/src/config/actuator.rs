//! Per-servo configuration
//!
//! Every angle handed to an actuator is clamped to `[0, limit]`, where the
//! limit is the configured maximum angle or the servo's 180° travel.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::SERVO_MAX_ANGLE;

/// Default milliseconds between steps on top of the mechanical floor
pub const DEFAULT_STEP_DELAY_MS: u16 = 15;

/// Default degrees per step
pub const DEFAULT_STEP_INTERVAL: u8 = 1;

/// Default guard angle for self-triggering actuators
///
/// Sits past the hand's calibrated end so its own press on the toggle never
/// stops the stroke.
pub const DEFAULT_SELF_TRIGGER_GUARD: u8 = 175;

/// Servo hardware and motion defaults, fixed at attach time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActuatorConfig {
    /// PWM output pin (diagnostic; the servo driver owns the real pin)
    pub pin: u8,
    /// Resting angle; the servo may only be powered off here
    pub home: u8,
    /// Optional mechanical limit below 180°
    pub max_angle: Option<u8>,
    /// Degrees per step when the caller gives none
    pub step_interval: u8,
    /// Extra milliseconds per step when the caller gives none
    pub step_delay_ms: u16,
    /// Whether switch changes abort moves in flight
    pub interruptable: bool,
    /// The actuator's own travel operates its switch
    pub self_triggering: bool,
    /// Below this angle a self-triggering actuator ignores switch changes
    pub self_trigger_guard: u8,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ActuatorConfig {
    /// Create a config with default motion parameters
    pub const fn new(pin: u8, home: u8) -> Self {
        Self {
            pin,
            home,
            max_angle: None,
            step_interval: DEFAULT_STEP_INTERVAL,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            interruptable: true,
            self_triggering: false,
            self_trigger_guard: DEFAULT_SELF_TRIGGER_GUARD,
        }
    }

    /// Mark the actuator as operating its own switch
    pub const fn self_triggering(mut self, guard: u8) -> Self {
        self.self_triggering = true;
        self.self_trigger_guard = guard;
        self
    }

    /// Set a mechanical limit
    pub const fn with_max_angle(mut self, max_angle: u8) -> Self {
        self.max_angle = Some(max_angle);
        self
    }

    /// Highest angle this actuator may be driven to
    pub fn limit(&self) -> u8 {
        self.max_angle.unwrap_or(SERVO_MAX_ANGLE).min(SERVO_MAX_ANGLE)
    }

    /// Clamp an angle into `[0, limit]`
    pub fn clamp(&self, angle: u8) -> u8 {
        angle.min(self.limit())
    }
}

/// Calibrated angles for the named positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Calibration {
    /// Retracted / closed
    pub start: u8,
    /// Fully extended / open
    pub end: u8,
    /// Intermediate stop
    pub pause: u8,
}

impl Calibration {
    /// Create a calibration
    pub const fn new(start: u8, end: u8, pause: u8) -> Self {
        Self { start, end, pause }
    }

    /// Clamp every position against an actuator's limit
    pub fn clamped(self, config: &ActuatorConfig) -> Self {
        Self {
            start: config.clamp(self.start),
            end: config.clamp(self.end),
            pause: config.clamp(self.pause),
        }
    }

    /// Check that every position is reachable
    pub fn fits(&self, config: &ActuatorConfig) -> bool {
        let limit = config.limit();
        self.start <= limit && self.end <= limit && self.pause <= limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_to_servo_travel() {
        let config = ActuatorConfig::new(2, 0);
        assert_eq!(config.limit(), 180);
        assert_eq!(config.clamp(200), 180);
        assert_eq!(config.clamp(90), 90);
    }

    #[test]
    fn test_limit_honours_max_angle() {
        let config = ActuatorConfig::new(2, 0).with_max_angle(120);
        assert_eq!(config.limit(), 120);
        assert_eq!(config.clamp(150), 120);

        // A limit above the servo travel is capped
        let config = ActuatorConfig::new(2, 0).with_max_angle(250);
        assert_eq!(config.limit(), 180);
    }

    #[test]
    fn test_self_triggering_builder() {
        let config = ActuatorConfig::new(3, 0).self_triggering(150);
        assert!(config.self_triggering);
        assert_eq!(config.self_trigger_guard, 150);
        assert!(config.interruptable);
    }

    #[test]
    fn test_calibration_clamped() {
        let config = ActuatorConfig::new(2, 0).with_max_angle(100);
        let cal = Calibration::new(0, 150, 60);
        assert!(!cal.fits(&config));

        let cal = cal.clamped(&config);
        assert_eq!(cal, Calibration::new(0, 100, 60));
        assert!(cal.fits(&config));
    }
}
