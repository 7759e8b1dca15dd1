//! Whole-machine configuration
//!
//! Defaults describe the reference build: door and hand on the lid side,
//! a small flag servo, one toggle switch on top, an IR distance sensor on
//! the front and a single drive motor.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::actuator::{ActuatorConfig, Calibration, DEFAULT_SELF_TRIGGER_GUARD};

/// Size of the buffer needed to hold an encoded [`BoxConfig`]
pub const MAX_ENCODED_LEN: usize = 128;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A calibration angle is beyond the actuator's limit
    CalibrationOutOfRange(ServoRole),
    /// The home angle is beyond the actuator's limit
    HomeOutOfRange(ServoRole),
    /// The same GPIO is assigned twice
    PinConflict(u8),
    /// The proximity observation window is empty
    EmptyObservationWindow,
    /// Postcard encoding failed (buffer too small)
    Encode,
    /// Postcard decoding failed
    Decode,
}

/// Which servo a setting belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ServoRole {
    Door,
    Hand,
    Flag,
}

impl ServoRole {
    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            ServoRole::Door => "door",
            ServoRole::Hand => "hand",
            ServoRole::Flag => "flag",
        }
    }
}

/// One servo: hardware settings plus calibrated positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ServoSlot {
    pub actuator: ActuatorConfig,
    pub calibration: Calibration,
}

/// Toggle switch settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SwitchConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Time the raw reading must hold before it is accepted
    pub settle_ms: u16,
    /// Switch reads "on" when the pin is low
    pub inverted: bool,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            pin: 5,
            settle_ms: 50,
            inverted: false,
        }
    }
}

/// Proximity sensor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProximityConfig {
    /// ADC pin number
    pub pin: u8,
    /// How long to watch for movement after settling
    pub window_ms: u16,
    /// Blocking wait before the first sample (door just opened)
    pub settle_ms: u16,
    /// Raw reading above which something is right in front of the box
    pub ceiling: u16,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            pin: 26,
            window_ms: 200,
            settle_ms: 1200,
            ceiling: 300,
        }
    }
}

/// Drive motor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotorConfig {
    /// Direction output pin
    pub direction_pin: u8,
    /// PWM throttle pin
    pub pwm_pin: u8,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            direction_pin: 12,
            pwm_pin: 13,
        }
    }
}

/// Choreography tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChoreographyConfig {
    /// Pick behaviors at random instead of in order
    pub randomize: bool,
    /// Raw deviation the proximity sensor must see to count as movement
    pub proximity_threshold: u16,
    /// Drive motor duty when running away
    pub drive_speed: u8,
    /// How long the box drives away
    pub drive_ms: u16,
}

impl Default for ChoreographyConfig {
    fn default() -> Self {
        Self {
            randomize: false,
            proximity_threshold: 20,
            drive_speed: 100,
            drive_ms: 300,
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoxConfig {
    pub door: ServoSlot,
    pub hand: ServoSlot,
    pub flag: ServoSlot,
    pub switch: SwitchConfig,
    pub proximity: ProximityConfig,
    pub motor: MotorConfig,
    pub choreography: ChoreographyConfig,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            door: ServoSlot {
                actuator: ActuatorConfig::new(2, 0),
                calibration: Calibration::new(0, 110, 60),
            },
            hand: ServoSlot {
                // The hand's own stroke flips the toggle it is guarding
                actuator: ActuatorConfig::new(3, 0).self_triggering(DEFAULT_SELF_TRIGGER_GUARD),
                calibration: Calibration::new(0, 170, 90),
            },
            flag: ServoSlot {
                actuator: ActuatorConfig::new(4, 0).with_max_angle(150),
                calibration: Calibration::new(0, 130, 70),
            },
            switch: SwitchConfig::default(),
            proximity: ProximityConfig::default(),
            motor: MotorConfig::default(),
            choreography: ChoreographyConfig::default(),
        }
    }
}

impl BoxConfig {
    /// Servo slot for a role
    pub fn servo(&self, role: ServoRole) -> &ServoSlot {
        match role {
            ServoRole::Door => &self.door,
            ServoRole::Hand => &self.hand,
            ServoRole::Flag => &self.flag,
        }
    }

    /// Check the configuration for values the hardware cannot honour
    ///
    /// Out-of-range angles would be clamped at runtime anyway; rejecting
    /// them here catches calibration typos before they reach the box.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in [ServoRole::Door, ServoRole::Hand, ServoRole::Flag] {
            let slot = self.servo(role);
            if slot.actuator.home > slot.actuator.limit() {
                return Err(ConfigError::HomeOutOfRange(role));
            }
            if !slot.calibration.fits(&slot.actuator) {
                return Err(ConfigError::CalibrationOutOfRange(role));
            }
        }

        if self.proximity.window_ms == 0 {
            return Err(ConfigError::EmptyObservationWindow);
        }

        let pins = [
            self.door.actuator.pin,
            self.hand.actuator.pin,
            self.flag.actuator.pin,
            self.switch.pin,
            self.proximity.pin,
            self.motor.direction_pin,
            self.motor.pwm_pin,
        ];
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::PinConflict(*pin));
            }
        }

        Ok(())
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize and validate
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}
