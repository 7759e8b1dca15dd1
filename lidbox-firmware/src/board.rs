//! Board glue: embassy-rp peripherals behind the lidbox traits
//!
//! Pin assignments are board-specific and fixed here; machine.toml pins
//! are checked against them at boot.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::pwm::Config as PwmConfig;
use embassy_time::Instant;
use lidbox_core::config::BoxConfig;
use lidbox_core::traits::Clock;
use lidbox_drivers::sensor::AdcReader;

pub const DOOR_PIN: u8 = 2;
pub const HAND_PIN: u8 = 3;
pub const FLAG_PIN: u8 = 4;
pub const SWITCH_PIN: u8 = 5;
pub const MOTOR_DIR_PIN: u8 = 12;
pub const MOTOR_PWM_PIN: u8 = 13;
pub const PROXIMITY_PIN: u8 = 26;

/// Servo frame rate
const SERVO_FREQ_HZ: u32 = 50;

/// Servo PWM clock divider (keeps `top` within 16 bits at 125 MHz)
const SERVO_DIVIDER: u8 = 64;

/// Monotonic clock backed by the embassy time driver
#[derive(Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// One ADC channel read in blocking mode
pub struct AdcChannel<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> AdcChannel<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for AdcChannel<'_> {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc.blocking_read(&mut self.channel).map_err(|_| ())
    }
}

/// Fold the noisy low bits of repeated conversions into an RNG seed
pub fn noise_seed(adc: &mut Adc<'_, Blocking>, channel: &mut Channel<'_>) -> u64 {
    let mut seed = 0u64;
    for _ in 0..64 {
        if let Ok(sample) = adc.blocking_read(channel) {
            seed = seed.rotate_left(5) ^ u64::from(sample);
        }
    }
    seed ^ Instant::now().as_ticks()
}

/// 50 Hz PWM with both outputs off
pub fn servo_pwm_config() -> PwmConfig {
    let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();
    let period = (clock_freq_hz / (SERVO_FREQ_HZ * u32::from(SERVO_DIVIDER))) as u16 - 1;

    let mut config = PwmConfig::default();
    config.divider = SERVO_DIVIDER.into();
    config.top = period;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Motor throttle PWM, one count per speed step
pub fn motor_pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = 125u8.into();
    config.top = u16::from(u8::MAX);
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Warn about configured pins that differ from the board wiring
pub fn check_wiring(config: &BoxConfig) {
    let pairs = [
        ("door", config.door.actuator.pin, DOOR_PIN),
        ("hand", config.hand.actuator.pin, HAND_PIN),
        ("flag", config.flag.actuator.pin, FLAG_PIN),
        ("switch", config.switch.pin, SWITCH_PIN),
        ("proximity", config.proximity.pin, PROXIMITY_PIN),
        ("motor dir", config.motor.direction_pin, MOTOR_DIR_PIN),
        ("motor pwm", config.motor.pwm_pin, MOTOR_PWM_PIN),
    ];

    for (name, configured, wired) in pairs {
        if configured != wired {
            defmt::warn!(
                "{} configured on GPIO{} but wired to GPIO{}",
                name,
                configured,
                wired
            );
        }
    }
}
