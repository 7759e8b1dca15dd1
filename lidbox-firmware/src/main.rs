//! lidbox - Useless Box Firmware
//!
//! Main firmware binary for RP2040-based useless boxes. Waits for the lid
//! toggle, then runs one behavior from the repertoire to switch it back off.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_time::{Delay, Timer};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use {defmt_rtt as _, panic_probe as _};

use lidbox_core::choreography::{Choreographer, Ensemble};
use lidbox_core::config::BoxConfig;
use lidbox_core::motion::ActuatorController;
use lidbox_core::traits::DebouncedSwitch;
use lidbox_drivers::motor::DcMotor;
use lidbox_drivers::sensor::AnalogProximity;
use lidbox_drivers::servo::{PwmServo, ServoTiming};
use lidbox_drivers::switch::DebounceButton;

use crate::board::{AdcChannel, EmbassyClock};

mod board;

/// Machine configuration validated and encoded by build.rs
static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/machine.bin"));

/// Idle time between switch polls
const POLL_INTERVAL_MS: u64 = 10;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("lidbox firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    board::check_wiring(&config);

    // Seed behavior selection from ADC noise before the ADC is handed out
    let mut adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let mut temp_channel = Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);
    let seed = board::noise_seed(&mut adc, &mut temp_channel);
    let rng = SmallRng::seed_from_u64(seed);
    debug!("RNG seed {=u64:x}", seed);

    // Lid toggle, shared by the door, the hand and this loop
    let toggle = RefCell::new(DebounceButton::new(
        Input::new(p.PIN_5, Pull::Down),
        EmbassyClock,
        &config.switch,
    ));

    // Door and hand share PWM slice 1, the flag has slice 2 to itself
    let (door_pwm, hand_pwm) =
        Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, board::servo_pwm_config()).split();
    let (flag_pwm, _) = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, board::servo_pwm_config()).split();
    let timing = ServoTiming::default();

    let mut door = ActuatorController::attach(
        "door",
        PwmServo::new(unwrap!(door_pwm), timing),
        Some(&toggle),
        Delay,
        config.door.actuator,
        config.door.calibration,
    );
    let mut hand = ActuatorController::attach(
        "hand",
        PwmServo::new(unwrap!(hand_pwm), timing),
        Some(&toggle),
        Delay,
        config.hand.actuator,
        config.hand.calibration,
    );
    let mut flag = ActuatorController::attach(
        "flag",
        PwmServo::new(unwrap!(flag_pwm), timing),
        None,
        Delay,
        config.flag.actuator,
        config.flag.calibration,
    );
    info!("Servos attached");

    let proximity_channel = Channel::new_pin(p.PIN_26, Pull::None);
    let mut detector = AnalogProximity::new(
        AdcChannel::new(adc, proximity_channel),
        EmbassyClock,
        Delay,
        config.proximity,
    );

    let (_, throttle) =
        Pwm::new_output_b(p.PWM_SLICE6, p.PIN_13, board::motor_pwm_config()).split();
    let mut motor = DcMotor::new(Output::new(p.PIN_12, Level::Low), unwrap!(throttle));
    info!("Sensor and motor initialized");

    let mut choreographer = Choreographer::new(
        Ensemble {
            door: &mut door,
            hand: &mut hand,
            flag: &mut flag,
            detector: &mut detector,
            motor: &mut motor,
        },
        Delay,
        rng,
        config.choreography,
    );

    info!("Waiting for the toggle");
    loop {
        let on = {
            let mut switch = toggle.borrow_mut();
            switch.update();
            switch.is_on()
        };

        if on {
            let behavior = choreographer.next();
            debug!("Finished {}", behavior.name());
        } else {
            Timer::after_millis(POLL_INTERVAL_MS).await;
        }
    }
}

/// Decode the embedded configuration, falling back to built-in defaults
fn load_config() -> BoxConfig {
    match BoxConfig::decode(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded configuration");
            config
        }
        Err(e) => {
            warn!("Embedded configuration rejected ({:?}), using defaults", e);
            BoxConfig::default()
        }
    }
}
