//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in lidbox-core, built on
//! embedded-hal 1.0 so they run against any HAL:
//!
//! - Switch: time-based debounce over an `InputPin`
//! - Sensor: analog proximity detector over an ADC channel
//! - Motor: direction pin plus PWM throttle
//! - Servo: 50 Hz hobby servo pulses on a PWM channel

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod motor;
pub mod sensor;
pub mod servo;
pub mod switch;

#[cfg(test)]
pub(crate) mod mock;
