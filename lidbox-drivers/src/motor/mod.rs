//! Motor driver implementations
//!
//! The drive motor sits behind an H-bridge with one direction input and one
//! PWM throttle input.

pub mod dc;

pub use dc::{DcMotor, DcMotorState};
