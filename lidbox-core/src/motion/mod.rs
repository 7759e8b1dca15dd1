//! Servo motion
//!
//! Stepwise, interruptable movement between calibrated positions.
//! A move walks the servo a few degrees at a time and re-samples the
//! guarding switch between steps, so flipping the switch mid-travel stops
//! the actuator where it is.

pub mod actuator;
pub mod controller;
pub mod direction;

pub use actuator::Actuator;
pub use controller::{ActuatorController, MoveOutcome, MECHANICAL_MS_PER_STEP};
pub use direction::{MoveDirection, UnknownDirection};
