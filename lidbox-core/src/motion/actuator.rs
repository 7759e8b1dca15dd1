//! Actuator trait used by the choreographer

use super::controller::MoveOutcome;
use super::direction::MoveDirection;

/// A servo-driven element the choreographer can script
///
/// [`ActuatorController`](super::ActuatorController) is the hardware
/// implementation; the trait keeps choreography testable without servos.
pub trait Actuator {
    /// Diagnostic name
    fn name(&self) -> &'static str;

    /// Named move with the configured default interval and step delay
    fn move_dir(&mut self, direction: MoveDirection) -> MoveOutcome;

    /// Named move with an explicit interval (degrees per step) and step delay
    fn move_dir_with(&mut self, direction: MoveDirection, interval: u8, speed_ms: u16)
        -> MoveOutcome;

    /// Move between two absolute angles
    fn move_between(&mut self, from: u8, to: u8, interval: u8, speed_ms: u16) -> MoveOutcome;

    /// Jump straight to an angle and remember it as the custom position
    fn set_to(&mut self, angle: u8);

    /// Calibrated end angle
    fn end_angle(&self) -> u8;

    /// Power the servo back on
    fn reattach(&mut self);

    /// Let the servo settle at home, then power it off
    fn wait_and_detach(&mut self);
}
