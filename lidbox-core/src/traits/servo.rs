//! Hobby servo output trait

/// Largest angle a standard hobby servo accepts
pub const SERVO_MAX_ANGLE: u8 = 180;

/// Positional servo output
///
/// Implementations remember the last angle written so the motion layer
/// can resume from wherever the servo was actually left, including after
/// an aborted move.
pub trait ServoOutput {
    /// Command the servo to an absolute angle in degrees
    fn write(&mut self, angle: u8);

    /// Last angle written (the commanded position, not a measurement)
    fn read(&self) -> u8;

    /// Start driving the control signal again
    fn attach(&mut self);

    /// Stop driving the control signal so the servo goes limp and quiet
    fn detach(&mut self);

    /// Whether the control signal is currently driven
    fn is_attached(&self) -> bool;
}
