//! Hardware abstraction traits
//!
//! These traits define the interface between the motion/choreography
//! logic and hardware-specific implementations.

pub mod clock;
pub mod motor;
pub mod sensor;
pub mod servo;
pub mod switch;

pub use clock::Clock;
pub use motor::{MotorDirection, MotorDriver};
pub use sensor::ProximityDetector;
pub use servo::{ServoOutput, SERVO_MAX_ANGLE};
pub use switch::{DebouncedSwitch, Level};
