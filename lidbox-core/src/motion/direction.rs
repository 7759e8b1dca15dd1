//! Named moves between calibrated positions

use crate::config::Calibration;

/// A move between two named positions
///
/// The `Custom*` variants start from the last angle set with
/// [`set_to`](super::Actuator::set_to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MoveDirection {
    StartEnd = 0,
    StartPause = 1,
    EndStart = 2,
    EndPause = 3,
    PauseStart = 4,
    PauseEnd = 5,
    CustomStart = 6,
    CustomEnd = 7,
}

/// A raw direction code that names no move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownDirection(pub u8);

impl MoveDirection {
    /// Every direction, in code order
    pub const ALL: [MoveDirection; 8] = [
        MoveDirection::StartEnd,
        MoveDirection::StartPause,
        MoveDirection::EndStart,
        MoveDirection::EndPause,
        MoveDirection::PauseStart,
        MoveDirection::PauseEnd,
        MoveDirection::CustomStart,
        MoveDirection::CustomEnd,
    ];

    /// Resolve to a concrete `(from, to)` angle pair
    pub fn resolve(self, calibration: &Calibration, custom: u8) -> (u8, u8) {
        let Calibration { start, end, pause } = *calibration;
        match self {
            MoveDirection::StartEnd => (start, end),
            MoveDirection::StartPause => (start, pause),
            MoveDirection::EndStart => (end, start),
            MoveDirection::EndPause => (end, pause),
            MoveDirection::PauseStart => (pause, start),
            MoveDirection::PauseEnd => (pause, end),
            MoveDirection::CustomStart => (custom, start),
            MoveDirection::CustomEnd => (custom, end),
        }
    }

    /// Numeric code
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MoveDirection {
    type Error = UnknownDirection;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        MoveDirection::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(UnknownDirection(code))
    }
}
