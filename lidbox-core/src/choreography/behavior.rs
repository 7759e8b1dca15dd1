//! The behavior repertoire

/// Named behaviors, in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Behavior {
    /// Plain shutdown: open, flip the switch, close
    SwitchOff,
    /// Open, hesitate halfway with the hand, then flip
    PauseBetween,
    /// Door glitches open and shut at varying speeds
    CrazyDoor,
    /// The crazy door routine in slow motion
    CrazySlow,
    /// Door flutters while the hand lingers at a hand-set angle
    Hesitate,
    /// Hand hangs out while the door flaps
    Taunt,
    /// Quick dodge with a short freeze
    Matrix,
    /// Peek out, wait, then wiggle the hand toward the switch
    Sneak,
    /// Open up and drive off if someone approaches
    DriveAway,
    /// Wave the white flag, and again if someone is still there
    WhiteFlag,
}

impl Behavior {
    /// Number of behaviors in the repertoire
    pub const COUNT: usize = 10;

    /// Every behavior, indexed by selection order
    pub const ALL: [Behavior; Behavior::COUNT] = [
        Behavior::SwitchOff,
        Behavior::PauseBetween,
        Behavior::CrazyDoor,
        Behavior::CrazySlow,
        Behavior::Hesitate,
        Behavior::Taunt,
        Behavior::Matrix,
        Behavior::Sneak,
        Behavior::DriveAway,
        Behavior::WhiteFlag,
    ];

    /// Selection index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Behavior at a selection index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Diagnostic name
    pub const fn name(self) -> &'static str {
        match self {
            Behavior::SwitchOff => "switch-off",
            Behavior::PauseBetween => "pause-between",
            Behavior::CrazyDoor => "crazy-door",
            Behavior::CrazySlow => "crazy-slow",
            Behavior::Hesitate => "hesitate",
            Behavior::Taunt => "taunt",
            Behavior::Matrix => "matrix",
            Behavior::Sneak => "sneak",
            Behavior::DriveAway => "drive-away",
            Behavior::WhiteFlag => "white-flag",
        }
    }

    /// Whether the behavior consults the proximity sensor
    pub fn uses_sensor(self) -> bool {
        matches!(self, Behavior::DriveAway | Behavior::WhiteFlag)
    }
}
