//! Test doubles shared by the motion and choreography tests

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::motion::{Actuator, MoveDirection, MoveOutcome};
use crate::traits::{DebouncedSwitch, Level, MotorDriver, ProximityDetector, ServoOutput};

/// Servo that remembers its angle and counts writes
pub struct MockServo {
    angle: u8,
    attached: bool,
    writes: usize,
}

impl MockServo {
    pub fn new() -> Self {
        Self {
            angle: 0,
            attached: false,
            writes: 0,
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ServoOutput for MockServo {
    fn write(&mut self, angle: u8) {
        self.angle = angle;
        self.writes += 1;
    }

    fn read(&self) -> u8 {
        self.angle
    }

    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Switch that holds one level and flips after a number of updates
pub struct ScriptedSwitch {
    initial: Level,
    flip_after: Option<u32>,
    updates: u32,
}

impl ScriptedSwitch {
    pub fn steady(level: Level) -> Self {
        Self {
            initial: level,
            flip_after: None,
            updates: 0,
        }
    }

    /// Reads `initial` for the first `updates` samples, the other level after
    pub fn flip_after(updates: u32, initial: Level) -> Self {
        Self {
            initial,
            flip_after: Some(updates),
            updates: 0,
        }
    }
}

impl DebouncedSwitch for ScriptedSwitch {
    fn update(&mut self) -> bool {
        let before = self.read();
        self.updates += 1;
        before != self.read()
    }

    fn read(&self) -> Level {
        match self.flip_after {
            Some(n) if self.updates > n => match self.initial {
                Level::Low => Level::High,
                Level::High => Level::Low,
            },
            _ => self.initial,
        }
    }
}

/// Delay that only adds up the time it was asked to wait
pub struct MockDelay {
    total_ns: u64,
}

impl MockDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// One call made on a [`RecordingActuator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Move(MoveDirection),
    MoveWith(MoveDirection, u8, u16),
    MoveBetween(u8, u8),
    SetTo(u8),
    Reattach,
    WaitAndDetach,
}

/// Actuator that records the script it is driven through
pub struct RecordingActuator {
    name: &'static str,
    end: u8,
    position: u8,
    pub calls: Vec<ActuatorCall>,
}

impl RecordingActuator {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            end: 150,
            position: 0,
            calls: Vec::new(),
        }
    }

    /// Count named moves in one direction, whatever their speed
    pub fn count_moves(&self, direction: MoveDirection) -> usize {
        self.calls
            .iter()
            .filter(|call| {
                matches!(call, ActuatorCall::Move(d) | ActuatorCall::MoveWith(d, _, _) if *d == direction)
            })
            .count()
    }
}

impl Actuator for RecordingActuator {
    fn name(&self) -> &'static str {
        self.name
    }

    fn move_dir(&mut self, direction: MoveDirection) -> MoveOutcome {
        self.calls.push(ActuatorCall::Move(direction));
        MoveOutcome::completed(self.position)
    }

    fn move_dir_with(
        &mut self,
        direction: MoveDirection,
        interval: u8,
        speed_ms: u16,
    ) -> MoveOutcome {
        self.calls
            .push(ActuatorCall::MoveWith(direction, interval, speed_ms));
        MoveOutcome::completed(self.position)
    }

    fn move_between(&mut self, from: u8, to: u8, _interval: u8, _speed_ms: u16) -> MoveOutcome {
        self.calls.push(ActuatorCall::MoveBetween(from, to));
        self.position = to;
        MoveOutcome::completed(to)
    }

    fn set_to(&mut self, angle: u8) {
        self.calls.push(ActuatorCall::SetTo(angle));
        self.position = angle;
    }

    fn end_angle(&self) -> u8 {
        self.end
    }

    fn reattach(&mut self) {
        self.calls.push(ActuatorCall::Reattach);
    }

    fn wait_and_detach(&mut self) {
        self.calls.push(ActuatorCall::WaitAndDetach);
    }
}

/// Proximity detector that replays a fixed answer list, then says false
pub struct ScriptedDetector {
    answers: Vec<bool>,
    pub calls: Vec<u16>,
}

impl ScriptedDetector {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.to_vec(),
            calls: Vec::new(),
        }
    }
}

impl ProximityDetector for ScriptedDetector {
    fn detect(&mut self, threshold: u16) -> bool {
        let answer = self.answers.get(self.calls.len()).copied().unwrap_or(false);
        self.calls.push(threshold);
        answer
    }
}

/// One call made on a [`RecordingMotor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCall {
    Forward(u8),
    Backward(u8),
    Halt,
}

/// Motor that records commands
pub struct RecordingMotor {
    pub calls: Vec<MotorCall>,
}

impl RecordingMotor {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }
}

impl MotorDriver for RecordingMotor {
    fn forward(&mut self, speed: u8) {
        self.calls.push(MotorCall::Forward(speed));
    }

    fn backward(&mut self, speed: u8) {
        self.calls.push(MotorCall::Backward(speed));
    }

    fn halt(&mut self) {
        self.calls.push(MotorCall::Halt);
    }
}
