//! Behavior sequencing
//!
//! The choreographer borrows the box's three actuators, the proximity
//! detector and the drive motor for its whole life. `next()` runs the
//! behavior under the cursor from start to finish, then moves the cursor.
//!
//! Moves inside a behavior may be cut short by the switch. The script
//! carries on regardless: an interrupted move leaves the actuator where
//! it stopped and the following moves start from there.

use embedded_hal::delay::DelayNs;
use rand::{Rng, RngCore};

use super::behavior::Behavior;
use crate::config::ChoreographyConfig;
use crate::motion::Actuator;
use crate::motion::MoveDirection::{
    CustomEnd, EndPause, EndStart, PauseEnd, PauseStart, StartEnd, StartPause,
};
use crate::traits::{MotorDriver, ProximityDetector};

/// Wave cycles for the first flag signal
const FIRST_WAVE: u8 = 5;

/// Wave cycles when someone is still around afterwards
const SECOND_WAVE: u8 = 7;

/// Everything a behavior can move or sense
pub struct Ensemble<'a, A, P, M> {
    pub door: &'a mut A,
    pub hand: &'a mut A,
    pub flag: &'a mut A,
    pub detector: &'a mut P,
    pub motor: &'a mut M,
}

/// Runs one behavior per call and selects the next
pub struct Choreographer<'a, A, P, M, D, R> {
    door: &'a mut A,
    hand: &'a mut A,
    flag: &'a mut A,
    detector: &'a mut P,
    motor: &'a mut M,
    delay: D,
    rng: R,
    config: ChoreographyConfig,
    cursor: usize,
}

impl<'a, A, P, M, D, R> Choreographer<'a, A, P, M, D, R>
where
    A: Actuator,
    P: ProximityDetector,
    M: MotorDriver,
    D: DelayNs,
    R: RngCore,
{
    /// Create a choreographer starting at the first behavior
    ///
    /// `rng` is only drawn from when `config.randomize` is set.
    pub fn new(
        ensemble: Ensemble<'a, A, P, M>,
        delay: D,
        rng: R,
        config: ChoreographyConfig,
    ) -> Self {
        let Ensemble {
            door,
            hand,
            flag,
            detector,
            motor,
        } = ensemble;

        Self {
            door,
            hand,
            flag,
            detector,
            motor,
            delay,
            rng,
            config,
            cursor: 0,
        }
    }

    /// Index of the behavior `next()` will run
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Behavior `next()` will run
    pub fn current(&self) -> Behavior {
        Behavior::ALL[self.cursor]
    }

    /// Number of behaviors to choose from
    pub fn repertoire_len(&self) -> usize {
        Behavior::COUNT
    }

    /// Switch between random and sequential selection
    pub fn set_randomize(&mut self, randomize: bool) {
        self.config.randomize = randomize;
    }

    /// Run the current behavior, then advance the cursor
    ///
    /// Actuators are powered up before the behavior and parked afterwards.
    /// Returns the behavior that ran.
    pub fn next(&mut self) -> Behavior {
        let behavior = self.current();
        info!("Running behavior {} ({})", behavior.index(), behavior.name());

        self.door.reattach();
        self.hand.reattach();
        self.flag.reattach();

        self.run(behavior);

        self.door.wait_and_detach();
        self.hand.wait_and_detach();
        self.flag.wait_and_detach();

        self.cursor = self.select_next();
        behavior
    }

    /// Run one behavior without touching the cursor
    pub fn run(&mut self, behavior: Behavior) {
        match behavior {
            Behavior::SwitchOff => self.switch_off(),
            Behavior::PauseBetween => self.pause_between(),
            Behavior::CrazyDoor => self.crazy_door(),
            Behavior::CrazySlow => self.crazy_slow(),
            Behavior::Hesitate => self.hesitate(),
            Behavior::Taunt => self.taunt(),
            Behavior::Matrix => self.matrix(),
            Behavior::Sneak => self.sneak(),
            Behavior::DriveAway => self.drive_away(),
            Behavior::WhiteFlag => self.white_flag(),
        }
    }

    fn select_next(&mut self) -> usize {
        if self.config.randomize {
            self.rng.gen_range(0..Behavior::COUNT)
        } else {
            (self.cursor + 1) % Behavior::COUNT
        }
    }

    fn pause(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn someone_there(&mut self) -> bool {
        let seen = self.detector.detect(self.config.proximity_threshold);
        debug!("Proximity check: {}", seen);
        seen
    }

    fn switch_off(&mut self) {
        self.door.move_dir(StartEnd);
        self.hand.move_dir(StartEnd);
        self.hand.move_dir(EndStart);
        self.door.move_dir(EndStart);
    }

    fn pause_between(&mut self) {
        self.door.move_dir(StartEnd);
        self.pause(800);
        self.hand.move_dir(StartPause);
        self.pause(1000);
        self.hand.move_dir(PauseEnd);
        self.hand.move_dir(EndStart);
        self.door.move_dir(EndStart);
    }

    fn crazy_door(&mut self) {
        self.door.move_dir(StartEnd);
        self.door.move_dir_with(EndStart, 5, 15);
        self.door.move_dir(StartPause);
        self.door.move_dir_with(PauseStart, 15, 15);
        self.pause(700);
        self.door.move_dir(StartEnd);
        self.pause(700);
        self.door.move_dir_with(EndStart, 5, 15);

        self.door.move_dir_with(StartEnd, 8, 15);
        self.hand.move_dir(StartEnd);
        self.hand.move_dir(EndStart);
        self.door.move_dir_with(EndStart, 15, 15);
    }

    fn crazy_slow(&mut self) {
        const INTERVAL: u8 = 1;
        const SPEED: u16 = 30;

        self.door.move_dir_with(StartEnd, INTERVAL, SPEED);
        self.door.move_dir_with(EndStart, INTERVAL, SPEED);
        self.door.move_dir_with(StartPause, INTERVAL, SPEED);
        self.door.move_dir_with(PauseStart, INTERVAL, SPEED);
        self.pause(700);
        self.door.move_dir_with(StartEnd, INTERVAL, SPEED);
        self.pause(700);
        self.door.move_dir_with(EndStart, INTERVAL, SPEED);

        self.door.move_dir_with(StartEnd, INTERVAL, SPEED);
        self.hand.move_dir_with(StartEnd, INTERVAL, SPEED);
        self.hand.move_dir_with(EndStart, INTERVAL, SPEED);
        self.door.move_dir_with(EndStart, INTERVAL, SPEED);
    }

    fn hesitate(&mut self) {
        self.door.move_dir_with(PauseEnd, 3, 15);
        self.hand.move_dir_with(StartPause, 1, 15);
        self.pause(800);
        self.door.move_dir_with(EndPause, 3, 15);
        self.door.move_dir_with(PauseEnd, 3, 15);

        self.hand.set_to(40);
        self.pause(1000);
        self.hand.move_dir_with(CustomEnd, 4, 15);
        self.pause(1000);
        self.hand.move_dir_with(EndStart, 4, 15);
        self.door.move_dir_with(EndStart, 1, 15);
    }

    fn taunt(&mut self) {
        self.door.move_dir_with(StartEnd, 3, 15);
        self.hand.move_dir_with(StartEnd, 4, 15);
        for _ in 0..2 {
            self.door.move_dir_with(EndPause, 3, 15);
            self.door.move_dir_with(PauseEnd, 3, 15);
        }
        self.hand.move_dir_with(EndStart, 4, 15);
        self.door.move_dir_with(EndStart, 3, 15);
    }

    fn matrix(&mut self) {
        self.door.move_dir_with(StartEnd, 3, 15);
        self.hand.move_dir_with(StartPause, 4, 15);
        self.hand.move_dir_with(PauseEnd, 1, 30);
        self.pause(300);
        self.hand.move_dir_with(EndStart, 4, 10);
        self.door.move_dir_with(EndStart, 3, 15);
    }

    fn sneak(&mut self) {
        self.door.move_dir_with(StartPause, 1, 15);
        self.pause(2000);
        self.hand.move_dir_with(StartPause, 1, 30);
        self.pause(500);
        self.door.move_dir_with(PauseEnd, 4, 15);
        self.pause(100);

        self.hand.move_between(40, 90, 4, 15);
        self.pause(500);
        self.hand.move_between(90, 70, 4, 15);
        self.pause(100);
        self.hand.move_between(70, 90, 4, 15);
        self.pause(100);
        self.hand.move_between(90, 70, 4, 15);
        let end = self.hand.end_angle();
        self.hand.move_between(70, end, 4, 15);

        self.hand.move_dir_with(EndStart, 4, 15);
        self.door.move_dir_with(EndStart, 3, 15);
    }

    fn drive_away(&mut self) {
        self.door.move_dir_with(StartEnd, 3, 15);
        self.pause(1200);
        if self.someone_there() {
            info!("Driving away");
            self.motor.forward(self.config.drive_speed);
            self.pause(u32::from(self.config.drive_ms));
            self.motor.halt();
        }
        self.pause(100);
        self.hand.move_dir_with(StartEnd, 4, 15);
        self.hand.move_dir_with(EndStart, 4, 15);
        self.door.move_dir_with(EndStart, 3, 15);
    }

    fn white_flag(&mut self) {
        self.door.move_dir_with(StartEnd, 3, 15);
        self.wave_flag(FIRST_WAVE);
        self.hand.move_dir_with(StartEnd, 4, 15);
        self.hand.move_dir_with(EndStart, 4, 15);

        if self.someone_there() {
            self.wave_flag(SECOND_WAVE);
        }

        self.door.move_dir_with(EndStart, 3, 15);
    }

    /// Raise the flag, wave it `times` times between pause and end, lower it
    fn wave_flag(&mut self, times: u8) {
        self.flag.move_dir_with(StartPause, 3, 15);
        self.pause(100);
        for _ in 0..times {
            self.flag.move_dir_with(PauseEnd, 4, 15);
            self.flag.move_dir_with(EndPause, 4, 15);
        }
        self.pause(100);
        self.flag.move_dir_with(PauseStart, 3, 15);
    }
}
