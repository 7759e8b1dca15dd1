//! Interruptable servo controller
//!
//! One controller per servo. It owns the servo output, the switch that
//! guards it and a blocking delay, and walks the servo toward a target a
//! few degrees at a time.
//!
//! # Interruption
//!
//! The switch is sampled once before the first step and again after every
//! step. If the controller is interruptable and the stable level differs
//! from the level seen at the start, the move stops on the spot and the
//! outcome reports `interrupted`. The servo keeps the angle it reached;
//! the next move starts from there.
//!
//! ```ignore
//! let mut door = ActuatorController::attach("door", servo, Some(switch), Delay, config, cal);
//! let outcome = door.move_dir(MoveDirection::StartEnd);
//! if outcome.interrupted {
//!     // door stopped at outcome.position
//! }
//! ```

use embedded_hal::delay::DelayNs;

use super::actuator::Actuator;
use super::direction::MoveDirection;
use crate::config::{ActuatorConfig, Calibration};
use crate::traits::{DebouncedSwitch, Level, ServoOutput};

/// Time a servo needs per step on top of any requested delay
pub const MECHANICAL_MS_PER_STEP: u32 = 5;

/// Result of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveOutcome {
    /// Angle the servo was left at
    pub position: u8,
    /// The switch changed during the move and stopped it early
    pub interrupted: bool,
}

impl MoveOutcome {
    /// A move that ran to its target
    pub const fn completed(position: u8) -> Self {
        Self {
            position,
            interrupted: false,
        }
    }
}

/// Servo controller with switch-guarded stepwise motion
pub struct ActuatorController<S, W, D> {
    name: &'static str,
    servo: S,
    switch: Option<W>,
    delay: D,
    config: ActuatorConfig,
    calibration: Calibration,
    /// Last angle set with `set_to`
    custom: u8,
    /// Angle the most recent move started from
    move_origin: u8,
    /// Step delay of the most recent move
    speed_delay_ms: u16,
    is_home: bool,
    interruptable: bool,
}

impl<S, W, D> ActuatorController<S, W, D>
where
    S: ServoOutput,
    W: DebouncedSwitch,
    D: DelayNs,
{
    /// Bind a servo to its configuration and drive it to home
    ///
    /// Home and calibration angles are clamped to the actuator's limit.
    /// Without a switch the actuator can never be interrupted.
    pub fn attach(
        name: &'static str,
        mut servo: S,
        switch: Option<W>,
        delay: D,
        config: ActuatorConfig,
        calibration: Calibration,
    ) -> Self {
        let mut config = config;
        config.home = config.clamp(config.home);
        let calibration = calibration.clamped(&config);

        servo.write(config.home);
        servo.attach();
        info!("{} attached on pin {}, home {}", name, config.pin, config.home);

        Self {
            name,
            servo,
            switch,
            delay,
            config,
            calibration,
            custom: config.home,
            move_origin: config.home,
            speed_delay_ms: config.step_delay_ms,
            is_home: false,
            interruptable: config.interruptable,
        }
    }

    /// Enable or disable aborting moves on switch changes
    pub fn interruptable(&mut self, interruptable: bool) {
        self.interruptable = interruptable;
    }

    /// Check if moves may be aborted by the switch
    pub fn is_interruptable(&self) -> bool {
        self.interruptable
    }

    /// Commanded angle (the last angle written to the servo)
    pub fn position(&self) -> u8 {
        self.servo.read()
    }

    /// Last angle written to the servo
    pub fn last_write(&self) -> u8 {
        self.servo.read()
    }

    /// Check if the servo has been parked and powered off at home
    pub fn is_home(&self) -> bool {
        self.is_home
    }

    /// Override the parked flag
    pub fn mark_home(&mut self, home: bool) {
        self.is_home = home;
    }

    /// Change the home angle (clamped)
    pub fn set_home(&mut self, home: u8) {
        self.config.home = self.config.clamp(home);
    }

    /// Home angle
    pub fn home(&self) -> u8 {
        self.config.home
    }

    /// Calibrated positions
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Actuator configuration
    pub fn config(&self) -> &ActuatorConfig {
        &self.config
    }

    /// Last position set with `set_to`
    pub fn custom_angle(&self) -> u8 {
        self.custom
    }

    /// Step delay of the most recent move
    pub fn step_delay_ms(&self) -> u16 {
        self.speed_delay_ms
    }

    /// Borrow the servo output
    pub fn servo(&self) -> &S {
        &self.servo
    }

    /// Sample the switch and report whether it is on
    ///
    /// Returns `None` for actuators without a switch.
    pub fn poll_switch(&mut self) -> Option<bool> {
        self.switch.as_mut().map(|switch| {
            switch.update();
            switch.is_on()
        })
    }

    /// Coarse move to an absolute angle with the default step interval
    ///
    /// `None` keeps the step delay of the previous move.
    pub fn move_to(&mut self, target: u8, speed_ms: Option<u16>) -> MoveOutcome {
        let from = self.servo.read();
        let speed_ms = speed_ms.unwrap_or(self.speed_delay_ms);
        self.move_between(from, target, self.config.step_interval, speed_ms)
    }

    /// Named move from a raw direction code
    ///
    /// Unknown codes are logged and ignored.
    pub fn move_code(&mut self, code: u8, interval: u8, speed_ms: u16) -> MoveOutcome {
        match MoveDirection::try_from(code) {
            Ok(direction) => self.move_dir_with(direction, interval, speed_ms),
            Err(_) => {
                warn!("{}: unknown direction code {}, move skipped", self.name, code);
                MoveOutcome::completed(self.servo.read())
            }
        }
    }

    /// Resolve a named move against this actuator's calibration
    pub fn resolve(&self, direction: MoveDirection) -> (u8, u8) {
        direction.resolve(&self.calibration, self.custom)
    }

    /// Sample the switch, returning its stable level
    fn sample_switch(&mut self) -> Option<Level> {
        self.switch.as_mut().map(|switch| {
            switch.update();
            switch.read()
        })
    }

    /// Decide whether a switch change at `angle` should stop the move
    fn should_abort(&mut self, baseline: Option<Level>, angle: u8) -> bool {
        let (Some(baseline), Some(level)) = (baseline, self.sample_switch()) else {
            return false;
        };

        if !self.interruptable || level == baseline {
            return false;
        }

        // Below the guard the actuator's own stroke is what moved the switch
        if self.config.self_triggering && angle < self.config.self_trigger_guard {
            trace!("{}: switch change at {} ignored (self-triggered)", self.name, angle);
            return false;
        }

        true
    }
}

impl<S, W, D> Actuator for ActuatorController<S, W, D>
where
    S: ServoOutput,
    W: DebouncedSwitch,
    D: DelayNs,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn move_dir(&mut self, direction: MoveDirection) -> MoveOutcome {
        self.move_dir_with(
            direction,
            self.config.step_interval,
            self.config.step_delay_ms,
        )
    }

    fn move_dir_with(
        &mut self,
        direction: MoveDirection,
        interval: u8,
        speed_ms: u16,
    ) -> MoveOutcome {
        let (from, to) = self.resolve(direction);
        self.move_between(from, to, interval, speed_ms)
    }

    fn move_between(&mut self, from: u8, to: u8, interval: u8, speed_ms: u16) -> MoveOutcome {
        if !self.servo.is_attached() {
            warn!("{}: move requested while detached, reattaching", self.name);
            self.reattach();
        }

        let to = self.config.clamp(to);
        let interval = interval.max(1);
        let step_ms = u32::from(speed_ms) + MECHANICAL_MS_PER_STEP;

        // Always resume from what was actually written last
        let mut current = self.servo.read();
        if current != from {
            debug!("{}: starting at {} instead of {}", self.name, current, from);
        }
        debug!("{}: moving {} -> {}", self.name, current, to);

        self.move_origin = current;
        self.speed_delay_ms = speed_ms;
        let baseline = self.sample_switch();

        while current != to {
            current = if current < to {
                current.saturating_add(interval).min(to)
            } else {
                current.saturating_sub(interval).max(to)
            };
            self.servo.write(current);
            self.delay.delay_ms(step_ms);

            if self.should_abort(baseline, current) {
                warn!("{}: interrupted at {}, switch operated mid-move", self.name, current);
                return MoveOutcome {
                    position: current,
                    interrupted: true,
                };
            }
        }

        MoveOutcome::completed(current)
    }

    fn set_to(&mut self, angle: u8) {
        let angle = self.config.clamp(angle);
        debug!("{}: set to {}", self.name, angle);
        self.servo.write(angle);
        self.custom = angle;
    }

    fn end_angle(&self) -> u8 {
        self.calibration.end
    }

    fn reattach(&mut self) {
        self.servo.attach();
        self.is_home = false;
    }

    fn wait_and_detach(&mut self) {
        let home = self.config.home;
        if self.servo.read() != home || self.is_home {
            return;
        }

        info!("{}: powering off", self.name);
        let distance = u32::from(self.move_origin.abs_diff(home));
        let settle_ms = distance * (u32::from(self.speed_delay_ms) + MECHANICAL_MS_PER_STEP);
        self.delay.delay_ms(settle_ms);
        self.is_home = true;
        self.servo.detach();
        // Settled: a later park without a move has nothing to wait for
        self.move_origin = home;
    }
}
