//! The buggy: motor routing on top of the pin collaborator.
//!
//! [`Robot`] owns the [`PinIo`] implementation, the board's [`PinMap`] and
//! the [`DriveController`] state. It exposes two motor APIs:
//!
//! - **Legacy** (`motor`, `drive`, `drive_turn`): signed speeds in
//!   `-1023..=1023` on PWM + direction-pin wiring, with the reverse boost
//!   curve.
//! - **Percentage** (`move_motor`, `go`, `rotate`): `0..=100` on dual-PWM
//!   wiring, where reverse drives the bridge's second input.
//!
//! Both paths apply the bias and select the PWM carrier band.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::{Direction, Robot, Turn};
//! use rs_robobit::hal::MockPins;
//! use rs_robobit::traits::Pin;
//!
//! let mut robot = Robot::new(MockPins::new());
//! robot.set_bias(Turn::Left, 10);
//! robot.go(Direction::Forward, 50).unwrap();
//!
//! let pins = robot.pins();
//! assert_eq!(pins.analog(Pin::P0), Some(460)); // 511.5 * 0.9, rounded
//! assert_eq!(pins.analog(Pin::P1), Some(512));
//! assert_eq!(pins.period(Pin::P0), Some(30_000));
//! ```

use crate::config::{Config, SonarConfig};
use crate::drive::{
    BiasState, Direction, DriveController, DriveOutputs, MotorOutput, PwmPeriodBand, Side,
    StopMode, Turn, SPEED_MAX,
};
use crate::model::{Model, PinMap};
use crate::traits::{Delay, Level, Pin, PinIo};

/// Snapshot of the drive state, for status displays and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RobotState {
    /// Selected board revision.
    pub model: Model,
    /// Last commanded left magnitude (0-1023).
    pub left_speed: u16,
    /// Last commanded right magnitude (0-1023).
    pub right_speed: u16,
    /// Current bias.
    pub bias: BiasState,
    /// Carrier band of the last motor command.
    pub band: PwmPeriodBand,
}

/// A Robobit buggy driven through `P`.
#[derive(Debug)]
pub struct Robot<P: PinIo> {
    pins: P,
    model: Model,
    map: PinMap,
    drive: DriveController,
    pub(crate) sonar: SonarConfig,
}

impl<P: PinIo> Robot<P> {
    /// Creates a robot for the default board revision (Mk1).
    pub fn new(pins: P) -> Self {
        Self::with_model(pins, Model::default())
    }

    /// Creates a robot for `model`.
    pub fn with_model(pins: P, model: Model) -> Self {
        Self {
            pins,
            model,
            map: model.pins(),
            drive: DriveController::new(),
            sonar: SonarConfig::default(),
        }
    }

    /// Creates a robot from the `model` and `sonar` sections of `config`.
    pub fn from_config(pins: P, config: &Config) -> Self {
        let mut robot = Self::with_model(pins, config.model);
        robot.sonar = config.sonar.clone();
        robot
    }

    /// Switches the board revision; later sensor reads use its pins.
    pub fn select_model(&mut self, model: Model) {
        self.model = model;
        self.map = model.pins();
        info!("model {}", model);
    }

    /// Selected board revision.
    #[inline]
    pub fn model(&self) -> Model {
        self.model
    }

    /// Pin assignment of the selected revision.
    #[inline]
    pub fn pin_map(&self) -> &PinMap {
        &self.map
    }

    /// Borrows the pin collaborator.
    #[inline]
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Mutably borrows the pin collaborator.
    #[inline]
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Consumes the robot, returning the pin collaborator.
    pub fn into_pins(self) -> P {
        self.pins
    }

    /// Current drive state.
    pub fn state(&self) -> RobotState {
        RobotState {
            model: self.model,
            left_speed: self.drive.left_speed(),
            right_speed: self.drive.right_speed(),
            bias: self.drive.bias(),
            band: self.drive.band(),
        }
    }

    /// Biases the buggy towards `turn` by `percent` (clamped to `0..=80`).
    ///
    /// If the buggy drifts right, bias it left.
    pub fn set_bias(&mut self, turn: Turn, percent: i32) {
        self.drive.set_bias(turn, percent);
    }

    // ========================================================================
    // Legacy wiring: PWM + direction pin
    // ========================================================================

    /// Drives `side` at `speed` (`-1023..=1023`, clamped).
    ///
    /// Negative speeds run through the reverse boost curve; the direction
    /// pin goes high for reverse.
    pub fn motor(&mut self, side: Side, speed: i32) -> Result<(), P::Error> {
        let outputs = self.drive.command(speed, side);
        debug!("motor speed={} band={}", speed, outputs.band);
        self.write_direction_wired(outputs)
    }

    /// Drives both motors at `speed`.
    pub fn drive(&mut self, speed: i32) -> Result<(), P::Error> {
        self.motor(Side::Both, speed)
    }

    /// Spins on the spot at `speed` (`0..=1023`, clamped).
    pub fn drive_turn(&mut self, turn: Turn, speed: i32) -> Result<(), P::Error> {
        let speed = speed.clamp(0, SPEED_MAX as i32);
        let (left, right) = match turn {
            Turn::Left => (-speed, speed),
            Turn::Right => (speed, -speed),
        };
        self.motor(Side::Left, left)?;
        self.motor(Side::Right, right)
    }

    fn write_direction_wired(&mut self, outputs: DriveOutputs) -> Result<(), P::Error> {
        self.pins
            .set_pwm_period(self.map.left_pwm, outputs.band.period_us())?;
        if let Some(out) = outputs.left {
            self.write_pwm_dir(self.map.left_pwm, self.map.left_dir, out)?;
        }
        if let Some(out) = outputs.right {
            self.write_pwm_dir(self.map.right_pwm, self.map.right_dir, out)?;
        }
        Ok(())
    }

    fn write_pwm_dir(&mut self, pwm: Pin, dir: Pin, out: MotorOutput) -> Result<(), P::Error> {
        self.pins.analog_write(pwm, out.duty)?;
        self.pins.digital_write(dir, Level::from_bool(!out.forward))
    }

    // ========================================================================
    // Dual-PWM wiring
    // ========================================================================

    /// Moves `side` in `direction` at `percent` (`0..=100`, clamped).
    pub fn move_motor(
        &mut self,
        side: Side,
        direction: Direction,
        percent: i32,
    ) -> Result<(), P::Error> {
        let outputs = self.drive.command_percent(side, direction, percent);
        debug!("move {} {}%", direction.as_str(), percent);
        self.pins
            .set_pwm_period(self.map.left_pwm, outputs.band.period_us())?;
        if let Some(out) = outputs.left {
            self.write_dual_pwm(self.map.left_pwm, self.map.left_dir, out)?;
        }
        if let Some(out) = outputs.right {
            self.write_dual_pwm(self.map.right_pwm, self.map.right_dir, out)?;
        }
        Ok(())
    }

    /// Moves both motors in `direction` at `percent`.
    pub fn go(&mut self, direction: Direction, percent: i32) -> Result<(), P::Error> {
        self.move_motor(Side::Both, direction, percent)
    }

    /// Spins on the spot at `percent`.
    pub fn rotate(&mut self, turn: Turn, percent: i32) -> Result<(), P::Error> {
        let (left, right) = match turn {
            Turn::Left => (Direction::Reverse, Direction::Forward),
            Turn::Right => (Direction::Forward, Direction::Reverse),
        };
        self.move_motor(Side::Left, left, percent)?;
        self.move_motor(Side::Right, right, percent)
    }

    fn write_dual_pwm(&mut self, a0: Pin, a1: Pin, out: MotorOutput) -> Result<(), P::Error> {
        let (d0, d1) = if out.forward {
            (out.duty, 0)
        } else {
            (0, out.duty)
        };
        self.pins.analog_write(a0, d0)?;
        self.pins.analog_write(a1, d1)
    }

    /// Stops both motors. Coast releases all four motor pins (low), brake
    /// drives them all high.
    pub fn stop(&mut self, mode: StopMode) -> Result<(), P::Error> {
        let level = match mode {
            StopMode::Coast => Level::Low,
            StopMode::Brake => Level::High,
        };
        for pin in self.map.motor_pins() {
            self.pins.digital_write(pin, level)?;
        }
        self.drive.halt();
        debug!("stop {}", mode);
        Ok(())
    }

    // ========================================================================
    // Timed manoeuvres
    // ========================================================================

    /// Drives at `speed` for `ms`, then sets both motors to 0.
    pub async fn drive_for<D: Delay>(
        &mut self,
        delay: &mut D,
        speed: i32,
        ms: u32,
    ) -> Result<(), P::Error> {
        self.drive(speed)?;
        delay.delay_ms(ms).await;
        self.drive(0)
    }

    /// Spins at `speed` for `ms`, then sets both motors to 0.
    pub async fn drive_turn_for<D: Delay>(
        &mut self,
        delay: &mut D,
        turn: Turn,
        speed: i32,
        ms: u32,
    ) -> Result<(), P::Error> {
        self.drive_turn(turn, speed)?;
        delay.delay_ms(ms).await;
        self.motor(Side::Both, 0)
    }

    /// Moves at `percent` for `ms`, then coasts to a stop.
    pub async fn go_for<D: Delay>(
        &mut self,
        delay: &mut D,
        direction: Direction,
        percent: i32,
        ms: u32,
    ) -> Result<(), P::Error> {
        self.go(direction, percent)?;
        delay.delay_ms(ms).await;
        self.stop(StopMode::Coast)
    }

    /// Spins at `percent` for `ms`, then coasts to a stop.
    pub async fn rotate_for<D: Delay>(
        &mut self,
        delay: &mut D,
        turn: Turn,
        percent: i32,
        ms: u32,
    ) -> Result<(), P::Error> {
        self.rotate(turn, percent)?;
        delay.delay_ms(ms).await;
        self.stop(StopMode::Coast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockPins, PinEvent};

    fn robot() -> Robot<MockPins> {
        Robot::new(MockPins::new())
    }

    // =========================================================================
    // Legacy Motor Tests
    // =========================================================================

    #[test]
    fn motor_forward_writes_pwm_and_low_direction() {
        let mut r = robot();
        r.motor(Side::Left, 600).unwrap();
        assert_eq!(
            r.pins().events,
            [
                PinEvent::Period(Pin::P0, 20_000),
                PinEvent::Analog(Pin::P0, 600),
                PinEvent::Digital(Pin::P8, Level::Low),
            ]
        );
    }

    #[test]
    fn motor_reverse_full_speed() {
        let mut r = robot();
        r.motor(Side::Both, -1023).unwrap();
        assert_eq!(r.pins().analog(Pin::P0), Some(0));
        assert_eq!(r.pins().analog(Pin::P1), Some(0));
        assert_eq!(r.pins().digital(Pin::P8), Some(Level::High));
        assert_eq!(r.pins().digital(Pin::P12), Some(Level::High));
    }

    #[test]
    fn motor_right_only_leaves_left_alone() {
        let mut r = robot();
        r.motor(Side::Right, 300).unwrap();
        assert_eq!(r.pins().analog(Pin::P0), None);
        assert_eq!(r.pins().analog(Pin::P1), Some(300));
    }

    #[test]
    fn drive_turn_left_reverses_left_side() {
        let mut r = robot();
        r.drive_turn(Turn::Left, 500).unwrap();
        assert_eq!(r.pins().digital(Pin::P8), Some(Level::High));
        assert_eq!(r.pins().digital(Pin::P12), Some(Level::Low));
        // 500 * 1.5 = 750 boosted, 1023 - 750
        assert_eq!(r.pins().analog(Pin::P0), Some(273));
        assert_eq!(r.pins().analog(Pin::P1), Some(500));
    }

    #[test]
    fn drive_turn_clamps_negative_speed() {
        let mut r = robot();
        r.drive_turn(Turn::Right, -50).unwrap();
        assert_eq!(r.pins().analog(Pin::P0), Some(0));
        assert_eq!(r.pins().digital(Pin::P12), Some(Level::Low));
    }

    // =========================================================================
    // Dual-PWM Tests
    // =========================================================================

    #[test]
    fn move_reverse_drives_second_input() {
        let mut r = robot();
        r.move_motor(Side::Left, Direction::Reverse, 100).unwrap();
        assert_eq!(r.pins().analog(Pin::P0), Some(0));
        assert_eq!(r.pins().analog(Pin::P8), Some(1023));
        assert_eq!(r.pins().analog(Pin::P1), None);
    }

    #[test]
    fn rotate_left() {
        let mut r = robot();
        r.rotate(Turn::Left, 20).unwrap();
        // 20% = 204.6 -> 205
        assert_eq!(r.pins().analog(Pin::P0), Some(0));
        assert_eq!(r.pins().analog(Pin::P8), Some(205));
        assert_eq!(r.pins().analog(Pin::P1), Some(205));
        assert_eq!(r.pins().analog(Pin::P12), Some(0));
        assert_eq!(r.pins().period(Pin::P0), Some(40_000));
    }

    // =========================================================================
    // Stop and State Tests
    // =========================================================================

    #[test]
    fn stop_brake_drives_all_high() {
        let mut r = robot();
        r.drive(800).unwrap();
        r.stop(StopMode::Brake).unwrap();
        for pin in [Pin::P0, Pin::P8, Pin::P1, Pin::P12] {
            assert_eq!(r.pins().digital(pin), Some(Level::High));
        }
        assert_eq!(r.state().left_speed, 0);
    }

    #[test]
    fn stop_coast_drives_all_low() {
        let mut r = robot();
        r.stop(StopMode::Coast).unwrap();
        for pin in [Pin::P0, Pin::P8, Pin::P1, Pin::P12] {
            assert_eq!(r.pins().digital(pin), Some(Level::Low));
        }
    }

    #[test]
    fn state_tracks_commands() {
        let mut r = robot();
        r.set_bias(Turn::Right, 15);
        r.motor(Side::Left, -250).unwrap();
        let state = r.state();
        assert_eq!(state.left_speed, 250);
        assert_eq!(state.right_speed, 0);
        assert_eq!(state.bias.right(), 15);
        assert_eq!(state.band, PwmPeriodBand::Slow);
    }

    #[test]
    fn hardware_error_propagates() {
        let mut pins = MockPins::new();
        pins.fail = true;
        let mut r = Robot::new(pins);
        assert!(r.drive(100).is_err());
        assert!(r.stop(StopMode::Coast).is_err());
    }

    #[test]
    fn select_model_updates_pin_map() {
        let mut r = robot();
        r.select_model(Model::Mk3);
        assert_eq!(r.model(), Model::Mk3);
        assert_eq!(r.pin_map().line_left, Pin::P16);
    }
}
