//! Differential-drive speed mapping.
//!
//! Converts a signed speed request into per-side PWM duty cycles and
//! direction flags. Three pieces of tuning live here:
//!
//! - the **reverse boost curve**: the motor driver responds non-linearly to
//!   reverse polarity near zero, so reverse magnitudes are stretched by a
//!   five-segment calibration table before being inverted onto the PWM
//!   range;
//! - the **bias** model: a percentage reduction on one side to correct a
//!   buggy that pulls left or right;
//! - the **PWM period band**: slower carriers at low duty for more torque.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::drive::{map_speed, BiasState, PwmPeriodBand, Side};
//!
//! let bias = BiasState::default();
//! let out = map_speed(-400, Side::Both, &bias);
//!
//! let left = out.left.unwrap();
//! assert!(!left.forward);
//! assert_eq!(left.duty, 1023 - 800);
//! assert_eq!(out.band, PwmPeriodBand::Medium);
//! ```

use crate::error::ConfigError;
use crate::parsing::lookup;

/// Largest commanded magnitude on the legacy scale.
pub const SPEED_MAX: u16 = 1023;

/// Largest bias percentage accepted by [`BiasState::set`].
pub const BIAS_MAX: u8 = 80;

/// Largest speed on the percentage scale.
pub const PERCENT_MAX: u8 = 100;

/// Reverse boost table: `(upper bound inclusive, numerator, denominator)`.
///
/// Magnitudes above the last bound pass through unchanged.
const REVERSE_BOOST: [(u16, u32, u32); 4] = [(200, 19, 6), (400, 2, 1), (600, 3, 2), (800, 5, 4)];

/// Which motor(s) a command targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    /// Left motor only.
    Left,
    /// Right motor only.
    Right,
    /// Both motors.
    Both,
}

impl Side {
    /// Returns true if the left motor is selected.
    #[inline]
    pub const fn includes_left(self) -> bool {
        matches!(self, Side::Left | Side::Both)
    }

    /// Returns true if the right motor is selected.
    #[inline]
    pub const fn includes_right(self) -> bool {
        matches!(self, Side::Right | Side::Both)
    }

    /// Parses `"left"`, `"right"`, `"both"` (or `"all"`), case-insensitive.
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(
            s,
            &[
                (&["left", "l"], Side::Left),
                (&["right", "r"], Side::Right),
                (&["both", "all"], Side::Both),
            ],
        )
    }
}

impl TryFrom<u8> for Side {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Left),
            1 => Ok(Side::Right),
            2 => Ok(Side::Both),
            _ => Err(ConfigError::UnknownVariant {
                kind: "Side",
                value,
            }),
        }
    }
}

/// Spin or bias direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Turn {
    /// Counter-clockwise seen from above.
    Left,
    /// Clockwise seen from above.
    Right,
}

impl Turn {
    /// Parses `"left"` / `"right"`, case-insensitive.
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(s, &[(&["left", "l"], Turn::Left), (&["right", "r"], Turn::Right)])
    }
}

impl TryFrom<u8> for Turn {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Turn::Left),
            1 => Ok(Turn::Right),
            _ => Err(ConfigError::UnknownVariant {
                kind: "Turn",
                value,
            }),
        }
    }
}

/// Direction of travel for the percentage API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Forward.
    #[default]
    Forward,
    /// Reverse.
    Reverse,
}

impl Direction {
    /// Returns the direction as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }

    /// Parses `"forward"`/`"fwd"` and `"reverse"`/`"rev"`, case-insensitive.
    ///
    /// ```
    /// use rs_robobit::Direction;
    ///
    /// assert_eq!(Direction::from_text("FWD"), Some(Direction::Forward));
    /// assert_eq!(Direction::from_text(" reverse "), Some(Direction::Reverse));
    /// assert_eq!(Direction::from_text("sideways"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(
            s,
            &[
                (&["forward", "fwd"], Direction::Forward),
                (&["reverse", "rev"], Direction::Reverse),
            ],
        )
    }
}

impl TryFrom<u8> for Direction {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Forward),
            1 => Ok(Direction::Reverse),
            _ => Err(ConfigError::UnknownVariant {
                kind: "Direction",
                value,
            }),
        }
    }
}

/// How [`Robot::stop`](crate::Robot::stop) halts the motors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopMode {
    /// Release the bridge and let the buggy roll to a halt.
    #[default]
    Coast,
    /// Short the motor terminals for a quick stop.
    Brake,
}

/// PWM carrier band, chosen from the commanded magnitude.
///
/// Low duty cycles use a slow carrier so each pulse is long enough to
/// overcome static friction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmPeriodBand {
    /// Magnitude below 200.
    #[default]
    Slowest,
    /// Magnitude below 400.
    Slow,
    /// Magnitude below 600.
    Medium,
    /// Magnitude below 800.
    Fast,
    /// Everything else.
    Fastest,
}

impl PwmPeriodBand {
    /// Selects the band for a magnitude on the 0-1023 scale.
    ///
    /// Thresholds are checked in ascending order and the first match wins.
    pub const fn from_magnitude(magnitude: u16) -> Self {
        if magnitude < 200 {
            PwmPeriodBand::Slowest
        } else if magnitude < 400 {
            PwmPeriodBand::Slow
        } else if magnitude < 600 {
            PwmPeriodBand::Medium
        } else if magnitude < 800 {
            PwmPeriodBand::Fast
        } else {
            PwmPeriodBand::Fastest
        }
    }

    /// Carrier period in microseconds.
    pub const fn period_us(self) -> u32 {
        match self {
            PwmPeriodBand::Slowest => 60_000,
            PwmPeriodBand::Slow => 40_000,
            PwmPeriodBand::Medium => 30_000,
            PwmPeriodBand::Fast => 20_000,
            PwmPeriodBand::Fastest => 10_000,
        }
    }
}

/// Left/right speed correction.
///
/// At most one side carries a non-zero bias: biasing one side clears the
/// other. "Bias left by 10" slows the left motor by 10%, steering the buggy
/// left to cancel a rightward drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiasState {
    left: u8,
    right: u8,
}

impl BiasState {
    /// No bias on either side.
    pub const fn new() -> Self {
        Self { left: 0, right: 0 }
    }

    /// Sets the bias towards `turn`, clamped to `0..=80`, and clears the
    /// other side.
    ///
    /// ```
    /// use rs_robobit::drive::{BiasState, Turn};
    ///
    /// let mut bias = BiasState::new();
    /// bias.set(Turn::Left, 30);
    /// assert_eq!((bias.left(), bias.right()), (30, 0));
    ///
    /// bias.set(Turn::Right, 10);
    /// assert_eq!((bias.left(), bias.right()), (0, 10));
    /// ```
    pub fn set(&mut self, turn: Turn, percent: i32) {
        let percent = percent.clamp(0, BIAS_MAX as i32) as u8;
        match turn {
            Turn::Left => {
                self.left = percent;
                self.right = 0;
            }
            Turn::Right => {
                self.left = 0;
                self.right = percent;
            }
        }
    }

    /// Left bias percentage.
    #[inline]
    pub const fn left(&self) -> u8 {
        self.left
    }

    /// Right bias percentage.
    #[inline]
    pub const fn right(&self) -> u8 {
        self.right
    }
}

/// Output for one motor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutput {
    /// PWM duty on the 0-1023 scale.
    pub duty: u16,
    /// Direction flag; `false` drives the bridge in reverse.
    pub forward: bool,
}

/// Result of mapping one command.
///
/// A side that was not selected is `None`: its motor must be left as it is,
/// not stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveOutputs {
    /// Left motor output, if selected.
    pub left: Option<MotorOutput>,
    /// Right motor output, if selected.
    pub right: Option<MotorOutput>,
    /// Carrier band for this command.
    pub band: PwmPeriodBand,
}

/// A clamped speed request for one or both motors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    speed: i16,
    side: Side,
}

impl DriveCommand {
    /// Builds a command, clamping `speed` to `-1023..=1023`.
    pub fn new(speed: i32, side: Side) -> Self {
        let max = SPEED_MAX as i32;
        Self {
            speed: speed.clamp(-max, max) as i16,
            side,
        }
    }

    /// The clamped speed.
    #[inline]
    pub const fn speed(&self) -> i16 {
        self.speed
    }

    /// The targeted side(s).
    #[inline]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Maps this command through [`map_speed`].
    pub fn map(&self, bias: &BiasState) -> DriveOutputs {
        map_speed(self.speed as i32, self.side, bias)
    }
}

/// Stretches a reverse magnitude through the calibration table.
///
/// Rational multipliers are applied with round-half-up integer arithmetic.
///
/// ```
/// use rs_robobit::drive::reverse_boost;
///
/// assert_eq!(reverse_boost(200), 633);
/// assert_eq!(reverse_boost(400), 800);
/// assert_eq!(reverse_boost(600), 900);
/// assert_eq!(reverse_boost(800), 1000);
/// assert_eq!(reverse_boost(1023), 1023);
/// ```
pub fn reverse_boost(magnitude: u16) -> u16 {
    let magnitude = magnitude.min(SPEED_MAX);
    for (upper, num, den) in REVERSE_BOOST {
        if magnitude <= upper {
            let boosted = (magnitude as u32 * num + den / 2) / den;
            return boosted.min(SPEED_MAX as u32) as u16;
        }
    }
    magnitude
}

/// Applies a bias percentage: `round(duty * (100 - bias) / 100)`.
pub fn apply_bias(duty: u16, bias_percent: u8) -> u16 {
    let keep = 100 - bias_percent.min(100) as u32;
    ((duty as u32 * keep + 50) / 100) as u16
}

/// Maps a signed legacy-scale speed to per-side outputs.
///
/// Steps: clamp to `-1023..=1023`, pick the band from the magnitude, run
/// reverse magnitudes through [`reverse_boost`] and invert them onto the
/// PWM range (`1023 - boosted`), then apply the side's bias. Never fails.
pub fn map_speed(requested: i32, side: Side, bias: &BiasState) -> DriveOutputs {
    let max = SPEED_MAX as i32;
    let speed = requested.clamp(-max, max);
    let forward = speed >= 0;
    let magnitude = speed.unsigned_abs() as u16;
    let band = PwmPeriodBand::from_magnitude(magnitude);

    let duty = if forward {
        magnitude
    } else {
        SPEED_MAX - reverse_boost(magnitude)
    };

    let output = |bias_percent: u8| MotorOutput {
        duty: apply_bias(duty, bias_percent),
        forward,
    };

    DriveOutputs {
        left: side.includes_left().then(|| output(bias.left())),
        right: side.includes_right().then(|| output(bias.right())),
        band,
    }
}

/// Scales a percentage (clamped to `0..=100`) to the 0-1023 scale, rounded.
pub fn percent_to_speed(percent: i32) -> u16 {
    let percent = percent.clamp(0, PERCENT_MAX as i32) as u32;
    ((percent * SPEED_MAX as u32 + 50) / 100) as u16
}

/// Maps a percentage request for dual-PWM wiring.
///
/// The percentage is scaled by 10.23; the band comes from the scaled value
/// and the bias is applied to it. No reverse curve: reverse is driven on the
/// bridge's second input instead of by inverting the duty.
pub fn map_percent(
    direction: Direction,
    percent: i32,
    side: Side,
    bias: &BiasState,
) -> DriveOutputs {
    let percent = percent.clamp(0, PERCENT_MAX as i32) as u32;
    let band = PwmPeriodBand::from_magnitude(percent_to_speed(percent as i32));
    let forward = direction == Direction::Forward;

    // scaled * (100 - bias) / 100 with scaled = percent * 1023 / 100, rounded once
    let output = |bias_percent: u8| {
        let keep = 100 - bias_percent.min(100) as u32;
        MotorOutput {
            duty: ((percent * SPEED_MAX as u32 * keep + 5_000) / 10_000) as u16,
            forward,
        }
    };

    DriveOutputs {
        left: side.includes_left().then(|| output(bias.left())),
        right: side.includes_right().then(|| output(bias.right())),
        band,
    }
}

/// Drive state owned by one robot: bias, the last commanded magnitude per
/// side and the last selected band.
///
/// Pure state; applying outputs to pins is the job of
/// [`Robot`](crate::Robot).
#[derive(Clone, Debug, Default)]
pub struct DriveController {
    bias: BiasState,
    left_speed: u16,
    right_speed: u16,
    band: PwmPeriodBand,
}

impl DriveController {
    /// Creates a controller with no bias and both motors at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bias towards `turn` (clamped to `0..=80`).
    pub fn set_bias(&mut self, turn: Turn, percent: i32) {
        self.bias.set(turn, percent);
        debug!("bias left={} right={}", self.bias.left(), self.bias.right());
    }

    /// Maps a legacy-scale command and records it.
    pub fn command(&mut self, speed: i32, side: Side) -> DriveOutputs {
        let cmd = DriveCommand::new(speed, side);
        let magnitude = cmd.speed().unsigned_abs();
        self.record(side, magnitude);
        let outputs = cmd.map(&self.bias);
        self.band = outputs.band;
        outputs
    }

    /// Maps a percentage command and records it.
    pub fn command_percent(&mut self, side: Side, direction: Direction, percent: i32) -> DriveOutputs {
        self.record(side, percent_to_speed(percent));
        let outputs = map_percent(direction, percent, side, &self.bias);
        self.band = outputs.band;
        outputs
    }

    /// Marks both motors as stopped.
    pub fn halt(&mut self) {
        self.left_speed = 0;
        self.right_speed = 0;
    }

    fn record(&mut self, side: Side, magnitude: u16) {
        if side.includes_left() {
            self.left_speed = magnitude;
        }
        if side.includes_right() {
            self.right_speed = magnitude;
        }
    }

    /// Current bias.
    #[inline]
    pub fn bias(&self) -> BiasState {
        self.bias
    }

    /// Last commanded left magnitude (0-1023, before bias and curve).
    #[inline]
    pub fn left_speed(&self) -> u16 {
        self.left_speed
    }

    /// Last commanded right magnitude (0-1023, before bias and curve).
    #[inline]
    pub fn right_speed(&self) -> u16 {
        self.right_speed
    }

    /// Band selected by the last command.
    #[inline]
    pub fn band(&self) -> PwmPeriodBand {
        self.band
    }
}
