//! Line sensors, sonar and servo attachments.
//!
//! All of these are model-dependent: the pins come from the robot's
//! [`PinMap`](crate::model::PinMap).

use crate::error::ConfigError;
use crate::parsing::lookup;
use crate::robot::Robot;
use crate::traits::{Level, PinIo, Pull};

/// Echo round-trip time per centimetre, in microseconds.
pub const US_PER_CM: u32 = 58;

/// Echo round-trip time per inch, in microseconds.
pub const US_PER_INCH: u32 = 148;

/// Largest servo opening for the talon and claw, in degrees.
pub const SERVO_MAX_DEGREES: u8 = 80;

/// One of the two downward-facing line sensors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineSensor {
    /// Left sensor.
    Left,
    /// Right sensor.
    Right,
}

impl TryFrom<u8> for LineSensor {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LineSensor::Left),
            1 => Ok(LineSensor::Right),
            _ => Err(ConfigError::UnknownVariant {
                kind: "LineSensor",
                value,
            }),
        }
    }
}

/// Unit for sonar readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SonarUnit {
    /// Centimetres.
    #[default]
    Centimeters,
    /// Inches.
    Inches,
    /// Raw echo width in microseconds.
    Microseconds,
}

impl SonarUnit {
    /// Converts a raw echo width, rounding to the nearest unit.
    ///
    /// ```
    /// use rs_robobit::sensors::SonarUnit;
    ///
    /// assert_eq!(SonarUnit::Centimeters.convert(1160), 20);
    /// assert_eq!(SonarUnit::Centimeters.convert(29), 1); // 0.5 rounds up
    /// assert_eq!(SonarUnit::Inches.convert(1480), 10);
    /// assert_eq!(SonarUnit::Microseconds.convert(1160), 1160);
    /// ```
    pub const fn convert(self, echo_us: u32) -> u32 {
        match self {
            SonarUnit::Centimeters => round_div(echo_us, US_PER_CM),
            SonarUnit::Inches => round_div(echo_us, US_PER_INCH),
            SonarUnit::Microseconds => echo_us,
        }
    }

    /// Parses `"cm"`, `"inches"`/`"in"` or `"us"`, case-insensitive.
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(
            s,
            &[
                (&["cm", "centimeters", "centimetres"], SonarUnit::Centimeters),
                (&["in", "inches"], SonarUnit::Inches),
                (&["us", "microseconds"], SonarUnit::Microseconds),
            ],
        )
    }
}

impl TryFrom<u8> for SonarUnit {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SonarUnit::Centimeters),
            1 => Ok(SonarUnit::Inches),
            2 => Ok(SonarUnit::Microseconds),
            _ => Err(ConfigError::UnknownVariant {
                kind: "SonarUnit",
                value,
            }),
        }
    }
}

// half-up without the `n + d / 2` overflow near u32::MAX
const fn round_div(n: u32, d: u32) -> u32 {
    n / d + (n % d >= d - d / 2) as u32
}

impl<P: PinIo> Robot<P> {
    /// Reads a line sensor on the model's pin.
    pub fn read_line(&mut self, sensor: LineSensor) -> Result<Level, P::Error> {
        let map = self.pin_map();
        let pin = match sensor {
            LineSensor::Left => map.line_left,
            LineSensor::Right => map.line_right,
        };
        self.pins_mut().digital_read(pin)
    }

    /// Measures the distance to the nearest obstacle.
    ///
    /// Sends up to `attempts` trigger pulses and keeps the first non-zero
    /// echo. Returns 0 if nothing answered within the configured range.
    pub fn sonar(&mut self, unit: SonarUnit) -> Result<u32, P::Error> {
        let pin = self.pin_map().sonar;
        let timeout = self.sonar.timeout_us();
        let attempts = self.sonar.attempts;

        let pins = self.pins_mut();
        pins.set_pull(pin, Pull::None)?;
        let mut echo = 0;
        for _ in 0..attempts {
            pins.digital_write(pin, Level::Low)?;
            pins.delay_us(2);
            pins.digital_write(pin, Level::High)?;
            pins.delay_us(10);
            pins.digital_write(pin, Level::Low)?;
            echo = pins.pulse_in(pin, Level::High, timeout)?;
            if echo > 0 {
                break;
            }
        }
        if echo == 0 {
            warn!("sonar: no echo after {} attempts", attempts);
        }
        Ok(unit.convert(echo))
    }

    /// Opens the talon attachment (`0..=80` degrees, clamped).
    pub fn set_talon(&mut self, degrees: i32) -> Result<(), P::Error> {
        let pin = self.pin_map().talon;
        self.pins_mut().servo_write(pin, clamp_servo(degrees))
    }

    /// Opens the claw attachment (`0..=80` degrees, clamped).
    pub fn set_claw(&mut self, degrees: i32) -> Result<(), P::Error> {
        let pin = self.pin_map().claw;
        self.pins_mut().servo_write(pin, clamp_servo(degrees))
    }
}

fn clamp_servo(degrees: i32) -> u8 {
    degrees.clamp(0, SERVO_MAX_DEGREES as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SonarConfig};
    use crate::hal::{MockPins, PinEvent};
    use crate::model::Model;
    use crate::traits::Pin;

    // =========================================================================
    // Line Sensor Tests
    // =========================================================================

    #[test]
    fn line_sensor_pins_by_model() {
        let mut pins = MockPins::new();
        pins.set_input(Pin::P11, Level::High);
        pins.set_input(Pin::P14, Level::High);

        let mut robot = Robot::new(pins);
        assert_eq!(robot.read_line(LineSensor::Left).unwrap(), Level::High);
        assert_eq!(robot.read_line(LineSensor::Right).unwrap(), Level::Low);

        robot.select_model(Model::Mk3);
        assert_eq!(robot.read_line(LineSensor::Left).unwrap(), Level::Low);
        assert_eq!(robot.read_line(LineSensor::Right).unwrap(), Level::High);
    }

    // =========================================================================
    // Sonar Tests
    // =========================================================================

    #[test]
    fn sonar_trigger_sequence() {
        let mut pins = MockPins::new();
        pins.queue_pulse(580);
        let mut robot = Robot::new(pins);

        assert_eq!(robot.sonar(SonarUnit::Centimeters).unwrap(), 10);
        assert_eq!(
            robot.pins().events,
            [
                PinEvent::Pull(Pin::P13, Pull::None),
                PinEvent::Digital(Pin::P13, Level::Low),
                PinEvent::DelayUs(2),
                PinEvent::Digital(Pin::P13, Level::High),
                PinEvent::DelayUs(10),
                PinEvent::Digital(Pin::P13, Level::Low),
                PinEvent::PulseIn(Pin::P13, Level::High),
            ]
        );
    }

    #[test]
    fn sonar_retries_until_echo() {
        let mut pins = MockPins::new();
        pins.queue_pulse(0);
        pins.queue_pulse(0);
        pins.queue_pulse(2960);
        let mut robot = Robot::with_model(pins, Model::Mk2A);

        assert_eq!(robot.sonar(SonarUnit::Inches).unwrap(), 20);
        let reads = robot
            .pins()
            .events
            .iter()
            .filter(|e| matches!(e, PinEvent::PulseIn(Pin::P15, _)))
            .count();
        assert_eq!(reads, 3);
    }

    #[test]
    fn sonar_gives_up_after_attempts() {
        let config = Config::default().with_sonar(SonarConfig::default().with_attempts(4));
        let mut robot = Robot::from_config(MockPins::new(), &config);

        assert_eq!(robot.sonar(SonarUnit::Microseconds).unwrap(), 0);
        let reads = robot
            .pins()
            .events
            .iter()
            .filter(|e| matches!(e, PinEvent::PulseIn(..)))
            .count();
        assert_eq!(reads, 4);
    }

    #[test]
    fn sonar_rounding_is_consistent() {
        assert_eq!(SonarUnit::Centimeters.convert(86), 1); // 1.48
        assert_eq!(SonarUnit::Centimeters.convert(87), 2); // 1.5
        assert_eq!(SonarUnit::Inches.convert(73), 0);
        assert_eq!(SonarUnit::Inches.convert(74), 1);
    }

    #[test]
    fn sonar_converts_longest_echo() {
        assert_eq!(SonarUnit::Centimeters.convert(u32::MAX), 74_051_160);
        assert_eq!(SonarUnit::Inches.convert(u32::MAX), 29_020_049);
        assert_eq!(SonarUnit::Microseconds.convert(u32::MAX), u32::MAX);
    }

    #[test]
    fn sonar_with_unbounded_range_does_not_overflow() {
        let config =
            Config::default().with_sonar(SonarConfig::default().with_max_distance_cm(u32::MAX));
        assert!(config.validate().is_ok());

        let mut robot = Robot::from_config(MockPins::new(), &config);
        robot.pins_mut().queue_pulse(u32::MAX - 10);
        assert_eq!(robot.sonar(SonarUnit::Centimeters).unwrap(), 74_051_160);
    }

    // =========================================================================
    // Servo Tests
    // =========================================================================

    #[test]
    fn servos_clamped() {
        let mut robot = Robot::new(MockPins::new());
        robot.set_talon(120).unwrap();
        robot.set_claw(-10).unwrap();
        assert_eq!(robot.pins().servo(Pin::P13), Some(80));
        assert_eq!(robot.pins().servo(Pin::P15), Some(0));
    }

    #[test]
    fn unit_from_text() {
        assert_eq!(SonarUnit::from_text("CM"), Some(SonarUnit::Centimeters));
        assert_eq!(SonarUnit::from_text("in"), Some(SonarUnit::Inches));
        assert_eq!(SonarUnit::from_text("feet"), None);
    }
}
