//! Robobit hardware revisions and their pin assignments.
//!
//! The motor wiring is the same on every revision; the sonar trigger and
//! line sensors moved between boards.

use crate::error::ConfigError;
use crate::parsing::lookup;
use crate::traits::Pin;

/// Robobit board revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Model {
    /// Original board.
    #[default]
    Mk1,
    /// Mk2.
    Mk2,
    /// Mk2 with the sonar moved to P15.
    Mk2A,
    /// Mk3: sonar on P15, line sensors on P16/P14.
    Mk3,
}

impl Model {
    /// Pin assignment for this revision.
    pub const fn pins(self) -> PinMap {
        let (sonar, line_left, line_right) = match self {
            Model::Mk1 | Model::Mk2 => (Pin::P13, Pin::P11, Pin::P5),
            Model::Mk2A => (Pin::P15, Pin::P11, Pin::P5),
            Model::Mk3 => (Pin::P15, Pin::P16, Pin::P14),
        };
        PinMap {
            left_pwm: Pin::P0,
            left_dir: Pin::P8,
            right_pwm: Pin::P1,
            right_dir: Pin::P12,
            sonar,
            line_left,
            line_right,
            talon: Pin::P13,
            claw: Pin::P15,
            led_bar: Pin::P13,
            addon: Pin::P15,
        }
    }

    /// Parses `"mk1"`, `"mk2"`, `"mk2a"` or `"mk3"`, case-insensitive.
    ///
    /// ```
    /// use rs_robobit::Model;
    ///
    /// assert_eq!(Model::from_text("Mk2A"), Some(Model::Mk2A));
    /// assert_eq!(Model::from_text("mk4"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(
            s,
            &[
                (&["mk1"], Model::Mk1),
                (&["mk2"], Model::Mk2),
                (&["mk2a"], Model::Mk2A),
                (&["mk3"], Model::Mk3),
            ],
        )
    }
}

impl TryFrom<u8> for Model {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Model::Mk1),
            1 => Ok(Model::Mk2),
            2 => Ok(Model::Mk2A),
            3 => Ok(Model::Mk3),
            _ => Err(ConfigError::UnknownVariant {
                kind: "Model",
                value,
            }),
        }
    }
}

/// Edge-connector assignment for one board revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// Left motor PWM (also carries the shared PWM period).
    pub left_pwm: Pin,
    /// Left motor direction (legacy wiring) or second input (dual-PWM).
    pub left_dir: Pin,
    /// Right motor PWM.
    pub right_pwm: Pin,
    /// Right motor direction (legacy wiring) or second input (dual-PWM).
    pub right_dir: Pin,
    /// Sonar trigger/echo.
    pub sonar: Pin,
    /// Left line sensor.
    pub line_left: Pin,
    /// Right line sensor.
    pub line_right: Pin,
    /// Talon servo.
    pub talon: Pin,
    /// Claw servo.
    pub claw: Pin,
    /// LED bar data.
    pub led_bar: Pin,
    /// Add-on bus (matrix, BitFace, IR receiver).
    pub addon: Pin,
}

impl PinMap {
    /// The four motor pins in write order: left PWM, left direction, right
    /// PWM, right direction.
    pub const fn motor_pins(&self) -> [Pin; 4] {
        [self.left_pwm, self.left_dir, self.right_pwm, self.right_dir]
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Model::default().pins()
    }
}
