//! Hardware abstraction traits for pin I/O, timing and the IR receiver.
//!
//! This module defines the interfaces the robot logic needs from the board.
//! Everything here is implemented by [`crate::hal::mock`] for desktop tests
//! and by a board support crate on the real hardware.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`PinIo`] | Digital/analog writes, PWM period, pulse timing, servos |
//! | [`Delay`] | Async millisecond delay for timed manoeuvres |
//! | [`IrReceiver`] | Last decoded IR remote code |
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::traits::{Level, Pin, PinIo};
//! use rs_robobit::hal::MockPins;
//!
//! let mut pins = MockPins::new();
//! pins.analog_write(Pin::P0, 512).unwrap();
//! pins.digital_write(Pin::P8, Level::High).unwrap();
//!
//! assert_eq!(pins.analog(Pin::P0), Some(512));
//! assert_eq!(pins.digital(Pin::P8), Some(Level::High));
//! ```

use crate::error::ConfigError;

/// Edge-connector pin number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(pub u8);

impl Pin {
    /// P0
    pub const P0: Pin = Pin(0);
    /// P1
    pub const P1: Pin = Pin(1);
    /// P2
    pub const P2: Pin = Pin(2);
    /// P5
    pub const P5: Pin = Pin(5);
    /// P8
    pub const P8: Pin = Pin(8);
    /// P11
    pub const P11: Pin = Pin(11);
    /// P12
    pub const P12: Pin = Pin(12);
    /// P13
    pub const P13: Pin = Pin(13);
    /// P14
    pub const P14: Pin = Pin(14);
    /// P15
    pub const P15: Pin = Pin(15);
    /// P16
    pub const P16: Pin = Pin(16);
}

/// Logic level of a digital pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0.
    #[default]
    Low,
    /// Logic 1.
    High,
}

impl Level {
    /// `High` for `true`, `Low` for `false`.
    #[inline]
    pub const fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Returns true for [`Level::High`].
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Numeric form used by the block layer (0 or 1).
    #[inline]
    pub const fn as_u8(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        Level::from_bool(high)
    }
}

impl TryFrom<u8> for Level {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Level::Low),
            1 => Ok(Level::High),
            _ => Err(ConfigError::UnknownVariant {
                kind: "Level",
                value,
            }),
        }
    }
}

/// Internal pull resistor configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No pull resistor.
    #[default]
    None,
    /// Pull up to VCC.
    Up,
    /// Pull down to ground.
    Down,
}

/// Raw pin I/O - everything the robot logic writes to or reads from the
/// edge connector.
///
/// Implement this for your board. Values passed in are already clamped by
/// the caller; implementations may assume duty cycles are `0..=1023` and
/// servo angles `0..=180`.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_robobit::traits::{Level, Pin, PinIo, Pull};
///
/// struct Board { /* peripheral handles */ }
///
/// impl PinIo for Board {
///     type Error = ();
///
///     fn digital_write(&mut self, pin: Pin, level: Level) -> Result<(), ()> {
///         // drive GPIO...
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait PinIo {
    /// Error type for pin operations.
    type Error;

    /// Drives a digital output.
    fn digital_write(&mut self, pin: Pin, level: Level) -> Result<(), Self::Error>;

    /// Reads a digital input.
    fn digital_read(&mut self, pin: Pin) -> Result<Level, Self::Error>;

    /// Writes a PWM duty cycle (`0..=1023`).
    fn analog_write(&mut self, pin: Pin, duty: u16) -> Result<(), Self::Error>;

    /// Sets the PWM carrier period in microseconds.
    ///
    /// On most boards all PWM channels share one timer, so this is
    /// effectively a global setting.
    fn set_pwm_period(&mut self, pin: Pin, period_us: u32) -> Result<(), Self::Error>;

    /// Measures the length of the next pulse at `level`, in microseconds.
    ///
    /// Returns 0 if no pulse completed within `timeout_us`.
    fn pulse_in(&mut self, pin: Pin, level: Level, timeout_us: u32) -> Result<u32, Self::Error>;

    /// Positions a servo on `pin` at `degrees`.
    fn servo_write(&mut self, pin: Pin, degrees: u8) -> Result<(), Self::Error>;

    /// Configures the pull resistor of an input pin.
    fn set_pull(&mut self, pin: Pin, pull: Pull) -> Result<(), Self::Error>;

    /// Busy-waits for `us` microseconds (trigger pulse timing).
    fn delay_us(&mut self, us: u32);
}

/// Async delay used by the timed manoeuvres (`drive_for`, `go_for`, ...).
pub trait Delay {
    /// Delay for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32) -> impl core::future::Future<Output = ()>;
}

/// Decoded IR remote input.
///
/// The raw pulse decoding lives in the board support layer; the robot only
/// needs command bytes.
pub trait IrReceiver {
    /// The last decoded command code, or `None` before any key was seen.
    fn last_code(&self) -> Option<u8>;

    /// Takes a code received since the previous call, if any.
    ///
    /// Unlike [`last_code`](Self::last_code) this reports a repeated press
    /// of the same key as a new event.
    fn next_code(&mut self) -> Option<u8>;
}
