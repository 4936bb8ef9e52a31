//! The BitFace add-on: two eyes, a nose and a 14-pixel mouth.
//!
//! Chain layout: mouth pixels 0-13, nose 14, left eye 15, right eye 16.

use crate::color::Rgb;
use crate::config::{LedConfig, BITFACE_LEN};
use crate::error::{ConfigError, RobotError};
use crate::led_bar::{ShowPolicy, UpdateMode};
use crate::parsing::lookup;
use crate::traits::LedStrip;

/// Number of mouth pixels.
pub const MOUTH_LEN: usize = 14;
/// Chain index of the nose.
pub const NOSE: usize = 14;
/// Chain index of the left eye.
pub const LEFT_EYE: usize = 15;
/// Chain index of the right eye.
pub const RIGHT_EYE: usize = 16;

/// Which eye(s) to colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Eyes {
    /// Left eye.
    Left,
    /// Right eye.
    Right,
    /// Both eyes.
    Both,
}

impl TryFrom<u8> for Eyes {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Eyes::Left),
            1 => Ok(Eyes::Right),
            2 => Ok(Eyes::Both),
            _ => Err(ConfigError::UnknownVariant {
                kind: "Eyes",
                value,
            }),
        }
    }
}

/// Mouth shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mouth {
    /// Smile.
    Smile,
    /// Broad grin.
    Grin,
    /// Sad.
    Sad,
    /// Frown.
    Frown,
    /// Straight line.
    Straight,
    /// Open "oooh".
    Oooh,
    /// Teeth "eeeh".
    Eeeh,
}

impl Mouth {
    const ALL: [Mouth; 7] = [
        Mouth::Smile,
        Mouth::Grin,
        Mouth::Sad,
        Mouth::Frown,
        Mouth::Straight,
        Mouth::Oooh,
        Mouth::Eeeh,
    ];

    /// Mouth pixels lit for this shape.
    pub const fn pixels(self) -> &'static [u8] {
        match self {
            Mouth::Smile => &[0, 1, 2, 3, 4, 5],
            Mouth::Grin => &[0, 1, 2, 3, 4, 5, 10, 11, 12, 13],
            Mouth::Sad => &[0, 5, 6, 7, 8, 9],
            Mouth::Frown => &[0, 5, 6, 7, 8, 9, 10, 11, 12, 13],
            Mouth::Straight => &[0, 5, 10, 11, 12, 13],
            Mouth::Oooh => &[1, 2, 3, 4, 6, 7, 8, 9, 10, 13],
            Mouth::Eeeh => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        }
    }

    /// Parses a shape name, case-insensitive.
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(
            s,
            &[
                (&["smile"], Mouth::Smile),
                (&["grin"], Mouth::Grin),
                (&["sad"], Mouth::Sad),
                (&["frown"], Mouth::Frown),
                (&["straight"], Mouth::Straight),
                (&["oooh", "ooh"], Mouth::Oooh),
                (&["eeeh", "eeh"], Mouth::Eeeh),
            ],
        )
    }
}

impl TryFrom<u8> for Mouth {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mouth::ALL
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::UnknownVariant {
                kind: "Mouth",
                value,
            })
    }
}

/// The BitFace.
///
/// # Example
///
/// ```rust
/// use rs_robobit::bitface::{BitFace, Eyes, Mouth};
/// use rs_robobit::hal::MockStrip;
/// use rs_robobit::Rgb;
///
/// let mut face = BitFace::new(MockStrip::new(17)).unwrap();
/// face.set_eyes(Eyes::Both, Rgb::BLUE).unwrap();
/// face.set_mouth(Mouth::Smile, Rgb::RED).unwrap();
///
/// assert_eq!(face.strip().lit(), vec![0, 1, 2, 3, 4, 5, 15, 16]);
/// ```
#[derive(Debug)]
pub struct BitFace<S: LedStrip> {
    strip: S,
    policy: ShowPolicy,
}

impl<S: LedStrip> BitFace<S> {
    /// Wraps a 17-pixel strip in auto-update mode at the default brightness.
    pub fn new(strip: S) -> Result<Self, RobotError<S::Error>> {
        Self::from_config(strip, &LedConfig::bitface(), false)
    }

    /// Wraps `strip` with the brightness and update mode from `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StripTooShort`] for fewer than 17 pixels.
    pub fn from_config(
        mut strip: S,
        config: &LedConfig,
        bluetooth: bool,
    ) -> Result<Self, RobotError<S::Error>> {
        if strip.len() < BITFACE_LEN {
            return Err(ConfigError::StripTooShort {
                len: strip.len(),
                min: BITFACE_LEN,
            }
            .into());
        }
        strip
            .set_brightness(config.brightness)
            .map_err(RobotError::Hardware)?;
        Ok(Self {
            strip,
            policy: ShowPolicy {
                mode: config.update_mode,
                bluetooth,
            },
        })
    }

    /// Borrows the strip.
    #[inline]
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Switches between automatic and manual updates.
    pub fn set_update_mode(&mut self, mode: UpdateMode) {
        self.policy.mode = mode;
    }

    /// Tells the face whether Bluetooth is active.
    pub fn set_bluetooth(&mut self, enabled: bool) {
        self.policy.bluetooth = enabled;
    }

    /// Sets every pixel to `color`.
    pub fn set_all(&mut self, color: Rgb) -> Result<(), S::Error> {
        self.strip.fill(color)?;
        self.policy.update(&mut self.strip)
    }

    /// Colours one or both eyes.
    pub fn set_eyes(&mut self, eyes: Eyes, color: Rgb) -> Result<(), S::Error> {
        if matches!(eyes, Eyes::Left | Eyes::Both) {
            self.strip.set_pixel(LEFT_EYE, color)?;
        }
        if matches!(eyes, Eyes::Right | Eyes::Both) {
            self.strip.set_pixel(RIGHT_EYE, color)?;
        }
        self.policy.update(&mut self.strip)
    }

    /// Colours the nose.
    pub fn set_nose(&mut self, color: Rgb) -> Result<(), S::Error> {
        self.strip.set_pixel(NOSE, color)?;
        self.policy.update(&mut self.strip)
    }

    /// Draws `mouth` in `color`, clearing the previous mouth first.
    pub fn set_mouth(&mut self, mouth: Mouth, color: Rgb) -> Result<(), S::Error> {
        for i in 0..MOUTH_LEN {
            self.strip.set_pixel(i, Rgb::OFF)?;
        }
        for &i in mouth.pixels() {
            self.strip.set_pixel(i as usize, color)?;
        }
        self.policy.update(&mut self.strip)
    }

    /// Sets the brightness (0-255).
    pub fn set_brightness(&mut self, level: u8) -> Result<(), S::Error> {
        self.strip.set_brightness(level)?;
        self.policy.update(&mut self.strip)
    }

    /// Pushes the frame buffer to the LEDs unless Bluetooth is active.
    pub fn show(&mut self) -> Result<(), S::Error> {
        self.policy.show(&mut self.strip)
    }
}
