//! The 5x5 LED matrix add-on.
//!
//! The matrix is wired as a 25-pixel chain starting at the bottom-right
//! corner. This module presents it the way the micro:bit display is
//! addressed: `(0, 0)` top-left, `(4, 4)` bottom-right, and linear ids
//! 0-24 in reading order.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::matrix::{EyeGaze, EyeSize, Matrix5};
//! use rs_robobit::hal::MockStrip;
//! use rs_robobit::Rgb;
//!
//! let mut matrix = Matrix5::new(MockStrip::new(25)).unwrap();
//! matrix.eyeball(EyeGaze::Forward, Rgb::BLUE, EyeSize::Small).unwrap();
//!
//! // the centre pixel is the pupil
//! assert_eq!(matrix.strip().shown[Matrix5::<MockStrip>::xy_index(2, 2).unwrap()], Rgb::OFF);
//! assert_eq!(matrix.strip().lit().len(), 25 - 4 - 1);
//! ```

use crate::color::Rgb;
use crate::config::{LedConfig, MATRIX_LEN};
use crate::error::{ConfigError, RobotError};
use crate::led_bar::{ShowPolicy, UpdateMode};
use crate::parsing::lookup;
use crate::traits::LedStrip;

/// Width and height of the matrix.
pub const MATRIX_SIZE: i32 = 5;

/// Where the eyeball looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyeGaze {
    /// Straight ahead.
    Forward,
    /// Down.
    Down,
    /// Up.
    Up,
    /// Left.
    Left,
    /// Right.
    Right,
    /// Down and left.
    DownLeft,
    /// Down and right.
    DownRight,
    /// Up and left.
    UpLeft,
    /// Up and right.
    UpRight,
}

impl EyeGaze {
    /// Every gaze, in selector order.
    pub const ALL: [EyeGaze; 9] = [
        EyeGaze::Forward,
        EyeGaze::Down,
        EyeGaze::Up,
        EyeGaze::Left,
        EyeGaze::Right,
        EyeGaze::DownLeft,
        EyeGaze::DownRight,
        EyeGaze::UpLeft,
        EyeGaze::UpRight,
    ];

    /// Parses a gaze name such as `"forward"` or `"up-left"`.
    pub fn from_text(s: &str) -> Option<Self> {
        lookup(
            s,
            &[
                (&["forward", "ahead"], EyeGaze::Forward),
                (&["down"], EyeGaze::Down),
                (&["up"], EyeGaze::Up),
                (&["left"], EyeGaze::Left),
                (&["right"], EyeGaze::Right),
                (&["downleft", "down-left"], EyeGaze::DownLeft),
                (&["downright", "down-right"], EyeGaze::DownRight),
                (&["upleft", "up-left"], EyeGaze::UpLeft),
                (&["upright", "up-right"], EyeGaze::UpRight),
            ],
        )
    }

    /// Pupil pixels (matrix coordinates) for this gaze.
    ///
    /// Small pupils are a single pixel. Large pupils are a plus shape for
    /// the straight gazes and a 2x2 block for the diagonals.
    fn pupil(self, size: EyeSize) -> Pupil {
        use EyeGaze::*;
        match size {
            EyeSize::Small => {
                let (x, y) = match self {
                    Forward => (2, 2),
                    Down => (2, 3),
                    Up => (2, 1),
                    Left => (3, 2),
                    Right => (1, 2),
                    DownLeft => (3, 3),
                    DownRight => (1, 3),
                    UpLeft => (3, 1),
                    UpRight => (1, 1),
                };
                Pupil::Dot(x, y)
            }
            EyeSize::Large => match self {
                Forward => Pupil::Plus(2, 2),
                Down => Pupil::Plus(2, 3),
                Up => Pupil::Plus(2, 1),
                Left => Pupil::Plus(3, 2),
                Right => Pupil::Plus(1, 2),
                DownLeft => Pupil::Block(2, 2),
                DownRight => Pupil::Block(1, 2),
                UpLeft => Pupil::Block(2, 1),
                UpRight => Pupil::Block(1, 1),
            },
        }
    }
}

impl TryFrom<u8> for EyeGaze {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        EyeGaze::ALL
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::UnknownVariant {
                kind: "EyeGaze",
                value,
            })
    }
}

/// Pupil size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyeSize {
    /// One pixel.
    #[default]
    Small,
    /// Four or five pixels.
    Large,
}

impl TryFrom<u8> for EyeSize {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EyeSize::Small),
            1 => Ok(EyeSize::Large),
            _ => Err(ConfigError::UnknownVariant {
                kind: "EyeSize",
                value,
            }),
        }
    }
}

#[derive(Clone, Copy)]
enum Pupil {
    Dot(i32, i32),
    Plus(i32, i32),
    Block(i32, i32),
}

impl Pupil {
    /// Pixel buffer sized for the largest pupil, and how many entries are used.
    fn pixels(self) -> ([(i32, i32); 5], usize) {
        match self {
            Pupil::Dot(x, y) => ([(x, y); 5], 1),
            Pupil::Plus(x, y) => ([(x, y), (x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)], 5),
            Pupil::Block(x, y) => ([(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1), (x, y)], 4),
        }
    }
}

/// A 5x5 monochrome image, one bit per pixel.
///
/// Rows are given top to bottom; within a row the most significant of the
/// five low bits is the leftmost pixel, so binary literals read like the
/// picture.
///
/// ```
/// use rs_robobit::matrix::Image5;
///
/// let heart = Image5::from_rows([
///     0b01010,
///     0b11111,
///     0b11111,
///     0b01110,
///     0b00100,
/// ]);
/// assert!(heart.pixel(1, 0));
/// assert!(!heart.pixel(0, 0));
/// assert!(heart.pixel(2, 4));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image5 {
    rows: [u8; 5],
}

impl Image5 {
    /// Builds an image from five rows of five bits.
    pub const fn from_rows(rows: [u8; 5]) -> Self {
        Self {
            rows: [
                rows[0] & 0x1f,
                rows[1] & 0x1f,
                rows[2] & 0x1f,
                rows[3] & 0x1f,
                rows[4] & 0x1f,
            ],
        }
    }

    /// Whether pixel `(x, y)` is set. Out-of-range coordinates are unset.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        if !in_range(x, y) {
            return false;
        }
        self.rows[y as usize] & (0x10 >> x) != 0
    }
}

fn in_range(x: i32, y: i32) -> bool {
    (0..MATRIX_SIZE).contains(&x) && (0..MATRIX_SIZE).contains(&y)
}

/// The 5x5 matrix.
#[derive(Debug)]
pub struct Matrix5<S: LedStrip> {
    strip: S,
    policy: ShowPolicy,
}

impl<S: LedStrip> Matrix5<S> {
    /// Wraps a 25-pixel strip in auto-update mode at the default brightness.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StripTooShort`] for fewer than 25 pixels.
    pub fn new(strip: S) -> Result<Self, RobotError<S::Error>> {
        Self::from_config(strip, &LedConfig::matrix(), false)
    }

    /// Wraps `strip` with the brightness and update mode from `config`.
    pub fn from_config(
        mut strip: S,
        config: &LedConfig,
        bluetooth: bool,
    ) -> Result<Self, RobotError<S::Error>> {
        if strip.len() < MATRIX_LEN {
            return Err(ConfigError::StripTooShort {
                len: strip.len(),
                min: MATRIX_LEN,
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

    /// Strip index of linear id `id` (0-24, reading order).
    pub fn id_index(id: usize) -> Option<usize> {
        if id >= MATRIX_LEN {
            return None;
        }
        Some((4 - id % 5) + (4 - id / 5) * 5)
    }

    /// Strip index of `(x, y)`, or `None` outside the matrix.
    pub fn xy_index(x: i32, y: i32) -> Option<usize> {
        if !in_range(x, y) {
            return None;
        }
        Some(((4 - x) + (4 - y) * 5) as usize)
    }

    /// Borrows the strip.
    #[inline]
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Mutably borrows the strip.
    #[inline]
    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    /// Switches between automatic and manual updates.
    pub fn set_update_mode(&mut self, mode: UpdateMode) {
        self.policy.mode = mode;
    }

    /// Tells the matrix whether Bluetooth is active.
    pub fn set_bluetooth(&mut self, enabled: bool) {
        self.policy.bluetooth = enabled;
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.strip.clear()?;
        self.policy.update(&mut self.strip)
    }

    /// Sets every pixel to `color`.
    pub fn set_all(&mut self, color: Rgb) -> Result<(), S::Error> {
        self.strip.fill(color)?;
        self.policy.update(&mut self.strip)
    }

    /// Sets the pixel with linear id `id`. Ids past 24 are ignored.
    pub fn set_pixel(&mut self, id: usize, color: Rgb) -> Result<(), S::Error> {
        if let Some(index) = Self::id_index(id) {
            self.strip.set_pixel(index, color)?;
        }
        self.policy.update(&mut self.strip)
    }

    /// Sets pixel `(x, y)`. Coordinates outside the matrix are ignored.
    pub fn set_xy(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), S::Error> {
        self.raw_xy(x, y, color)?;
        self.policy.update(&mut self.strip)
    }

    fn raw_xy(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), S::Error> {
        match Self::xy_index(x, y) {
            Some(index) => self.strip.set_pixel(index, color),
            None => Ok(()),
        }
    }

    /// Spreads the colour wheel across the matrix in reading order.
    pub fn rainbow(&mut self) -> Result<(), S::Error> {
        for id in 0..MATRIX_LEN {
            let hue = (id * 360 / MATRIX_LEN) as u16;
            if let Some(index) = Self::id_index(id) {
                self.strip.set_pixel(index, Rgb::from_hue(hue))?;
            }
        }
        self.policy.update(&mut self.strip)
    }

    /// Draws the rectangle spanning `(x1, y1)`-`(x2, y2)`, outline only
    /// unless `fill`. The part outside the matrix is clipped.
    pub fn rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Rgb,
        fill: bool,
    ) -> Result<(), S::Error> {
        for x in x1.max(0)..=x2.min(MATRIX_SIZE - 1) {
            for y in y1.max(0)..=y2.min(MATRIX_SIZE - 1) {
                let edge = x == x1 || x == x2 || y == y1 || y == y2;
                if edge || fill {
                    self.raw_xy(x, y, color)?;
                }
            }
        }
        self.policy.update(&mut self.strip)
    }

    /// Draws an eyeball: the whole matrix in `color` minus the corners,
    /// with a dark pupil looking towards `gaze`.
    pub fn eyeball(&mut self, gaze: EyeGaze, color: Rgb, size: EyeSize) -> Result<(), S::Error> {
        self.strip.fill(color)?;
        for (x, y) in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            self.raw_xy(x, y, Rgb::OFF)?;
        }
        let (pupil, used) = gaze.pupil(size).pixels();
        for &(x, y) in &pupil[..used] {
            self.raw_xy(x, y, Rgb::OFF)?;
        }
        self.policy.update(&mut self.strip)
    }

    /// Draws the set pixels of `image` in `color`, leaving the rest as is.
    pub fn show_image(&mut self, image: &Image5, color: Rgb) -> Result<(), S::Error> {
        for x in 0..MATRIX_SIZE {
            for y in 0..MATRIX_SIZE {
                if image.pixel(x, y) {
                    self.raw_xy(x, y, color)?;
                }
            }
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
