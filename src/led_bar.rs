//! The built-in LED bar and its Larsson scanner.
//!
//! [`LedBar`] wraps an [`LedStrip`] with the update policy the robot uses
//! for all of its LED add-ons:
//!
//! - In [`UpdateMode::Auto`] every write is followed by a `show`.
//! - In [`UpdateMode::Manual`] nothing reaches the LEDs until
//!   [`LedBar::show`] is called.
//! - While Bluetooth owns the radio, `show` does nothing: the LED driver's
//!   timing-critical output would corrupt the radio stack.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::{LedBar, Rgb, UpdateMode};
//! use rs_robobit::hal::MockStrip;
//!
//! let mut bar = LedBar::new(MockStrip::new(8)).unwrap();
//! bar.set_update_mode(UpdateMode::Manual);
//! bar.set_scan_color(Rgb::GREEN);
//! bar.scan_step().unwrap();
//! assert_eq!(bar.strip().show_count, 0);
//!
//! bar.show().unwrap();
//! assert_eq!(bar.strip().shown[2], Rgb::GREEN);
//! ```

use crate::color::Rgb;
use crate::config::LedConfig;
use crate::error::RobotError;
use crate::scanner::{ScanFrame, ScannerAnimator};
use crate::traits::LedStrip;

/// When pixel writes become visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateMode {
    /// Show after every change.
    #[default]
    Auto,
    /// Show only on an explicit [`LedBar::show`].
    Manual,
}

/// Update policy shared by every LED add-on.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ShowPolicy {
    pub(crate) mode: UpdateMode,
    pub(crate) bluetooth: bool,
}

impl ShowPolicy {
    pub(crate) fn show<S: LedStrip>(&self, strip: &mut S) -> Result<(), S::Error> {
        if self.bluetooth {
            return Ok(());
        }
        strip.show()
    }

    pub(crate) fn update<S: LedStrip>(&self, strip: &mut S) -> Result<(), S::Error> {
        match self.mode {
            UpdateMode::Auto => self.show(strip),
            UpdateMode::Manual => Ok(()),
        }
    }
}

/// An LED bar with scanner animation.
#[derive(Debug)]
pub struct LedBar<S: LedStrip> {
    strip: S,
    policy: ShowPolicy,
    scanner: ScannerAnimator,
}

impl<S: LedStrip> LedBar<S> {
    /// Wraps `strip` in auto-update mode at the default brightness.
    pub fn new(strip: S) -> Result<Self, S::Error> {
        Self::from_config(strip, &LedConfig::led_bar(), false)
    }

    /// Wraps `strip` with the brightness and update mode from `config`.
    ///
    /// The strip's own length wins over `config.length`.
    pub fn from_config(mut strip: S, config: &LedConfig, bluetooth: bool) -> Result<Self, S::Error> {
        strip.set_brightness(config.brightness)?;
        Ok(Self {
            strip,
            policy: ShowPolicy {
                mode: config.update_mode,
                bluetooth,
            },
            scanner: ScannerAnimator::default(),
        })
    }

    /// Number of LEDs.
    #[inline]
    pub fn len(&self) -> usize {
        self.strip.len()
    }

    /// Returns true for a bar without LEDs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
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

    /// Consumes the bar, returning the strip.
    pub fn into_strip(self) -> S {
        self.strip
    }

    /// Current update mode.
    #[inline]
    pub fn update_mode(&self) -> UpdateMode {
        self.policy.mode
    }

    /// Switches between automatic and manual updates.
    pub fn set_update_mode(&mut self, mode: UpdateMode) {
        self.policy.mode = mode;
    }

    /// Tells the bar whether Bluetooth is active. While it is, `show` does
    /// nothing.
    pub fn set_bluetooth(&mut self, enabled: bool) {
        self.policy.bluetooth = enabled;
    }

    /// Sets every LED to `color`.
    pub fn set_all(&mut self, color: Rgb) -> Result<(), S::Error> {
        self.strip.fill(color)?;
        self.policy.update(&mut self.strip)
    }

    /// Turns every LED off.
    pub fn clear(&mut self) -> Result<(), S::Error> {
        self.strip.clear()?;
        self.policy.update(&mut self.strip)
    }

    /// Sets one LED. Out-of-range indices are ignored.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), S::Error> {
        if index < self.strip.len() {
            self.strip.set_pixel(index, color)?;
        }
        self.policy.update(&mut self.strip)
    }

    /// Spreads the colour wheel across the bar.
    pub fn rainbow(&mut self) -> Result<(), S::Error> {
        let len = self.strip.len();
        for i in 0..len {
            let hue = (i * 360 / len) as u16;
            self.strip.set_pixel(i, Rgb::from_hue(hue))?;
        }
        self.policy.update(&mut self.strip)
    }

    /// Shifts the LEDs one place up, turning the first one off.
    pub fn shift(&mut self) -> Result<(), S::Error> {
        self.strip.shift(1)?;
        self.policy.update(&mut self.strip)
    }

    /// Rotates the LEDs one place up.
    pub fn rotate(&mut self) -> Result<(), S::Error> {
        self.strip.rotate(1)?;
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

    /// Changes the scanner colour; the tail colours follow.
    pub fn set_scan_color(&mut self, color: Rgb) {
        self.scanner.set_primary(color);
    }

    /// The scanner state.
    #[inline]
    pub fn scanner(&self) -> &ScannerAnimator {
        &self.scanner
    }

    /// Advances the scanner one pixel and writes the interior LEDs.
    ///
    /// # Errors
    ///
    /// [`RobotError::Config`] if the bar is shorter than three LEDs.
    pub fn scan_step(&mut self) -> Result<ScanFrame, RobotError<S::Error>> {
        let frame = self.scanner.step(self.strip.len())?;
        for (index, color) in frame.pixels() {
            self.strip
                .set_pixel(index, color)
                .map_err(RobotError::Hardware)?;
        }
        self.policy
            .update(&mut self.strip)
            .map_err(RobotError::Hardware)?;
        Ok(frame)
    }
}
