//! Robot configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::config::{Config, LedConfig, ScannerConfig};
//! use rs_robobit::{Model, Rgb};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.led_bar.length, 8);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_model(Model::Mk3)
//!     .with_led_bar(LedConfig::led_bar().with_brightness(80))
//!     .with_scanner(ScannerConfig::default().with_color(Rgb::BLUE).with_delay_ms(50));
//! assert!(config.validate().is_ok());
//! ```

use heapless::String as HString;

use crate::color::Rgb;
use crate::error::ConfigError;
use crate::led_bar::UpdateMode;
use crate::model::Model;

/// Maximum length for short config strings (device names)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Shortest and longest accepted scanner tick, in milliseconds.
pub const SCAN_DELAY_RANGE: (u32, u32) = (1, 10_000);

/// Pixels on the built-in LED bar.
pub const LED_BAR_LEN: usize = 8;

/// Pixels on the 5x5 matrix add-on.
pub const MATRIX_LEN: usize = 25;

/// Pixels on the BitFace add-on.
pub const BITFACE_LEN: usize = 17;

/// Default brightness for every LED add-on.
pub const DEFAULT_BRIGHTNESS: u8 = 40;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating at a character boundary if
/// too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    for c in s.chars() {
        if hs.push(c).is_err() {
            break;
        }
    }
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete robot configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Board revision
    pub model: Model,
    /// Whether Bluetooth owns the radio (LED updates are suppressed)
    pub bluetooth: bool,
    /// Device identification
    pub device: DeviceConfig,
    /// Built-in LED bar
    pub led_bar: LedConfig,
    /// 5x5 matrix add-on
    pub matrix: LedConfig,
    /// BitFace add-on
    pub bitface: LedConfig,
    /// Background scanner
    pub scanner: ScannerConfig,
    /// Ultrasonic ranging
    pub sonar: SonarConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Model::default(),
            bluetooth: false,
            device: DeviceConfig::default(),
            led_bar: LedConfig::led_bar(),
            matrix: LedConfig::matrix(),
            bitface: LedConfig::bitface(),
            scanner: ScannerConfig::default(),
            sonar: SonarConfig::default(),
        }
    }
}

impl Config {
    /// Set the board revision
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set whether Bluetooth is in use
    pub fn with_bluetooth(mut self, enabled: bool) -> Self {
        self.bluetooth = enabled;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set LED bar configuration
    pub fn with_led_bar(mut self, led_bar: LedConfig) -> Self {
        self.led_bar = led_bar;
        self
    }

    /// Set matrix configuration
    pub fn with_matrix(mut self, matrix: LedConfig) -> Self {
        self.matrix = matrix;
        self
    }

    /// Set BitFace configuration
    pub fn with_bitface(mut self, bitface: LedConfig) -> Self {
        self.bitface = bitface;
        self
    }

    /// Set scanner configuration
    pub fn with_scanner(mut self, scanner: ScannerConfig) -> Self {
        self.scanner = scanner;
        self
    }

    /// Set sonar configuration
    pub fn with_sonar(mut self, sonar: SonarConfig) -> Self {
        self.sonar = sonar;
        self
    }

    /// Checks the LED layouts and sonar settings.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StripTooShort`] for a strip shorter than its layout
    /// needs, [`ConfigError::InvalidValue`] for zero sonar attempts or range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_len(self.led_bar.length, crate::scanner::MIN_STRIP_LEN)?;
        check_len(self.matrix.length, MATRIX_LEN)?;
        check_len(self.bitface.length, BITFACE_LEN)?;
        if self.sonar.attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sonar.attempts",
            });
        }
        if self.sonar.max_distance_cm == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sonar.max_distance_cm",
            });
        }
        Ok(())
    }
}

fn check_len(len: usize, min: usize) -> Result<(), ConfigError> {
    if len < min {
        Err(ConfigError::StripTooShort { len, min })
    } else {
        Ok(())
    }
}

// ============================================================================
// LED Config
// ============================================================================

/// Configuration shared by the LED bar, matrix and BitFace
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedConfig {
    /// Number of pixels in the chain
    pub length: usize,
    /// Brightness (0-255)
    pub brightness: u8,
    /// Whether writes are shown immediately
    pub update_mode: UpdateMode,
}

impl LedConfig {
    /// Defaults for the built-in 8-pixel LED bar
    pub fn led_bar() -> Self {
        Self::with_length(LED_BAR_LEN)
    }

    /// Defaults for the 5x5 matrix
    pub fn matrix() -> Self {
        Self::with_length(MATRIX_LEN)
    }

    /// Defaults for the BitFace
    pub fn bitface() -> Self {
        Self::with_length(BITFACE_LEN)
    }

    fn with_length(length: usize) -> Self {
        Self {
            length,
            brightness: DEFAULT_BRIGHTNESS,
            update_mode: UpdateMode::Auto,
        }
    }

    /// Set the chain length
    pub fn with_len(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the brightness
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set the update mode
    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self::led_bar()
    }
}

// ============================================================================
// Scanner Config
// ============================================================================

/// Background scanner configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerConfig {
    /// Highlight colour
    pub color: Rgb,
    /// Delay between ticks in milliseconds (1-10000)
    pub delay_ms: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            color: Rgb::RED,
            delay_ms: 100,
        }
    }
}

impl ScannerConfig {
    /// Set the highlight colour
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set the tick delay, clamped to 1-10000 ms
    pub fn with_delay_ms(mut self, ms: u32) -> Self {
        self.delay_ms = clamp_scan_delay(ms);
        self
    }
}

/// Clamps a scanner tick delay to [`SCAN_DELAY_RANGE`].
pub fn clamp_scan_delay(ms: u32) -> u32 {
    ms.clamp(SCAN_DELAY_RANGE.0, SCAN_DELAY_RANGE.1)
}

// ============================================================================
// Sonar Config
// ============================================================================

/// Ultrasonic ranging configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SonarConfig {
    /// Longest distance measured; sets the echo timeout
    pub max_distance_cm: u32,
    /// Trigger pulses sent before giving up on an echo
    pub attempts: u8,
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self {
            max_distance_cm: 500,
            attempts: 10,
        }
    }
}

impl SonarConfig {
    /// Set the maximum distance
    pub fn with_max_distance_cm(mut self, cm: u32) -> Self {
        self.max_distance_cm = cm;
        self
    }

    /// Set the number of attempts
    pub fn with_attempts(mut self, attempts: u8) -> Self {
        self.attempts = attempts;
        self
    }

    /// Echo timeout in microseconds (58 µs per centimetre round trip).
    pub fn timeout_us(&self) -> u32 {
        self.max_distance_cm.saturating_mul(crate::sensors::US_PER_CM)
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("robobit"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
