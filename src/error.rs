//! Error types.
//!
//! Numeric inputs are clamped everywhere in this crate, so the only errors
//! surfaced are configuration misuse ([`ConfigError`]) and whatever the
//! hardware collaborator reports (wrapped in [`RobotError`]).

use core::fmt;

/// Configuration misuse that would otherwise produce undefined pixel
/// indices or pin assignments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The LED strip is too short for the requested layout.
    StripTooShort {
        /// Actual strip length.
        len: usize,
        /// Minimum length required.
        min: usize,
    },
    /// A raw selector value does not name any variant.
    UnknownVariant {
        /// Name of the selector type (e.g. `"Side"`).
        kind: &'static str,
        /// The rejected raw value.
        value: u8,
    },
    /// A configuration value is outside its accepted range.
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::StripTooShort { len, min } => {
                write!(f, "strip of {} pixels is too short (need at least {})", len, min)
            }
            ConfigError::UnknownVariant { kind, value } => {
                write!(f, "unknown {} value {}", kind, value)
            }
            ConfigError::InvalidValue { field } => write!(f, "invalid value for {}", field),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Error from an operation that talks to hardware and may also reject its
/// configuration.
///
/// `E` is the collaborator's associated error type (`()` for the mocks).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RobotError<E> {
    /// The configuration was rejected before any hardware was touched.
    Config(ConfigError),
    /// The hardware collaborator failed.
    Hardware(E),
}

impl<E> From<ConfigError> for RobotError<E> {
    fn from(err: ConfigError) -> Self {
        RobotError::Config(err)
    }
}

impl<E: fmt::Debug> fmt::Display for RobotError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotError::Config(err) => write!(f, "configuration error: {}", err),
            RobotError::Hardware(err) => write!(f, "hardware error: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for RobotError<E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn strip_too_short_message() {
        let err = ConfigError::StripTooShort { len: 2, min: 3 };
        assert_eq!(
            err.to_string(),
            "strip of 2 pixels is too short (need at least 3)"
        );
    }

    #[test]
    fn unknown_variant_message() {
        let err = ConfigError::UnknownVariant {
            kind: "Side",
            value: 7,
        };
        assert_eq!(err.to_string(), "unknown Side value 7");
    }

    #[test]
    fn robot_error_from_config() {
        let err: RobotError<()> = ConfigError::InvalidValue { field: "length" }.into();
        assert_eq!(
            err,
            RobotError::Config(ConfigError::InvalidValue { field: "length" })
        );
        assert_eq!(
            err.to_string(),
            "configuration error: invalid value for length"
        );
    }

    #[test]
    fn robot_error_hardware_message() {
        let err: RobotError<&str> = RobotError::Hardware("bus fault");
        assert_eq!(err.to_string(), "hardware error: \"bus fault\"");
    }
}
