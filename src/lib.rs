//! # rs-robobit
//!
//! Control library for the Robobit buggy family (Mk1, Mk2, Mk2/LedBar, Mk3)
//! and its add-ons.
//!
//! ## Features
//!
//! - **Motor drive mapping**: reverse PWM compensation curve, left/right bias
//!   correction and speed-dependent PWM carrier bands
//! - **Two motor APIs**: signed speeds for direction-pin wiring, percentages
//!   for dual-PWM wiring, with coast/brake stops and timed variants
//! - **LED add-ons**: LED bar with Larsson scanner, 5x5 matrix, BitFace
//! - **Sensors**: line sensors, ultrasonic sonar with retries, talon/claw servos
//! - **IR remote and OLED**: key dispatch and a 128x64 drawing facade
//! - **Background scanner**: cancellable tokio task (`background` feature)
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Collaborator interfaces (pins, LED strips, OLED, IR, delay)
//! - `drive` - Pure speed mapping and drive state
//! - `scanner` - Larsson scanner state machine
//! - `robot` - Routes drive output to the model's pins
//! - `hal` - Mock collaborators, plus SSD1306 support with `display`
//!
//! ## Example
//!
//! ```rust
//! use rs_robobit::{hal::MockPins, traits::Pin, Robot, Side, Turn};
//!
//! let mut robot = Robot::new(MockPins::new());
//!
//! // Drifting right: bias left, slowing the left side by 10%
//! robot.set_bias(Turn::Left, 10);
//! robot.drive(600).unwrap();
//!
//! assert_eq!(robot.pins().analog(Pin::P0), Some(540));
//! assert_eq!(robot.pins().analog(Pin::P1), Some(600));
//! assert_eq!(robot.pins().period(Pin::P0), Some(20_000));
//!
//! robot.motor(Side::Both, 0).unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Must come first so the logging macros are visible in every module.
mod fmt;

/// BitFace add-on: eyes, nose and mouth shapes.
pub mod bitface;
/// 24-bit colours and the Robobit palette.
pub mod color;
/// Configuration with builder methods and validation.
pub mod config;
/// Motor speed mapping and drive state.
pub mod drive;
/// Error types.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// IR remote key codes and handler dispatch.
pub mod ir;
/// LED bar with update policy and scanner.
pub mod led_bar;
/// 5x5 LED matrix add-on.
pub mod matrix;
/// Robobit models and their pin maps.
pub mod model;
/// OLED 128x64 drawing facade.
pub mod oled;
/// Allocation-free text selector parsing.
pub mod parsing;
/// The robot: pins, model and drive state.
pub mod robot;
/// Larsson scanner animation.
pub mod scanner;
/// Line sensors, sonar and servos.
pub mod sensors;
/// Collaborator traits for hardware abstraction.
pub mod traits;

/// Background scanner task (tokio).
#[cfg(feature = "background")]
pub mod services;

// Re-exports for convenience
pub use bitface::{BitFace, Eyes, Mouth};
pub use color::Rgb;
pub use drive::{
    BiasState, Direction, DriveCommand, DriveController, DriveOutputs, MotorOutput, PwmPeriodBand,
    Side, StopMode, Turn,
};
pub use error::{ConfigError, RobotError};
pub use ir::{IrKey, IrRemote};
pub use led_bar::{LedBar, UpdateMode};
pub use matrix::{EyeGaze, EyeSize, Image5, Matrix5};
pub use model::{Model, PinMap};
pub use oled::Oled;
pub use robot::{Robot, RobotState};
pub use scanner::{ScanColors, ScanFrame, ScannerAnimator};
pub use sensors::{LineSensor, SonarUnit};
pub use traits::{Delay, IrReceiver, LedStrip, Level, OledDisplay, Pin, PinIo, Pull};

// Config re-exports
pub use config::{Config, DeviceConfig, LedConfig, ScannerConfig, SonarConfig};

#[cfg(feature = "background")]
pub use services::{ScannerService, ScannerTask, SharedLedBar};
