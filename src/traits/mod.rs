//! Trait definitions for hardware abstraction.
//!
//! This module defines the collaborator interfaces that allow rs-robobit to:
//! - Run on the real buggy (through a board support crate)
//! - Run on desktop against the mocks in [`crate::hal::mock`]
//!
//! # Submodules
//!
//! - `hardware`: Pin I/O, delays and the IR receiver
//! - `led`: Addressable LED chains (LED bar, matrix, BitFace)
//! - `display`: The monochrome OLED add-on
//!
//! # Hardware Abstraction
//!
//! The key traits are:
//!
//! - [`PinIo`]: digital/analog pin writes, PWM period, pulse timing, servos
//! - [`LedStrip`]: a buffered chain of RGB pixels
//! - [`OledDisplay`]: buffered drawing primitives
//! - [`IrReceiver`]: last decoded IR command
//! - [`Delay`]: async millisecond delay

pub mod display;
pub mod hardware;
pub mod led;

pub use display::*;
pub use hardware::*;
pub use led::*;
