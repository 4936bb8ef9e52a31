//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`].
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `graphics`: SSD1306 OLED over embedded-graphics (requires `display` feature)

pub mod mock;

#[cfg(feature = "display")]
pub mod graphics;

pub use mock::*;

#[cfg(feature = "display")]
pub use graphics::*;
