//! Addressable LED strip abstraction.
//!
//! The LED bar, 5x5 matrix and BitFace are all WS2812-style chains; this
//! trait is the interface the crate needs from the chain driver. Pixel
//! writes land in a frame buffer and only reach the LEDs on [`LedStrip::show`].

use crate::color::Rgb;

/// An ordered chain of RGB pixels with a frame buffer.
///
/// # Implementation Notes
///
/// - Out-of-range indices in [`set_pixel`](Self::set_pixel) should be ignored
/// - [`rotate`](Self::rotate) and [`shift`](Self::shift) move pixels towards
///   higher indices
/// - Brightness scales colours at [`show`](Self::show) time, not in the buffer
pub trait LedStrip {
    /// Error type for strip operations.
    type Error;

    /// Number of pixels in the chain.
    fn len(&self) -> usize;

    /// Returns true for a zero-length chain.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets one pixel in the frame buffer.
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error>;

    /// Sets every pixel in the frame buffer.
    fn fill(&mut self, color: Rgb) -> Result<(), Self::Error>;

    /// Turns every pixel off in the frame buffer.
    fn clear(&mut self) -> Result<(), Self::Error> {
        self.fill(Rgb::OFF)
    }

    /// Rotates the buffer by `n` towards higher indices; the last pixels wrap
    /// to the front.
    fn rotate(&mut self, n: usize) -> Result<(), Self::Error>;

    /// Shifts the buffer by `n` towards higher indices, filling the front
    /// with off pixels.
    fn shift(&mut self, n: usize) -> Result<(), Self::Error>;

    /// Sets the global brightness (0-255).
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Pushes the frame buffer to the LEDs.
    fn show(&mut self) -> Result<(), Self::Error>;
}
