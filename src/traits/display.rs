//! Display abstraction for the 128x64 monochrome OLED add-on.
//!
//! This module defines the [`OledDisplay`] trait: the drawing primitives the
//! robot exposes, on top of a buffered display. Nothing is visible until
//! [`OledDisplay::flush`] is called.

/// Buffered monochrome display.
///
/// Coordinates are pixels with the origin at the top-left corner. Drawing
/// outside the panel is clipped by the implementation.
///
/// # Example
///
/// ```ignore
/// use rs_robobit::traits::OledDisplay;
///
/// struct MyOled { /* ... */ }
///
/// impl OledDisplay for MyOled {
///     type Error = ();
///
///     fn text(&mut self, text: &str, x: i32, y: i32, inverse: bool) -> Result<(), ()> {
///         // draw glyphs...
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait OledDisplay {
    /// Error type for display operations.
    type Error;

    /// Draws `text` with its top-left corner at (`x`, `y`).
    ///
    /// `inverse` draws dark glyphs on a lit background.
    fn text(&mut self, text: &str, x: i32, y: i32, inverse: bool) -> Result<(), Self::Error>;

    /// Draws a decimal number like [`text`](Self::text).
    fn number(&mut self, value: i32, x: i32, y: i32, inverse: bool) -> Result<(), Self::Error> {
        use core::fmt::Write;

        // "-2147483648" is the longest i32
        let mut buf: heapless::String<11> = heapless::String::new();
        let _ = write!(buf, "{}", value);
        self.text(&buf, x, y, inverse)
    }

    /// Sets or clears a single pixel.
    fn pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), Self::Error>;

    /// Draws a one-pixel line between two points.
    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) -> Result<(), Self::Error>;

    /// Draws the outline of the rectangle spanning two corners.
    fn rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool)
        -> Result<(), Self::Error>;

    /// Draws the outline of a circle.
    fn circle(&mut self, x: i32, y: i32, radius: u32, on: bool) -> Result<(), Self::Error>;

    /// Lights (`true`) or blanks (`false`) the whole buffer.
    fn fill(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Selects inverted text rendering for subsequent calls.
    fn set_inverted(&mut self, inverted: bool) -> Result<(), Self::Error>;

    /// Selects the double-size font for subsequent text.
    fn set_zoom(&mut self, zoom: bool) -> Result<(), Self::Error>;

    /// Pushes the buffer to the panel.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
