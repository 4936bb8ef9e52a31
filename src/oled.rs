//! OLED 128x64 add-on.
//!
//! [`Oled`] wraps any [`OledDisplay`] with the robot's refresh rules:
//!
//! | Call | Refresh |
//! |------|---------|
//! | `text`, `number`, `set_all`, `set_inverted`, `set_zoom` | always |
//! | `pixel`, `line`, `rectangle`, `circle` | when `update` is true |
//! | `update` | always |
//!
//! Batching shapes with `update = false` and finishing with
//! [`Oled::update`] avoids a panel refresh per primitive.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::oled::Oled;
//! use rs_robobit::hal::MockOled;
//!
//! let mut oled = Oled::new(MockOled::new());
//! oled.line(0, 0, 127, 63, true, false).unwrap();
//! oled.circle(60, 30, 20, true, false).unwrap();
//! assert_eq!(oled.display().flush_count, 0);
//!
//! oled.update().unwrap();
//! assert_eq!(oled.display().flush_count, 1);
//! ```

use crate::traits::OledDisplay;

/// Panel width in pixels.
pub const OLED_WIDTH: u32 = 128;
/// Panel height in pixels.
pub const OLED_HEIGHT: u32 = 64;
/// Default I2C address of the add-on.
pub const OLED_ADDRESS: u8 = 0x3c;

/// Drawing facade for the OLED add-on.
#[derive(Debug)]
pub struct Oled<D: OledDisplay> {
    display: D,
}

impl<D: OledDisplay> Oled<D> {
    /// Wraps `display`.
    pub fn new(display: D) -> Self {
        Self { display }
    }

    /// Borrows the display.
    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutably borrows the display.
    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Consumes the facade, returning the display.
    pub fn into_inner(self) -> D {
        self.display
    }

    /// Shows `text` at (`x`, `y`).
    pub fn text(&mut self, text: &str, x: i32, y: i32, inverse: bool) -> Result<(), D::Error> {
        self.display.text(text, x, y, inverse)?;
        self.display.flush()
    }

    /// Shows a number at (`x`, `y`).
    pub fn number(&mut self, value: i32, x: i32, y: i32, inverse: bool) -> Result<(), D::Error> {
        self.display.number(value, x, y, inverse)?;
        self.display.flush()
    }

    /// Pushes everything drawn so far to the panel.
    pub fn update(&mut self) -> Result<(), D::Error> {
        self.display.flush()
    }

    /// Lights or blanks every pixel.
    pub fn set_all(&mut self, on: bool) -> Result<(), D::Error> {
        self.display.fill(on)?;
        self.display.flush()
    }

    /// Selects inverse video.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), D::Error> {
        self.display.set_inverted(inverted)?;
        self.display.flush()
    }

    /// Selects the double-size font.
    pub fn set_zoom(&mut self, zoom: bool) -> Result<(), D::Error> {
        self.display.set_zoom(zoom)?;
        self.display.flush()
    }

    /// Sets or clears one pixel.
    pub fn pixel(&mut self, x: i32, y: i32, on: bool, update: bool) -> Result<(), D::Error> {
        self.display.pixel(x, y, on)?;
        self.refresh(update)
    }

    /// Draws a line from (`x1`, `y1`) to (`x2`, `y2`).
    pub fn line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        on: bool,
        update: bool,
    ) -> Result<(), D::Error> {
        self.display.line(x1, y1, x2, y2, on)?;
        self.refresh(update)
    }

    /// Draws a rectangle outline between two corners.
    pub fn rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        on: bool,
        update: bool,
    ) -> Result<(), D::Error> {
        self.display.rectangle(x1, y1, x2, y2, on)?;
        self.refresh(update)
    }

    /// Draws a circle outline.
    pub fn circle(
        &mut self,
        x: i32,
        y: i32,
        radius: u32,
        on: bool,
        update: bool,
    ) -> Result<(), D::Error> {
        self.display.circle(x, y, radius, on)?;
        self.refresh(update)
    }

    fn refresh(&mut self, update: bool) -> Result<(), D::Error> {
        if update {
            self.display.flush()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockOled, OledOp};

    #[test]
    fn text_and_number_refresh() {
        let mut oled = Oled::new(MockOled::new());
        oled.text("Robobit", 0, 0, false).unwrap();
        oled.number(-42, 0, 10, true).unwrap();

        let d = oled.display();
        assert_eq!(d.flush_count, 2);
        assert_eq!(
            d.ops,
            vec![
                OledOp::Text("Robobit".into(), 0, 0, false),
                OledOp::Text("-42".into(), 0, 10, true),
            ]
        );
    }

    #[test]
    fn number_extremes_fit() {
        let mut oled = Oled::new(MockOled::new());
        oled.number(i32::MIN, 0, 0, false).unwrap();
        assert_eq!(
            oled.display().ops[0],
            OledOp::Text("-2147483648".into(), 0, 0, false)
        );
    }

    #[test]
    fn shapes_refresh_only_on_request() {
        let mut oled = Oled::new(MockOled::new());
        oled.pixel(1, 1, true, false).unwrap();
        oled.rectangle(0, 0, 10, 10, true, false).unwrap();
        assert_eq!(oled.display().flush_count, 0);

        oled.pixel(2, 2, false, true).unwrap();
        assert_eq!(oled.display().flush_count, 1);
    }

    #[test]
    fn settings_reach_display() {
        let mut oled = Oled::new(MockOled::new());
        oled.set_inverted(true).unwrap();
        oled.set_zoom(true).unwrap();
        oled.set_all(false).unwrap();

        let d = oled.into_inner();
        assert!(d.inverted);
        assert!(d.zoom);
        assert_eq!(d.ops, vec![OledOp::Fill(false)]);
        assert_eq!(d.flush_count, 3);
    }
}
