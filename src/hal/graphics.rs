//! SSD1306 OLED implementation using embedded-graphics.
//!
//! Works with any `display-interface` transport; the OLED add-on is wired
//! for I2C at address `0x3c`.
//!
//! # Example
//!
//! ```ignore
//! use rs_robobit::hal::Ssd1306Oled;
//! use rs_robobit::oled::Oled;
//! use ssd1306::I2CDisplayInterface;
//!
//! let mut panel = Ssd1306Oled::new(I2CDisplayInterface::new(i2c));
//! panel.init()?;
//! let mut oled = Oled::new(panel);
//! oled.text("Hello", 0, 0, false)?;
//! ```

use display_interface::{DisplayError, WriteOnlyDataCommand};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoFont, MonoTextStyleBuilder,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, Ssd1306};

use crate::traits::OledDisplay;

type DisplayDriver<DI> =
    Ssd1306<DI, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

fn color(on: bool) -> BinaryColor {
    if on {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}

/// Outer diameter of a circle with `radius` pixels around its centre pixel.
fn circle_diameter(radius: u32) -> u32 {
    radius.saturating_mul(2).saturating_add(1)
}

/// 128x64 SSD1306 panel in buffered graphics mode.
pub struct Ssd1306Oled<DI: WriteOnlyDataCommand> {
    display: DisplayDriver<DI>,
    inverted: bool,
    zoom: bool,
}

impl<DI: WriteOnlyDataCommand> Ssd1306Oled<DI> {
    /// Creates the driver. Call [`init`](Self::init) before drawing.
    pub fn new(interface: DI) -> Self {
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self {
            display,
            inverted: false,
            zoom: false,
        }
    }

    /// Initialises the panel and blanks it.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.display.init()?;
        DrawTarget::clear(&mut self.display, BinaryColor::Off)?;
        self.display.flush()
    }

    fn font(&self) -> &'static MonoFont<'static> {
        if self.zoom {
            &FONT_10X20
        } else {
            &FONT_6X10
        }
    }
}

impl<DI: WriteOnlyDataCommand> OledDisplay for Ssd1306Oled<DI> {
    type Error = DisplayError;

    fn text(&mut self, text: &str, x: i32, y: i32, inverse: bool) -> Result<(), Self::Error> {
        let dark = inverse != self.inverted;
        let style = MonoTextStyleBuilder::new()
            .font(self.font())
            .text_color(color(!dark))
            .background_color(color(dark))
            .build();
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.display)?;
        Ok(())
    }

    fn pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), Self::Error> {
        Pixel(Point::new(x, y), color(on)).draw(&mut self.display)
    }

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) -> Result<(), Self::Error> {
        Line::new(Point::new(x1, y1), Point::new(x2, y2))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.display)
    }

    fn rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        on: bool,
    ) -> Result<(), Self::Error> {
        Rectangle::with_corners(Point::new(x1, y1), Point::new(x2, y2))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.display)
    }

    fn circle(&mut self, x: i32, y: i32, radius: u32, on: bool) -> Result<(), Self::Error> {
        Circle::with_center(Point::new(x, y), circle_diameter(radius))
            .into_styled(PrimitiveStyle::with_stroke(color(on), 1))
            .draw(&mut self.display)
    }

    fn fill(&mut self, on: bool) -> Result<(), Self::Error> {
        DrawTarget::clear(&mut self.display, color(on))
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), Self::Error> {
        self.inverted = inverted;
        Ok(())
    }

    fn set_zoom(&mut self, zoom: bool) -> Result<(), Self::Error> {
        self.zoom = zoom;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.display.flush()
    }
}
