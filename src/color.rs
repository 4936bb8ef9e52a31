//! 24-bit RGB colours for the addressable LEDs.
//!
//! Colours are packed `0xRRGGBB`, the same representation the LED drivers
//! take, so a colour crosses the strip boundary without conversion.

/// Packed 24-bit colour (`0xRRGGBB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb(u32);

impl Rgb {
    /// All channels off.
    pub const OFF: Rgb = Rgb(0x000000);
    /// Red.
    pub const RED: Rgb = Rgb(0xff0000);
    /// Orange.
    pub const ORANGE: Rgb = Rgb(0xffa500);
    /// Yellow.
    pub const YELLOW: Rgb = Rgb(0xffff00);
    /// Green.
    pub const GREEN: Rgb = Rgb(0x00ff00);
    /// Blue.
    pub const BLUE: Rgb = Rgb(0x0000ff);
    /// Indigo.
    pub const INDIGO: Rgb = Rgb(0x4b0082);
    /// Violet.
    pub const VIOLET: Rgb = Rgb(0x8a2be2);
    /// Purple.
    pub const PURPLE: Rgb = Rgb(0xff00ff);
    /// White.
    pub const WHITE: Rgb = Rgb(0xffffff);
    /// Black (same as [`Rgb::OFF`]).
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Builds a colour from a packed value; bits above 24 are dropped.
    pub const fn from_u32(packed: u32) -> Self {
        Rgb(packed & 0xffffff)
    }

    /// Packs separate channels.
    ///
    /// ```
    /// use rs_robobit::Rgb;
    ///
    /// assert_eq!(Rgb::from_rgb(0xff, 0xa5, 0x00), Rgb::ORANGE);
    /// ```
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Rgb(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The packed `0xRRGGBB` value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// True when every channel is zero.
    #[inline]
    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    /// Dims each channel independently by `divisor`.
    ///
    /// Each channel is divided in place and re-masked to its own byte, so
    /// bits shifted out of one channel never bleed into the next. A zero
    /// divisor is treated as one.
    ///
    /// ```
    /// use rs_robobit::Rgb;
    ///
    /// assert_eq!(Rgb::RED.reduce(8), Rgb::from_u32(0x1f0000));
    /// assert_eq!(Rgb::WHITE.reduce(8), Rgb::from_u32(0x1f1f1f));
    /// ```
    pub const fn reduce(self, divisor: u32) -> Self {
        let d = if divisor == 0 { 1 } else { divisor };
        let red = ((self.0 & 0xff0000) / d) & 0xff0000;
        let green = ((self.0 & 0x00ff00) / d) & 0x00ff00;
        let blue = ((self.0 & 0x0000ff) / d) & 0x0000ff;
        Rgb(red + green + blue)
    }

    /// Fully saturated colour at `hue` degrees on the colour wheel
    /// (0 red, 120 green, 240 blue). Hues wrap at 360.
    ///
    /// ```
    /// use rs_robobit::Rgb;
    ///
    /// assert_eq!(Rgb::from_hue(0), Rgb::RED);
    /// assert_eq!(Rgb::from_hue(120), Rgb::GREEN);
    /// assert_eq!(Rgb::from_hue(600), Rgb::BLUE);
    /// ```
    pub const fn from_hue(hue: u16) -> Self {
        let hue = (hue % 360) as u32;
        let sector = hue / 60;
        // rising and falling ramps within the 60-degree sector
        let up = ((hue % 60) * 255 + 30) / 60;
        let down = 255 - up;
        let (r, g, b) = match sector {
            0 => (255, up, 0),
            1 => (down, 255, 0),
            2 => (0, 255, up),
            3 => (0, down, 255),
            4 => (up, 0, 255),
            _ => (255, 0, down),
        };
        Rgb((r << 16) | (g << 8) | b)
    }

    /// Parses a palette name (`"red"`, `"indigo"`, ...), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let palette = [
            ("red", Rgb::RED),
            ("orange", Rgb::ORANGE),
            ("yellow", Rgb::YELLOW),
            ("green", Rgb::GREEN),
            ("blue", Rgb::BLUE),
            ("indigo", Rgb::INDIGO),
            ("violet", Rgb::VIOLET),
            ("purple", Rgb::PURPLE),
            ("white", Rgb::WHITE),
            ("black", Rgb::BLACK),
        ];
        palette
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }
}

impl From<u32> for Rgb {
    fn from(packed: u32) -> Self {
        Rgb::from_u32(packed)
    }
}

impl From<Rgb> for u32 {
    fn from(color: Rgb) -> Self {
        color.0
    }
}
