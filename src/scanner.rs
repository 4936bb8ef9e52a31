//! Larsson scanner animation.
//!
//! A bright pixel bounces between the ends of a strip with a two-pixel
//! fading tail on either side. The first and last pixels are never
//! written, so the highlight always has room for its inner trail.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::{Rgb, ScannerAnimator};
//!
//! let mut scanner = ScannerAnimator::new(Rgb::RED);
//! let frame = scanner.step(8).unwrap();
//!
//! assert_eq!(frame.position(), 2);
//! assert_eq!(frame.color_at(2), Some(Rgb::RED));
//! assert_eq!(frame.color_at(1), Some(Rgb::from_u32(0x1f0000)));
//! assert_eq!(frame.color_at(0), None); // never written
//! ```

use crate::color::Rgb;
use crate::error::ConfigError;

/// Shortest strip that has an interior to animate.
pub const MIN_STRIP_LEN: usize = 3;

/// Channel divisor from primary to secondary colour.
const SECONDARY_DIVISOR: u32 = 8;

/// Channel divisor from secondary to tertiary colour.
const TERTIARY_DIVISOR: u32 = 4;

/// The three colours of the highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanColors {
    /// Centre pixel.
    pub primary: Rgb,
    /// Pixels one away from the centre.
    pub secondary: Rgb,
    /// Pixels two away from the centre.
    pub tertiary: Rgb,
}

impl ScanColors {
    /// Derives the tail colours from `primary`.
    pub const fn from_primary(primary: Rgb) -> Self {
        let secondary = primary.reduce(SECONDARY_DIVISOR);
        Self {
            primary,
            secondary,
            tertiary: secondary.reduce(TERTIARY_DIVISOR),
        }
    }
}

impl Default for ScanColors {
    fn default() -> Self {
        Self::from_primary(Rgb::RED)
    }
}

/// Direction the highlight is moving in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanDirection {
    /// Towards higher indices.
    Up,
    /// Towards lower indices.
    Down,
}

/// Position and direction of the highlight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanCursor {
    /// Strip index of the centre pixel, within `1..=len - 2`.
    pub position: usize,
    /// Current direction.
    pub direction: ScanDirection,
}

impl ScanCursor {
    const fn start() -> Self {
        Self {
            position: 1,
            direction: ScanDirection::Up,
        }
    }

    fn advance(&mut self, strip_len: usize) {
        let last = strip_len - 2;
        self.position = match self.direction {
            ScanDirection::Up => self.position + 1,
            ScanDirection::Down => self.position.saturating_sub(1),
        };
        if self.position >= last {
            self.direction = ScanDirection::Down;
        } else if self.position <= 1 {
            self.direction = ScanDirection::Up;
        }
        // only bites on a 3-pixel strip, where the interior is a single pixel
        self.position = self.position.clamp(1, last);
    }
}

/// One rendered tick: the colours of the strip interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanFrame {
    len: usize,
    position: usize,
    colors: ScanColors,
}

impl ScanFrame {
    /// Length of the strip this frame was rendered for.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; frames are never rendered for empty strips.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Centre of the highlight.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Colour for strip index `index`, or `None` for the untouched end
    /// pixels and anything out of range.
    pub fn color_at(&self, index: usize) -> Option<Rgb> {
        if index == 0 || index + 1 >= self.len {
            return None;
        }
        let color = match index.abs_diff(self.position) {
            0 => self.colors.primary,
            1 => self.colors.secondary,
            2 => self.colors.tertiary,
            _ => Rgb::OFF,
        };
        Some(color)
    }

    /// Iterates `(index, colour)` over the interior `1..len - 1`.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, Rgb)> + '_ {
        (1..self.len - 1).filter_map(move |i| self.color_at(i).map(|c| (i, c)))
    }
}

/// Bouncing highlight state machine.
///
/// The cursor is created on the first [`step`](Self::step) at position 1
/// moving up, so the first frame shows the highlight at index 2.
#[derive(Clone, Debug, Default)]
pub struct ScannerAnimator {
    cursor: Option<ScanCursor>,
    colors: ScanColors,
}

impl ScannerAnimator {
    /// Creates an animator with `primary` as the highlight colour.
    pub fn new(primary: Rgb) -> Self {
        Self {
            cursor: None,
            colors: ScanColors::from_primary(primary),
        }
    }

    /// Changes the highlight colour. The tail colours are only recomputed
    /// when the colour actually changes.
    pub fn set_primary(&mut self, primary: Rgb) {
        if primary != self.colors.primary {
            self.colors = ScanColors::from_primary(primary);
            debug!("scan colour {=u32:x}", primary.as_u32());
        }
    }

    /// Current colours.
    #[inline]
    pub fn colors(&self) -> ScanColors {
        self.colors
    }

    /// Current cursor, `None` before the first step.
    #[inline]
    pub fn cursor(&self) -> Option<ScanCursor> {
        self.cursor
    }

    /// Forgets the cursor; the next step starts from the left end again.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Advances one tick and renders the frame for a strip of `strip_len`
    /// pixels.
    ///
    /// # Errors
    ///
    /// [`ConfigError::StripTooShort`] when `strip_len` is below
    /// [`MIN_STRIP_LEN`]. The cursor is left untouched in that case.
    pub fn step(&mut self, strip_len: usize) -> Result<ScanFrame, ConfigError> {
        if strip_len < MIN_STRIP_LEN {
            return Err(ConfigError::StripTooShort {
                len: strip_len,
                min: MIN_STRIP_LEN,
            });
        }
        let cursor = self.cursor.get_or_insert_with(ScanCursor::start);
        cursor.advance(strip_len);
        Ok(ScanFrame {
            len: strip_len,
            position: cursor.position,
            colors: self.colors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate alloc;
    use alloc::vec::Vec;

    fn positions(len: usize, steps: usize) -> Vec<usize> {
        let mut scanner = ScannerAnimator::new(Rgb::RED);
        (0..steps).map(|_| scanner.step(len).unwrap().position()).collect()
    }

    // =========================================================================
    // Colour Tests
    // =========================================================================

    #[test]
    fn red_tail_colours() {
        let colors = ScanColors::from_primary(Rgb::RED);
        assert_eq!(colors.secondary.as_u32(), 0x1f0000);
        assert_eq!(colors.tertiary.as_u32(), 0x070000);
    }

    #[test]
    fn set_primary_recomputes_tail() {
        let mut scanner = ScannerAnimator::new(Rgb::RED);
        scanner.set_primary(Rgb::WHITE);
        assert_eq!(scanner.colors().secondary.as_u32(), 0x1f1f1f);
        assert_eq!(scanner.colors().tertiary.as_u32(), 0x070707);
    }

    // =========================================================================
    // Motion Tests
    // =========================================================================

    #[test]
    fn bounce_on_eight_pixels() {
        assert_eq!(positions(8, 6), [2, 3, 4, 5, 6, 5]);
    }

    #[test]
    fn full_period_on_eight_pixels() {
        assert_eq!(
            positions(8, 12),
            [2, 3, 4, 5, 6, 5, 4, 3, 2, 1, 2, 3]
        );
    }

    #[test]
    fn position_stays_in_bounds() {
        for len in 3..20 {
            let mut scanner = ScannerAnimator::default();
            for _ in 0..100 {
                let pos = scanner.step(len).unwrap().position();
                assert!((1..=len - 2).contains(&pos), "len {} pos {}", len, pos);
            }
        }
    }

    #[test]
    fn three_pixel_strip_holds_centre() {
        assert_eq!(positions(3, 4), [1, 1, 1, 1]);
    }

    #[test]
    fn four_pixel_strip_alternates() {
        assert_eq!(positions(4, 5), [2, 1, 2, 1, 2]);
    }

    #[test]
    fn short_strip_rejected() {
        let mut scanner = ScannerAnimator::default();
        assert_eq!(
            scanner.step(2),
            Err(ConfigError::StripTooShort { len: 2, min: 3 })
        );
        assert!(scanner.cursor().is_none());
    }

    #[test]
    fn reset_restarts_from_left() {
        let mut scanner = ScannerAnimator::default();
        scanner.step(8).unwrap();
        scanner.step(8).unwrap();
        scanner.reset();
        assert_eq!(scanner.step(8).unwrap().position(), 2);
    }

    // =========================================================================
    // Frame Tests
    // =========================================================================

    #[test]
    fn frame_tail_around_centre() {
        let mut scanner = ScannerAnimator::new(Rgb::RED);
        scanner.step(10).unwrap();
        scanner.step(10).unwrap();
        let frame = scanner.step(10).unwrap();
        assert_eq!(frame.position(), 4);

        let c = scanner.colors();
        let expected = [
            None,
            Some(Rgb::OFF),
            Some(c.tertiary),
            Some(c.secondary),
            Some(c.primary),
            Some(c.secondary),
            Some(c.tertiary),
            Some(Rgb::OFF),
            Some(Rgb::OFF),
            None,
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(frame.color_at(i), *want, "index {}", i);
        }
    }

    #[test]
    fn frame_never_touches_ends() {
        let mut scanner = ScannerAnimator::default();
        for _ in 0..20 {
            let frame = scanner.step(6).unwrap();
            let indices: Vec<usize> = frame.pixels().map(|(i, _)| i).collect();
            assert_eq!(indices, [1, 2, 3, 4]);
        }
    }
}
