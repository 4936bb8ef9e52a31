//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without a buggy on the bench.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPins`] | [`PinIo`] | Records pin writes, queued pulse widths and inputs |
//! | [`MockStrip`] | [`LedStrip`] | Frame buffer with a copy of the last shown frame |
//! | [`MockOled`] | [`OledDisplay`] | Records drawing calls |
//! | [`MockIr`] | [`IrReceiver`] | Settable last IR code |
//! | [`MockDelay`] | [`Delay`] | Resolves immediately, totals the requested time |
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::{Robot, Side};
//! use rs_robobit::hal::MockPins;
//! use rs_robobit::traits::{Level, Pin};
//!
//! let mut robot = Robot::new(MockPins::new());
//! robot.motor(Side::Left, -400).unwrap();
//!
//! let pins = robot.pins();
//! assert_eq!(pins.analog(Pin::P0), Some(223));
//! assert_eq!(pins.digital(Pin::P8), Some(Level::High));
//! ```
//!
//! [`PinIo`]: crate::traits::PinIo
//! [`LedStrip`]: crate::traits::LedStrip
//! [`OledDisplay`]: crate::traits::OledDisplay
//! [`IrReceiver`]: crate::traits::IrReceiver
//! [`Delay`]: crate::traits::Delay

extern crate alloc;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::color::Rgb;
use crate::traits::{Delay, IrReceiver, LedStrip, Level, OledDisplay, Pin, PinIo, Pull};

// ============================================================================
// Pin Mocks
// ============================================================================

/// One recorded pin operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinEvent {
    /// `digital_write`
    Digital(Pin, Level),
    /// `analog_write`
    Analog(Pin, u16),
    /// `set_pwm_period`
    Period(Pin, u32),
    /// `servo_write`
    Servo(Pin, u8),
    /// `set_pull`
    Pull(Pin, Pull),
    /// `pulse_in` with the level waited for
    PulseIn(Pin, Level),
    /// `delay_us`
    DelayUs(u32),
}

/// Mock pin I/O for testing.
///
/// Every call is appended to [`events`](Self::events) in order; the maps
/// hold the latest value per pin for quick assertions.
///
/// # Example
///
/// ```rust
/// use rs_robobit::hal::MockPins;
/// use rs_robobit::traits::{Level, Pin, PinIo};
///
/// let mut pins = MockPins::new();
/// pins.queue_pulse(1160);
/// pins.set_input(Pin::P11, Level::High);
///
/// assert_eq!(pins.pulse_in(Pin::P13, Level::High, 29_000).unwrap(), 1160);
/// assert_eq!(pins.pulse_in(Pin::P13, Level::High, 29_000).unwrap(), 0); // Empty
/// assert_eq!(pins.digital_read(Pin::P11).unwrap(), Level::High);
/// ```
#[derive(Debug, Default)]
pub struct MockPins {
    /// All operations in call order.
    pub events: Vec<PinEvent>,
    /// Last duty written per pin.
    pub analog: BTreeMap<Pin, u16>,
    /// Last level written per pin.
    pub digital: BTreeMap<Pin, Level>,
    /// Last PWM period per pin.
    pub periods: BTreeMap<Pin, u32>,
    /// Last servo angle per pin.
    pub servos: BTreeMap<Pin, u8>,
    /// Pull configuration per pin.
    pub pulls: BTreeMap<Pin, Pull>,
    /// Levels returned by `digital_read`; unset pins read low.
    pub inputs: BTreeMap<Pin, Level>,
    /// Pulse widths returned by `pulse_in`, oldest first.
    pub pulses: VecDeque<u32>,
    /// When set, every fallible call fails.
    pub fail: bool,
}

impl MockPins {
    /// Creates a new mock with no recorded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one pulse width for `pulse_in`. An empty queue returns 0.
    pub fn queue_pulse(&mut self, width_us: u32) {
        self.pulses.push_back(width_us);
    }

    /// Sets the level `digital_read` reports for `pin`.
    pub fn set_input(&mut self, pin: Pin, level: Level) {
        self.inputs.insert(pin, level);
    }

    /// Last duty written to `pin`.
    pub fn analog(&self, pin: Pin) -> Option<u16> {
        self.analog.get(&pin).copied()
    }

    /// Last level written to `pin`.
    pub fn digital(&self, pin: Pin) -> Option<Level> {
        self.digital.get(&pin).copied()
    }

    /// Last PWM period set on `pin`.
    pub fn period(&self, pin: Pin) -> Option<u32> {
        self.periods.get(&pin).copied()
    }

    /// Last servo angle written to `pin`.
    pub fn servo(&self, pin: Pin) -> Option<u8> {
        self.servos.get(&pin).copied()
    }

    /// Forgets all recorded writes, keeping inputs and queued pulses.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.analog.clear();
        self.digital.clear();
        self.periods.clear();
        self.servos.clear();
    }

    fn check(&self) -> Result<(), ()> {
        if self.fail {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl PinIo for MockPins {
    type Error = ();

    fn digital_write(&mut self, pin: Pin, level: Level) -> Result<(), ()> {
        self.check()?;
        self.events.push(PinEvent::Digital(pin, level));
        self.digital.insert(pin, level);
        Ok(())
    }

    fn digital_read(&mut self, pin: Pin) -> Result<Level, ()> {
        self.check()?;
        Ok(self.inputs.get(&pin).copied().unwrap_or_default())
    }

    fn analog_write(&mut self, pin: Pin, duty: u16) -> Result<(), ()> {
        self.check()?;
        self.events.push(PinEvent::Analog(pin, duty));
        self.analog.insert(pin, duty);
        Ok(())
    }

    fn set_pwm_period(&mut self, pin: Pin, period_us: u32) -> Result<(), ()> {
        self.check()?;
        self.events.push(PinEvent::Period(pin, period_us));
        self.periods.insert(pin, period_us);
        Ok(())
    }

    fn pulse_in(&mut self, pin: Pin, level: Level, _timeout_us: u32) -> Result<u32, ()> {
        self.check()?;
        self.events.push(PinEvent::PulseIn(pin, level));
        Ok(self.pulses.pop_front().unwrap_or(0))
    }

    fn servo_write(&mut self, pin: Pin, degrees: u8) -> Result<(), ()> {
        self.check()?;
        self.events.push(PinEvent::Servo(pin, degrees));
        self.servos.insert(pin, degrees);
        Ok(())
    }

    fn set_pull(&mut self, pin: Pin, pull: Pull) -> Result<(), ()> {
        self.check()?;
        self.events.push(PinEvent::Pull(pin, pull));
        self.pulls.insert(pin, pull);
        Ok(())
    }

    fn delay_us(&mut self, us: u32) {
        self.events.push(PinEvent::DelayUs(us));
    }
}

// ============================================================================
// LED Mocks
// ============================================================================

/// Mock LED chain for testing.
///
/// `pixels` is the frame buffer; `shown` is a copy of the buffer taken at
/// the last [`show`](LedStrip::show).
///
/// # Example
///
/// ```rust
/// use rs_robobit::Rgb;
/// use rs_robobit::hal::MockStrip;
/// use rs_robobit::traits::LedStrip;
///
/// let mut strip = MockStrip::new(4);
/// strip.set_pixel(0, Rgb::RED).unwrap();
/// strip.rotate(1).unwrap();
/// strip.show().unwrap();
///
/// assert_eq!(strip.shown, vec![Rgb::OFF, Rgb::RED, Rgb::OFF, Rgb::OFF]);
/// assert_eq!(strip.show_count, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockStrip {
    /// Frame buffer.
    pub pixels: Vec<Rgb>,
    /// Buffer contents at the last `show`.
    pub shown: Vec<Rgb>,
    /// Last brightness set.
    pub brightness: u8,
    /// Number of `show` calls.
    pub show_count: usize,
    /// When set, every call fails.
    pub fail: bool,
}

impl MockStrip {
    /// Creates a strip of `len` pixels, all off, at full brightness.
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Rgb::OFF; len],
            shown: vec![Rgb::OFF; len],
            brightness: 255,
            show_count: 0,
            fail: false,
        }
    }

    /// Indices of lit pixels in the frame buffer.
    pub fn lit(&self) -> Vec<usize> {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_off())
            .map(|(i, _)| i)
            .collect()
    }

    fn check(&self) -> Result<(), ()> {
        if self.fail {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl LedStrip for MockStrip {
    type Error = ();

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), ()> {
        self.check()?;
        if let Some(px) = self.pixels.get_mut(index) {
            *px = color;
        }
        Ok(())
    }

    fn fill(&mut self, color: Rgb) -> Result<(), ()> {
        self.check()?;
        self.pixels.iter_mut().for_each(|px| *px = color);
        Ok(())
    }

    fn rotate(&mut self, n: usize) -> Result<(), ()> {
        self.check()?;
        if !self.pixels.is_empty() {
            let n = n % self.pixels.len();
            self.pixels.rotate_right(n);
        }
        Ok(())
    }

    fn shift(&mut self, n: usize) -> Result<(), ()> {
        self.check()?;
        let len = self.pixels.len();
        let n = n.min(len);
        self.pixels.rotate_right(n);
        self.pixels[..n].iter_mut().for_each(|px| *px = Rgb::OFF);
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), ()> {
        self.check()?;
        self.brightness = level;
        Ok(())
    }

    fn show(&mut self) -> Result<(), ()> {
        self.check()?;
        self.shown = self.pixels.clone();
        self.show_count += 1;
        Ok(())
    }
}

// ============================================================================
// Display Mocks
// ============================================================================

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OledOp {
    /// `text(text, x, y, inverse)`
    Text(String, i32, i32, bool),
    /// `pixel(x, y, on)`
    Pixel(i32, i32, bool),
    /// `line(x1, y1, x2, y2, on)`
    Line(i32, i32, i32, i32, bool),
    /// `rectangle(x1, y1, x2, y2, on)`
    Rectangle(i32, i32, i32, i32, bool),
    /// `circle(x, y, radius, on)`
    Circle(i32, i32, u32, bool),
    /// `fill(on)`
    Fill(bool),
}

/// Mock OLED for testing.
///
/// # Example
///
/// ```rust
/// use rs_robobit::hal::{MockOled, OledOp};
/// use rs_robobit::traits::OledDisplay;
///
/// let mut oled = MockOled::new();
/// oled.text("hi", 0, 0, false).unwrap();
/// oled.flush().unwrap();
///
/// assert_eq!(oled.ops, vec![OledOp::Text("hi".into(), 0, 0, false)]);
/// assert_eq!(oled.flush_count, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockOled {
    /// Drawing calls since creation.
    pub ops: Vec<OledOp>,
    /// Current inverted-text setting.
    pub inverted: bool,
    /// Current zoom setting.
    pub zoom: bool,
    /// Number of `flush` calls.
    pub flush_count: usize,
}

impl MockOled {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OledDisplay for MockOled {
    type Error = ();

    fn text(&mut self, text: &str, x: i32, y: i32, inverse: bool) -> Result<(), ()> {
        self.ops.push(OledOp::Text(text.into(), x, y, inverse));
        Ok(())
    }

    fn pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), ()> {
        self.ops.push(OledOp::Pixel(x, y, on));
        Ok(())
    }

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) -> Result<(), ()> {
        self.ops.push(OledOp::Line(x1, y1, x2, y2, on));
        Ok(())
    }

    fn rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool) -> Result<(), ()> {
        self.ops.push(OledOp::Rectangle(x1, y1, x2, y2, on));
        Ok(())
    }

    fn circle(&mut self, x: i32, y: i32, radius: u32, on: bool) -> Result<(), ()> {
        self.ops.push(OledOp::Circle(x, y, radius, on));
        Ok(())
    }

    fn fill(&mut self, on: bool) -> Result<(), ()> {
        self.ops.push(OledOp::Fill(on));
        Ok(())
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), ()> {
        self.inverted = inverted;
        Ok(())
    }

    fn set_zoom(&mut self, zoom: bool) -> Result<(), ()> {
        self.zoom = zoom;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        self.flush_count += 1;
        Ok(())
    }
}

// ============================================================================
// Input and Timing Mocks
// ============================================================================

/// Mock IR receiver. Call [`press`](Self::press) to simulate a key.
///
/// # Example
///
/// ```rust
/// use rs_robobit::hal::MockIr;
/// use rs_robobit::traits::IrReceiver;
///
/// let mut ir = MockIr::new();
/// ir.press(24);
/// ir.press(24);
///
/// assert_eq!(ir.next_code(), Some(24));
/// assert_eq!(ir.next_code(), Some(24));
/// assert_eq!(ir.next_code(), None);
/// assert_eq!(ir.last_code(), Some(24));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockIr {
    /// Last decoded command.
    pub code: Option<u8>,
    /// Codes not yet taken by `next_code`, oldest first.
    pub pending: VecDeque<u8>,
}

impl MockIr {
    /// Creates a receiver that has not seen any key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates receiving `code`.
    pub fn press(&mut self, code: u8) {
        self.code = Some(code);
        self.pending.push_back(code);
    }
}

impl IrReceiver for MockIr {
    fn last_code(&self) -> Option<u8> {
        self.code
    }

    fn next_code(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }
}

/// Mock delay that returns immediately.
///
/// # Example
///
/// ```rust
/// use rs_robobit::hal::MockDelay;
/// use rs_robobit::traits::Delay;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut delay = MockDelay::new();
/// delay.delay_ms(250).await;
/// delay.delay_ms(50).await;
///
/// assert_eq!(delay.calls, vec![250, 50]);
/// assert_eq!(delay.total_ms, 300);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Each requested delay, in order.
    pub calls: Vec<u32>,
    /// Sum of all requested delays.
    pub total_ms: u64,
}

impl MockDelay {
    /// Creates a new mock delay.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Delay for MockDelay {
    async fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
        self.total_ms += ms as u64;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockPins Tests
    // =========================================================================

    #[test]
    fn mock_pins_default() {
        let pins = MockPins::new();
        assert!(pins.events.is_empty());
        assert_eq!(pins.analog(Pin::P0), None);
        assert_eq!(pins.digital(Pin::P8), None);
    }

    #[test]
    fn mock_pins_record_in_order() {
        let mut pins = MockPins::new();
        pins.set_pwm_period(Pin::P0, 60_000).unwrap();
        pins.analog_write(Pin::P0, 100).unwrap();
        pins.digital_write(Pin::P8, Level::Low).unwrap();

        assert_eq!(
            pins.events,
            vec![
                PinEvent::Period(Pin::P0, 60_000),
                PinEvent::Analog(Pin::P0, 100),
                PinEvent::Digital(Pin::P8, Level::Low),
            ]
        );
        assert_eq!(pins.period(Pin::P0), Some(60_000));
    }

    #[test]
    fn mock_pins_latest_value_wins() {
        let mut pins = MockPins::new();
        pins.analog_write(Pin::P1, 10).unwrap();
        pins.analog_write(Pin::P1, 20).unwrap();
        assert_eq!(pins.analog(Pin::P1), Some(20));
    }

    #[test]
    fn mock_pins_pulses_fifo() {
        let mut pins = MockPins::new();
        pins.queue_pulse(100);
        pins.queue_pulse(200);
        assert_eq!(pins.pulse_in(Pin::P13, Level::High, 1).unwrap(), 100);
        assert_eq!(pins.pulse_in(Pin::P13, Level::High, 1).unwrap(), 200);
        assert_eq!(pins.pulse_in(Pin::P13, Level::High, 1).unwrap(), 0);
    }

    #[test]
    fn mock_pins_failure() {
        let mut pins = MockPins::new();
        pins.fail = true;
        assert!(pins.analog_write(Pin::P0, 1).is_err());
        assert!(pins.digital_read(Pin::P5).is_err());
        assert!(pins.events.is_empty());
    }

    #[test]
    fn mock_pins_clear_keeps_inputs() {
        let mut pins = MockPins::new();
        pins.set_input(Pin::P5, Level::High);
        pins.queue_pulse(5);
        pins.servo_write(Pin::P15, 40).unwrap();
        pins.clear_events();
        assert_eq!(pins.servo(Pin::P15), None);
        assert_eq!(pins.digital_read(Pin::P5).unwrap(), Level::High);
        assert_eq!(pins.pulses.len(), 1);
    }

    // =========================================================================
    // MockStrip Tests
    // =========================================================================

    #[test]
    fn mock_strip_out_of_range_ignored() {
        let mut strip = MockStrip::new(3);
        strip.set_pixel(7, Rgb::RED).unwrap();
        assert!(strip.lit().is_empty());
    }

    #[test]
    fn mock_strip_rotate_wraps() {
        let mut strip = MockStrip::new(3);
        strip.set_pixel(2, Rgb::BLUE).unwrap();
        strip.rotate(1).unwrap();
        assert_eq!(strip.pixels[0], Rgb::BLUE);
        strip.rotate(4).unwrap();
        assert_eq!(strip.pixels[1], Rgb::BLUE);
    }

    #[test]
    fn mock_strip_shift_drops() {
        let mut strip = MockStrip::new(3);
        strip.fill(Rgb::GREEN).unwrap();
        strip.shift(2).unwrap();
        assert_eq!(strip.pixels, vec![Rgb::OFF, Rgb::OFF, Rgb::GREEN]);
        strip.shift(10).unwrap();
        assert!(strip.lit().is_empty());
    }

    #[test]
    fn mock_strip_show_snapshots() {
        let mut strip = MockStrip::new(2);
        strip.set_pixel(1, Rgb::RED).unwrap();
        assert!(strip.shown.iter().all(|c| c.is_off()));
        strip.show().unwrap();
        assert_eq!(strip.shown[1], Rgb::RED);
        assert_eq!(strip.show_count, 1);
    }

    // =========================================================================
    // MockOled / MockIr Tests
    // =========================================================================

    #[test]
    fn mock_oled_records_ops() {
        let mut oled = MockOled::new();
        oled.fill(false).unwrap();
        oled.circle(10, 10, 4, true).unwrap();
        oled.set_zoom(true).unwrap();
        assert_eq!(oled.ops, vec![OledOp::Fill(false), OledOp::Circle(10, 10, 4, true)]);
        assert!(oled.zoom);
    }

    #[test]
    fn mock_ir_press() {
        let mut ir = MockIr::new();
        assert_eq!(ir.last_code(), None);
        ir.press(24);
        assert_eq!(ir.last_code(), Some(24));
    }
}
