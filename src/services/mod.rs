//! Background services (requires the `background` feature).
//!
//! Only the LED bar scanner runs in the background. It shares the bar with
//! the foreground through [`SharedLedBar`]:
//!
//! ```ignore
//! use rs_robobit::services::{shared_led_bar, ScannerService};
//!
//! let bar = shared_led_bar(LedBar::new(strip)?);
//! let mut scanner = ScannerService::new(bar.clone());
//! scanner.start(Rgb::RED, 100).await?;
//!
//! // foreground code can still lock the bar between ticks
//! bar.lock().await.set_brightness(80)?;
//! ```

pub mod scanner_task;

pub use scanner_task::*;
