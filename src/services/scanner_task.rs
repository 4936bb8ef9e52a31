//! Background Larsson scanner on tokio.
//!
//! [`ScannerTask`] owns one spawned loop that ticks a shared [`LedBar`]
//! and sleeps between ticks. The sleep races a `watch` stop signal, so
//! [`ScannerTask::stop`] returns within one tick instead of waiting out
//! the delay.
//!
//! [`ScannerService`] layers the start/stop rules of the LED bar blocks on
//! top: starting an already running scanner only changes its colour, and
//! stopping twice is harmless.
//!
//! # Example
//!
//! ```rust
//! use rs_robobit::services::{shared_led_bar, ScannerService};
//! use rs_robobit::hal::MockStrip;
//! use rs_robobit::{LedBar, Rgb};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bar = shared_led_bar(LedBar::new(MockStrip::new(8)).unwrap());
//! let mut scanner = ScannerService::new(bar.clone());
//!
//! scanner.start(Rgb::BLUE, 1000).await.unwrap();
//! assert!(scanner.is_running());
//!
//! // the first frame is drawn before the stop signal is seen
//! let frames = scanner.stop().await.unwrap();
//! assert_eq!(frames, 1);
//! assert_eq!(bar.lock().await.strip().shown[2], Rgb::BLUE);
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::color::Rgb;
use crate::config::{clamp_scan_delay, ScannerConfig};
use crate::error::RobotError;
use crate::led_bar::{LedBar, UpdateMode};
use crate::traits::LedStrip;

// ============================================================================
// Shared LED Bar
// ============================================================================

/// An LED bar shared between the scanner loop and the rest of the program.
///
/// Uses tokio's `Mutex` because the scanner holds the guard across the
/// strip write inside an async task.
pub type SharedLedBar<S> = Arc<Mutex<LedBar<S>>>;

/// Wraps `bar` for sharing with a [`ScannerTask`].
pub fn shared_led_bar<S: LedStrip>(bar: LedBar<S>) -> SharedLedBar<S> {
    Arc::new(Mutex::new(bar))
}

// ============================================================================
// Scanner Task
// ============================================================================

/// A running scanner loop.
///
/// Dropping the task without calling [`stop`](Self::stop) also ends the
/// loop at its next sleep, but nobody observes the result.
pub struct ScannerTask<E> {
    stop_tx: watch::Sender<bool>,
    frames: Arc<AtomicU64>,
    handle: JoinHandle<Result<(), RobotError<E>>>,
}

impl<E: Send + 'static> ScannerTask<E> {
    /// Spawns the loop on the current tokio runtime.
    ///
    /// Each tick advances the scanner one pixel. In manual update mode the
    /// tick also pushes the frame; auto mode already did.
    pub fn spawn<S>(bar: SharedLedBar<S>, delay: Duration) -> Self
    where
        S: LedStrip<Error = E> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let frames = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&frames);

        let handle = tokio::spawn(async move {
            loop {
                {
                    let mut bar = bar.lock().await;
                    bar.scan_step()?;
                    if bar.update_mode() == UpdateMode::Manual {
                        bar.show().map_err(RobotError::Hardware)?;
                    }
                }
                counter.fetch_add(1, Ordering::Relaxed);

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    // a send or a dropped sender both mean stop
                    _ = stop_rx.changed() => break,
                }
            }
            Ok::<(), RobotError<E>>(())
        });

        Self {
            stop_tx,
            frames,
            handle,
        }
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Returns true once the loop has exited (stopped or failed).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the loop to stop and waits for it.
    ///
    /// Returns the number of frames drawn, or the error that ended the loop
    /// early.
    pub async fn stop(self) -> Result<u64, RobotError<E>> {
        let _ = self.stop_tx.send(true);
        match self.handle.await {
            Ok(result) => result.map(|()| self.frames.load(Ordering::Relaxed)),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Ok(self.frames.load(Ordering::Relaxed)),
        }
    }
}

// ============================================================================
// Scanner Service
// ============================================================================

/// Start/stop control for the background scanner on one LED bar.
pub struct ScannerService<S: LedStrip> {
    bar: SharedLedBar<S>,
    task: Option<ScannerTask<S::Error>>,
}

impl<S> ScannerService<S>
where
    S: LedStrip + Send + 'static,
    S::Error: Send + 'static,
{
    /// Creates a stopped service for `bar`.
    pub fn new(bar: SharedLedBar<S>) -> Self {
        Self { bar, task: None }
    }

    /// The bar the scanner draws on.
    pub fn bar(&self) -> &SharedLedBar<S> {
        &self.bar
    }

    /// Returns true while the loop is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Frames drawn by the current loop, or 0 when stopped.
    pub fn frames(&self) -> u64 {
        self.task.as_ref().map_or(0, ScannerTask::frames)
    }

    /// Sets the scanner colour and starts the loop with `delay_ms` between
    /// ticks (clamped to 1-10000 ms).
    ///
    /// If the loop is already running only the colour changes; the running
    /// loop keeps its delay. If the previous loop ended on an error, that
    /// error is returned and nothing is spawned; the next call starts fresh.
    pub async fn start(
        &mut self,
        color: Rgb,
        delay_ms: u32,
    ) -> Result<(), RobotError<S::Error>> {
        self.bar.lock().await.set_scan_color(color);
        if self.is_running() {
            return Ok(());
        }
        if let Some(dead) = self.task.take() {
            if let Err(err) = dead.stop().await {
                warn!("scanner loop had failed, not restarting");
                return Err(err);
            }
        }

        let delay_ms = clamp_scan_delay(delay_ms);
        info!("scanner start, {} ms", delay_ms);
        self.task = Some(ScannerTask::spawn(
            Arc::clone(&self.bar),
            Duration::from_millis(u64::from(delay_ms)),
        ));
        Ok(())
    }

    /// [`start`](Self::start) with the colour and delay from `config`.
    pub async fn start_with(
        &mut self,
        config: &ScannerConfig,
    ) -> Result<(), RobotError<S::Error>> {
        self.start(config.color, config.delay_ms).await
    }

    /// Stops the loop and waits for it to exit. Stopping a stopped scanner
    /// returns `Ok(0)`.
    pub async fn stop(&mut self) -> Result<u64, RobotError<S::Error>> {
        match self.task.take() {
            Some(task) => {
                let frames = task.stop().await?;
                info!("scanner stop after {} frames", frames);
                Ok(frames)
            }
            None => Ok(0),
        }
    }
}
