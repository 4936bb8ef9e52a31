//! Desktop walkthrough of the robot against mock hardware.
//!
//! Drives the buggy through a short routine, reads the sonar and runs the
//! background LED bar scanner for half a second, printing what reaches the
//! pins.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin robot_demo --features background
//! cargo run --bin robot_demo --features background -- green -700
//! ```
//!
//! The optional arguments pick the scanner colour by palette name and a
//! cruise speed (`-1023..=1023`) for the timed drive.

use std::time::Duration;

use anyhow::Context;
use rs_robobit::hal::{MockDelay, MockPins, MockStrip};
use rs_robobit::parsing::parse_int;
use rs_robobit::services::{shared_led_bar, ScannerService};
use rs_robobit::traits::Pin;
use rs_robobit::{
    Config, Direction, LedBar, Model, Rgb, Robot, ScannerConfig, SonarUnit, StopMode, Turn,
};

/// How long the background scanner runs.
const SCAN_RUN_MS: u64 = 500;

/// Cruise speed used when none is given.
const DEFAULT_CRUISE: i32 = 600;

/// Mock collaborators report `()` errors; give them a message.
fn hw(_: ()) -> anyhow::Error {
    anyhow::anyhow!("mock hardware error")
}

fn main() -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run())
}

async fn run() -> anyhow::Result<()> {
    println!("=================================");
    println!("  rs-robobit Desktop Demo");
    println!("=================================");
    println!();

    let mut args = std::env::args().skip(1);
    let color = match args.next() {
        Some(name) => {
            Rgb::from_name(&name).with_context(|| format!("unknown colour {:?}", name))?
        }
        None => Rgb::BLUE,
    };
    let cruise = match args.next() {
        Some(text) => parse_int(&text).with_context(|| format!("bad speed {:?}", text))?,
        None => DEFAULT_CRUISE,
    };

    let config = Config::default()
        .with_model(Model::Mk3)
        .with_scanner(ScannerConfig::default().with_color(color).with_delay_ms(50));
    config.validate()?;
    println!("Device: {} ({:?})", config.device.name, config.model);

    // ------------------------------------------------------------------
    // Motors
    // ------------------------------------------------------------------
    let mut robot = Robot::from_config(MockPins::new(), &config);
    let mut delay = MockDelay::new();
    robot.set_bias(Turn::Left, 5);

    println!();
    println!("speed   left  right  period");
    for speed in [1023, 600, 200, 0, -200, -600, -1023] {
        robot.drive(speed).map_err(hw)?;
        let pins = robot.pins();
        println!(
            "{:>5}  {:>5}  {:>5}  {:>6} us",
            speed,
            pins.analog(Pin::P0).unwrap_or(0),
            pins.analog(Pin::P1).unwrap_or(0),
            robot.state().band.period_us(),
        );
    }

    robot
        .drive_for(&mut delay, cruise, 800)
        .await
        .map_err(hw)?;
    robot
        .drive_turn_for(&mut delay, Turn::Left, 500, 400)
        .await
        .map_err(hw)?;
    robot
        .go_for(&mut delay, Direction::Forward, 60, 1000)
        .await
        .map_err(hw)?;
    robot.stop(StopMode::Brake).map_err(hw)?;
    println!();
    println!("Timed moves requested {} ms of delay", delay.total_ms);

    // ------------------------------------------------------------------
    // Sonar
    // ------------------------------------------------------------------
    robot.pins_mut().queue_pulse(0);
    robot.pins_mut().queue_pulse(1160);
    let distance = robot.sonar(SonarUnit::Centimeters).map_err(hw)?;
    println!("Sonar: {} cm", distance);

    // ------------------------------------------------------------------
    // Background scanner
    // ------------------------------------------------------------------
    let bar = LedBar::from_config(
        MockStrip::new(config.led_bar.length),
        &config.led_bar,
        config.bluetooth,
    )
    .map_err(hw)?;
    let bar = shared_led_bar(bar);
    let mut scanner = ScannerService::new(bar.clone());

    scanner.start_with(&config.scanner).await?;
    println!();
    println!("Scanner running for {} ms...", SCAN_RUN_MS);
    tokio::time::sleep(Duration::from_millis(SCAN_RUN_MS)).await;
    let frames = scanner.stop().await?;

    let shown: String = bar
        .lock()
        .await
        .strip()
        .shown
        .iter()
        .map(|c| if c.is_off() { '.' } else { '#' })
        .collect();
    println!("Scanner drew {} frames, last frame [{}]", frames, shown);

    Ok(())
}
