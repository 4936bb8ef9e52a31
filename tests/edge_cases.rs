//! Edge case and boundary condition tests for the robot and its add-ons

use rs_robobit::config::{clamp_scan_delay, Config, LedConfig, SonarConfig};
use rs_robobit::drive::{map_percent, percent_to_speed};
use rs_robobit::hal::{MockIr, MockOled, MockPins, MockStrip, OledOp};
use rs_robobit::ir::IrRemote;
use rs_robobit::parsing::parse_int;
use rs_robobit::sensors::SonarUnit;
use rs_robobit::traits::{Level, Pin};
use rs_robobit::{
    BiasState, ConfigError, Direction, EyeGaze, IrKey, LedBar, Matrix5, Model, Oled, Rgb, Robot,
    Side, Turn,
};

// ============================================================================
// Boundary Value Tests
// ============================================================================

#[test]
fn speed_clamped_above_max() {
    let mut robot = Robot::new(MockPins::new());
    robot.drive(5000).unwrap();
    assert_eq!(robot.pins().analog(Pin::P0), Some(1023));
    assert_eq!(robot.state().left_speed, 1023);
}

#[test]
fn speed_clamped_below_min() {
    let mut robot = Robot::new(MockPins::new());
    robot.drive(i32::MIN).unwrap();
    assert_eq!(robot.pins().analog(Pin::P0), Some(0));
    assert_eq!(robot.pins().digital(Pin::P8), Some(Level::High));
}

#[test]
fn bias_clamped_to_eighty() {
    let mut robot = Robot::new(MockPins::new());
    robot.set_bias(Turn::Right, 200);
    assert_eq!(robot.state().bias.right(), 80);

    robot.drive(1000).unwrap();
    assert_eq!(robot.pins().analog(Pin::P1), Some(200));
}

#[test]
fn negative_bias_clears_both_sides() {
    let mut bias = BiasState::new();
    bias.set(Turn::Left, 30);
    bias.set(Turn::Right, -5);
    assert_eq!((bias.left(), bias.right()), (0, 0));
}

#[test]
fn percent_limits() {
    assert_eq!(percent_to_speed(-10), 0);
    assert_eq!(percent_to_speed(100), 1023);
    assert_eq!(percent_to_speed(250), 1023);

    let out = map_percent(Direction::Forward, 100, Side::Both, &BiasState::new());
    assert_eq!(out.left.unwrap().duty, 1023);
}

// ============================================================================
// Selector Parsing
// ============================================================================

#[test]
fn raw_selectors_reject_unknown_values() {
    assert_eq!(
        Side::try_from(3),
        Err(ConfigError::UnknownVariant { kind: "Side", value: 3 })
    );
    assert!(Model::try_from(4).is_err());
    assert!(EyeGaze::try_from(9).is_err());
    assert!(IrKey::try_from(255).is_err());
}

#[test]
fn text_selectors_ignore_case() {
    assert_eq!(Side::from_text("BOTH"), Some(Side::Both));
    assert_eq!(Direction::from_text("Reverse"), Some(Direction::Reverse));
    assert_eq!(Model::from_text("mk2a"), Some(Model::Mk2A));
    assert_eq!(IrKey::from_text("Go"), Some(IrKey::Go));
    assert_eq!(Side::from_text("middle"), None);
}

#[test]
fn colour_and_speed_selectors_from_text() {
    assert_eq!(Rgb::from_name("GREEN"), Some(Rgb::GREEN));
    assert_eq!(Rgb::from_name("teal"), None);

    // out-of-range speeds parse and are clamped by the drive
    let speed = parse_int(" -2000 ").unwrap();
    let mut robot = Robot::new(MockPins::new());
    robot.drive(speed).unwrap();
    assert_eq!(robot.state().left_speed, 1023);
    assert_eq!(robot.pins().digital(Pin::P8), Some(Level::High));
    assert_eq!(parse_int("full"), None);
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn scan_delay_clamped() {
    assert_eq!(clamp_scan_delay(0), 1);
    assert_eq!(clamp_scan_delay(50_000), 10_000);
    assert_eq!(clamp_scan_delay(100), 100);
}

#[test]
fn validate_rejects_short_matrix() {
    let config = Config::default().with_matrix(LedConfig::matrix().with_len(16));
    assert_eq!(
        config.validate(),
        Err(ConfigError::StripTooShort { len: 16, min: 25 })
    );
}

#[test]
fn validate_rejects_zero_sonar_attempts() {
    let config = Config::default().with_sonar(SonarConfig::default().with_attempts(0));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

// ============================================================================
// Add-on Edge Cases
// ============================================================================

#[test]
fn sonar_silence_reads_zero() {
    let mut robot = Robot::new(MockPins::new());
    assert_eq!(robot.sonar(SonarUnit::Centimeters).unwrap(), 0);
}

#[test]
fn matrix_ignores_out_of_range() {
    let mut matrix = Matrix5::new(MockStrip::new(25)).unwrap();
    matrix.set_xy(5, 0, Rgb::RED).unwrap();
    matrix.set_xy(-1, 2, Rgb::RED).unwrap();
    matrix.set_pixel(30, Rgb::RED).unwrap();
    assert!(matrix.strip().lit().is_empty());

    // edges far outside the matrix: nothing to outline
    matrix.rectangle(-100, -100, 100, 100, Rgb::BLUE, false).unwrap();
    assert!(matrix.strip().lit().is_empty());

    matrix.rectangle(-100, -100, 100, 100, Rgb::BLUE, true).unwrap();
    assert_eq!(matrix.strip().lit().len(), 25);
}

#[test]
fn bluetooth_blocks_every_show() {
    let config = LedConfig::led_bar();
    let mut bar = LedBar::from_config(MockStrip::new(8), &config, true).unwrap();
    bar.set_all(Rgb::WHITE).unwrap();
    bar.scan_step().unwrap();
    bar.show().unwrap();
    assert_eq!(bar.strip().show_count, 0);
}

#[test]
fn unknown_ir_code_has_no_key() {
    let mut remote = IrRemote::new(MockIr::new());
    remote.receiver_mut().press(7);
    assert_eq!(remote.poll(), Some(7));
    assert_eq!(remote.last_key(), None);
    assert!(remote.key_pressed(IrKey::Any));
}

#[test]
fn oled_number_negative() {
    let mut oled = Oled::new(MockOled::new());
    oled.number(-7, 3, 4, false).unwrap();
    assert_eq!(
        oled.display().ops,
        vec![OledOp::Text("-7".into(), 3, 4, false)]
    );
}
