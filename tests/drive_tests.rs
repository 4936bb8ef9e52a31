//! Integration tests for motor drive mapping through the robot

use rs_robobit::drive::{map_speed, reverse_boost, PwmPeriodBand};
use rs_robobit::hal::{MockDelay, MockPins, PinEvent};
use rs_robobit::traits::{Level, Pin};
use rs_robobit::{BiasState, Direction, Model, Robot, Side, StopMode, Turn};

fn robot() -> Robot<MockPins> {
    Robot::new(MockPins::new())
}

// ============================================================================
// Reverse Curve
// ============================================================================

#[test]
fn reverse_curve_literal_values() {
    for (magnitude, boosted) in [(200, 633), (400, 800), (600, 900), (800, 1000), (1023, 1023)] {
        assert_eq!(reverse_boost(magnitude), boosted);

        let out = map_speed(-(magnitude as i32), Side::Left, &BiasState::new());
        assert_eq!(out.left.unwrap().duty, 1023 - boosted);
    }
}

#[test]
fn reverse_curve_never_weakens() {
    for magnitude in 0..=1023 {
        let boosted = reverse_boost(magnitude);
        assert!(boosted >= magnitude, "weaker at {}", magnitude);
        assert!(boosted <= 1023);
    }
}

#[test]
fn output_always_in_pwm_range() {
    let mut bias = BiasState::new();
    bias.set(Turn::Right, 80);
    for speed in -1100..=1100 {
        let out = map_speed(speed, Side::Both, &bias);
        assert!(out.left.unwrap().duty <= 1023);
        assert!(out.right.unwrap().duty <= 1023);
    }
}

// ============================================================================
// Legacy Wiring
// ============================================================================

#[test]
fn full_reverse_writes_zero_duty_and_high_direction() {
    let mut robot = robot();
    robot.drive(-1023).unwrap();

    let pins = robot.pins();
    assert_eq!(pins.analog(Pin::P0), Some(0));
    assert_eq!(pins.analog(Pin::P1), Some(0));
    assert_eq!(pins.digital(Pin::P8), Some(Level::High));
    assert_eq!(pins.digital(Pin::P12), Some(Level::High));
}

#[test]
fn band_follows_magnitude() {
    let mut robot = robot();
    for (speed, band) in [
        (150, PwmPeriodBand::Slowest),
        (-250, PwmPeriodBand::Slow),
        (599, PwmPeriodBand::Medium),
        (600, PwmPeriodBand::Fast),
        (-1023, PwmPeriodBand::Fastest),
    ] {
        robot.drive(speed).unwrap();
        assert_eq!(robot.state().band, band);
        assert_eq!(robot.pins().period(Pin::P0), Some(band.period_us()));
    }
}

#[test]
fn zero_speed_ignores_bias_and_band() {
    let mut robot = robot();
    robot.set_bias(Turn::Left, 40);
    robot.drive(-900).unwrap();
    robot.drive(0).unwrap();

    assert_eq!(robot.pins().analog(Pin::P0), Some(0));
    assert_eq!(robot.pins().analog(Pin::P1), Some(0));
}

#[test]
fn drive_turn_left_reverses_left_side() {
    let mut robot = robot();
    robot.drive_turn(Turn::Left, 500).unwrap();

    let pins = robot.pins();
    assert_eq!(pins.digital(Pin::P8), Some(Level::High));
    assert_eq!(pins.digital(Pin::P12), Some(Level::Low));
    assert_eq!(pins.analog(Pin::P1), Some(500));
}

#[test]
fn single_side_leaves_other_untouched() {
    let mut robot = robot();
    robot.motor(Side::Right, 300).unwrap();
    assert_eq!(robot.pins().analog(Pin::P0), None);
    assert_eq!(robot.pins().analog(Pin::P1), Some(300));
}

// ============================================================================
// Dual-PWM Wiring and Stops
// ============================================================================

#[test]
fn percent_reverse_uses_second_input() {
    let mut robot = robot();
    robot.go(Direction::Reverse, 50).unwrap();

    let pins = robot.pins();
    assert_eq!(pins.analog(Pin::P0), Some(0));
    assert_eq!(pins.analog(Pin::P8), Some(512));
    assert_eq!(pins.analog(Pin::P1), Some(0));
    assert_eq!(pins.analog(Pin::P12), Some(512));
}

#[test]
fn brake_drives_all_motor_pins_high() {
    let mut robot = robot();
    robot.go(Direction::Forward, 80).unwrap();
    robot.pins_mut().clear_events();
    robot.stop(StopMode::Brake).unwrap();

    assert_eq!(
        robot.pins().events,
        [
            PinEvent::Digital(Pin::P0, Level::High),
            PinEvent::Digital(Pin::P8, Level::High),
            PinEvent::Digital(Pin::P1, Level::High),
            PinEvent::Digital(Pin::P12, Level::High),
        ]
    );
    assert_eq!(robot.state().left_speed, 0);
}

#[test]
fn pin_map_is_shared_across_models() {
    for model in [Model::Mk1, Model::Mk2, Model::Mk2A, Model::Mk3] {
        let mut robot = Robot::with_model(MockPins::new(), model);
        robot.drive(400).unwrap();
        assert_eq!(robot.pins().analog(Pin::P0), Some(400));
        assert_eq!(robot.pins().analog(Pin::P1), Some(400));
    }
}

// ============================================================================
// Timed Manoeuvres
// ============================================================================

#[tokio::test]
async fn timed_moves_finish_stopped() {
    let mut robot = robot();
    let mut delay = MockDelay::new();

    robot.drive_for(&mut delay, 700, 1500).await.unwrap();
    assert_eq!(robot.pins().analog(Pin::P0), Some(0));

    robot
        .rotate_for(&mut delay, Turn::Right, 30, 250)
        .await
        .unwrap();
    assert_eq!(robot.pins().digital(Pin::P0), Some(Level::Low));

    assert_eq!(delay.calls, vec![1500, 250]);
    assert_eq!(robot.state().right_speed, 0);
}
