//! Integration tests for the Larsson scanner and the LED add-ons

use rs_robobit::bitface::{BitFace, Eyes, Mouth};
use rs_robobit::hal::MockStrip;
use rs_robobit::matrix::{EyeGaze, EyeSize, Matrix5};
use rs_robobit::{ConfigError, LedBar, Rgb, RobotError, ScannerAnimator, UpdateMode};

// ============================================================================
// Scanner State Machine
// ============================================================================

#[test]
fn bounce_sequence_on_eight_pixels() {
    let mut scanner = ScannerAnimator::default();
    let positions: Vec<usize> = (0..12)
        .map(|_| scanner.step(8).unwrap().position())
        .collect();
    assert_eq!(positions, [2, 3, 4, 5, 6, 5, 4, 3, 2, 1, 2, 3]);
}

#[test]
fn pixel_assignment_around_centre() {
    let mut scanner = ScannerAnimator::new(Rgb::RED);
    let frame = (0..3).map(|_| scanner.step(8).unwrap()).last().unwrap();
    assert_eq!(frame.position(), 4);

    let colors = scanner.colors();
    assert_eq!(frame.color_at(4), Some(colors.primary));
    assert_eq!(frame.color_at(3), Some(colors.secondary));
    assert_eq!(frame.color_at(5), Some(colors.secondary));
    assert_eq!(frame.color_at(2), Some(colors.tertiary));
    assert_eq!(frame.color_at(6), Some(colors.tertiary));
    assert_eq!(frame.color_at(1), Some(Rgb::OFF));
    assert_eq!(frame.color_at(0), None);
    assert_eq!(frame.color_at(7), None);
}

#[test]
fn color_decay_masks_each_channel() {
    let colors = ScannerAnimator::new(Rgb::RED).colors();
    assert_eq!(colors.secondary.as_u32(), 0x1f0000);
    assert_eq!(colors.tertiary.as_u32(), 0x070000);

    let white = ScannerAnimator::new(Rgb::WHITE).colors();
    assert_eq!(white.secondary.as_u32(), 0x1f1f1f);
}

#[test]
fn three_pixel_strip_holds_still() {
    let mut scanner = ScannerAnimator::default();
    for _ in 0..5 {
        assert_eq!(scanner.step(3).unwrap().position(), 1);
    }
}

// ============================================================================
// LED Bar
// ============================================================================

#[test]
fn bar_scan_in_manual_mode() {
    let mut bar = LedBar::new(MockStrip::new(8)).unwrap();
    bar.set_update_mode(UpdateMode::Manual);
    for _ in 0..3 {
        bar.scan_step().unwrap();
    }
    assert!(bar.strip().shown.iter().all(|c| c.is_off()));

    bar.show().unwrap();
    assert_eq!(bar.strip().shown[4], Rgb::RED);
    assert_eq!(bar.strip().lit(), [2, 3, 4, 5, 6]);
}

#[test]
fn bar_too_short_for_scanner() {
    let mut bar = LedBar::new(MockStrip::new(1)).unwrap();
    assert_eq!(
        bar.scan_step().unwrap_err(),
        RobotError::Config(ConfigError::StripTooShort { len: 1, min: 3 })
    );
}

// ============================================================================
// Matrix and BitFace
// ============================================================================

#[test]
fn matrix_eyeball_corners_always_off() {
    let mut matrix = Matrix5::new(MockStrip::new(25)).unwrap();
    for size in [EyeSize::Small, EyeSize::Large] {
        for gaze in EyeGaze::ALL {
            matrix.eyeball(gaze, Rgb::GREEN, size).unwrap();
            for (x, y) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
                let index = Matrix5::<MockStrip>::xy_index(x, y).unwrap();
                assert!(matrix.strip().pixels[index].is_off());
            }
        }
    }
}

#[test]
fn matrix_id_zero_is_last_strip_pixel() {
    assert_eq!(Matrix5::<MockStrip>::id_index(0), Some(24));
    assert_eq!(Matrix5::<MockStrip>::id_index(25), None);
}

#[test]
fn bitface_mouth_change_clears_old_mouth() {
    let mut face = BitFace::new(MockStrip::new(17)).unwrap();
    face.set_eyes(Eyes::Both, Rgb::BLUE).unwrap();
    face.set_mouth(Mouth::Grin, Rgb::RED).unwrap();
    face.set_mouth(Mouth::Oooh, Rgb::RED).unwrap();

    assert_eq!(
        face.strip().lit(),
        [1, 2, 3, 4, 6, 7, 8, 9, 10, 13, 15, 16]
    );
}
