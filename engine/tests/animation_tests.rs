//! Animation Tests - Assembly State Machine
//!
//! Drives the scene session with explicit timestamps to pin the
//! interaction contract: reset gating, the ease-out quartic sampling,
//! the in-flight counter draining, and the documented overwrite
//! semantics for re-issued animations.

use cassette_engine::anim::{ease_out_quart, GLIDE_DURATION};
use cassette_engine::dims::Dimensions;
use cassette_engine::scene::{CassetteScene, ComponentId};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn scene() -> CassetteScene {
    CassetteScene::new(&Dimensions::default())
}

// ============================================================================
// Reset Gating
// ============================================================================

#[test]
fn test_reset_is_noop_while_animating() {
    let mut scene = scene();
    scene.lock_sliders(0.0);
    scene.tick(0.5);
    let mid_position = scene.group(ComponentId::SliderRight).position;
    assert!(!approx_eq(mid_position.x, 18.25), "cart should have moved");

    // Reset must be ignored: the counter is nonzero.
    scene.reset();
    assert_eq!(scene.group(ComponentId::SliderRight).position, mid_position);
    assert_eq!(scene.in_flight(), 2);
}

#[test]
fn test_reset_after_completion_restores_initial_poses() {
    let mut scene = scene();
    scene.lock_sliders(0.0);
    scene.tick(GLIDE_DURATION);
    scene.assemble_cap(GLIDE_DURATION);
    scene.tick(2.0 * GLIDE_DURATION);
    assert_eq!(scene.in_flight(), 0);

    scene.set_visible(ComponentId::Cap, false);
    scene.reset();
    assert!(approx_eq(scene.group(ComponentId::SliderRight).position.x, 18.25));
    assert!(approx_eq(scene.group(ComponentId::SliderLeft).position.x, -18.25));
    assert!(approx_eq(scene.group(ComponentId::Cap).position.y, 20.0));
    assert!(scene.group(ComponentId::Cap).visible, "reset forces the cap on");
}

// ============================================================================
// Quartic Sampling
// ============================================================================

#[test]
fn test_lock_samples_start_midpoint_and_target() {
    let mut scene = scene();
    scene.lock_sliders(0.0);

    // Progress 0: exactly the start pose.
    scene.tick(0.0);
    assert!(approx_eq(scene.group(ComponentId::SliderRight).position.x, 18.25));

    // Progress 0.5: start + (target - start) * (1 - 0.5^4).
    scene.tick(0.5 * GLIDE_DURATION);
    let expected = 18.25 + (13.75 - 18.25) * (1.0 - 0.5f32.powi(4));
    let sampled = scene.group(ComponentId::SliderRight).position.x;
    assert!(approx_eq(sampled, expected), "{sampled} vs {expected}");
    // Strictly between start and target along the slide axis.
    assert!(sampled < 18.25 && sampled > 13.75);
    // Straight line: no drift off the axis.
    assert!(approx_eq(scene.group(ComponentId::SliderRight).position.y, 0.0));
    assert!(approx_eq(scene.group(ComponentId::SliderRight).position.z, 0.0));

    // Progress 1: exactly the target pose.
    scene.tick(GLIDE_DURATION);
    assert!(approx_eq(scene.group(ComponentId::SliderRight).position.x, 13.75));
    assert!(approx_eq(scene.group(ComponentId::SliderLeft).position.x, -13.75));
}

#[test]
fn test_displacement_is_monotonic_along_the_line() {
    let mut scene = scene();
    scene.lock_sliders(0.0);

    let mut last_x = f32::MAX;
    for step in 0..=20 {
        let t = step as f64 / 20.0 * GLIDE_DURATION;
        scene.tick(t);
        let x = scene.group(ComponentId::SliderRight).position.x;
        assert!(x < last_x || step == 0, "x must strictly decrease toward 13.75");
        last_x = x;
    }
}

#[test]
fn test_easing_curve_shape() {
    // Ease-out: the first half covers far more ground than the second.
    let first_half = ease_out_quart(0.5);
    assert!(first_half > 0.9);
    assert!((ease_out_quart(1.0) - 1.0).abs() < 1e-12);
}

// ============================================================================
// In-Flight Counter
// ============================================================================

#[test]
fn test_counter_drains_to_zero_after_both_locks() {
    let mut scene = scene();
    assert!(scene.controls_enabled());

    scene.lock_sliders(0.0);
    assert_eq!(scene.in_flight(), 2, "both carts animate concurrently");
    assert!(!scene.controls_enabled());

    scene.tick(0.25);
    assert_eq!(scene.in_flight(), 2);

    scene.tick(GLIDE_DURATION);
    assert_eq!(scene.in_flight(), 0, "counter returns to exactly zero");
    assert!(scene.controls_enabled());
}

#[test]
fn test_commands_ignored_while_in_flight() {
    let mut scene = scene();
    scene.assemble_cap(0.0);
    assert_eq!(scene.in_flight(), 1);

    // Lock is a trigger control; it is disabled mid-animation.
    scene.lock_sliders(0.2);
    assert_eq!(scene.in_flight(), 1);
    assert!(approx_eq(scene.group(ComponentId::SliderRight).position.x, 18.25));
}

// ============================================================================
// Overwrite Semantics
// ============================================================================

#[test]
fn test_reissued_animation_captures_current_position() {
    let mut scene = scene();
    scene.assemble_cap(0.0);
    scene.tick(0.5);
    let mid_y = scene.group(ComponentId::Cap).position.y;
    assert!(mid_y < 20.0 && mid_y > 5.1);

    // Let it finish, then raise the cap by resetting and re-assembling
    // from a partial animation: interrupting is not possible through the
    // public commands (they are gated), so exercise the capture rule by
    // completing and re-issuing.
    scene.tick(1.0);
    assert_eq!(scene.in_flight(), 0);
    assert!(approx_eq(scene.group(ComponentId::Cap).position.y, 5.1));

    // Re-issuing from the target is a zero-length glide: it starts at
    // the current (target) position and stays there.
    scene.assemble_cap(2.0);
    scene.tick(2.0);
    assert!(approx_eq(scene.group(ComponentId::Cap).position.y, 5.1));
    scene.tick(2.0 + GLIDE_DURATION);
    assert_eq!(scene.in_flight(), 0);
    assert!(approx_eq(scene.group(ComponentId::Cap).position.y, 5.1));
}

#[test]
fn test_repeated_partial_animations_reach_absolute_target() {
    // Target poses are absolute, so however many times the sequence is
    // re-run, the carts end at the same place.
    let mut scene = scene();
    for round in 0..3 {
        let start = round as f64 * 10.0;
        scene.lock_sliders(start);
        scene.tick(start + GLIDE_DURATION);
    }
    assert!(approx_eq(scene.group(ComponentId::SliderRight).position.x, 13.75));
}
