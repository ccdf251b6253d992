//! Placement Tests - Pose Arithmetic from the Dimension Table
//!
//! The placement policy is a pure function of the dimension set; these
//! tests pin the flush-fit and clearance invariants across several
//! dimension sets, not just the canonical one.

use cassette_engine::dims::Dimensions;
use cassette_engine::scene::poses::PoseTable;
use cassette_engine::scene::{CassetteScene, ComponentId};

/// A few dimension sets with chip length > 2x wall thickness.
fn dimension_sets() -> Vec<Dimensions> {
    let canonical = Dimensions::default();

    let mut long_chip = canonical;
    long_chip.chip_length = 40.0;

    let mut short_chip = canonical;
    short_chip.chip_length = 12.0;

    let mut wide_cradle = canonical;
    wide_cradle.cradle_width = 2.5;

    let mut long_needle = canonical;
    long_needle.needle_shaft_length = 5.0;
    long_needle.needle_clearance = 2.0;

    vec![canonical, long_chip, short_chip, wide_cradle, long_needle]
}

// ============================================================================
// Flush-Fit Invariant
// ============================================================================

#[test]
fn test_slider_target_keeps_cradle_flush_with_chip_edge() {
    for dims in dimension_sets() {
        assert!(dims.chip_length > 2.0 * dims.wall_thickness);
        let poses = PoseTable::derive(&dims);

        // World X of the cradle front face at the target pose must equal
        // the chip edge exactly (distance 0).
        let cradle_face_world =
            poses.slider_right.target.x as f64 + dims.cradle_front_face_local_x();
        assert!(
            (cradle_face_world - dims.chip_edge_x()).abs() < 1e-9,
            "cradle face {} vs chip edge {} for {:?}",
            cradle_face_world,
            dims.chip_edge_x(),
            dims
        );

        // Mirrored cart: same invariant on the negative side.
        let left_face_world =
            poses.slider_left.target.x as f64 - dims.cradle_front_face_local_x();
        assert!((left_face_world + dims.chip_edge_x()).abs() < 1e-9);
    }
}

// ============================================================================
// Exploded-Precedes-Assembled Invariant
// ============================================================================

#[test]
fn test_initial_pose_strictly_farther_than_target() {
    for dims in dimension_sets() {
        let poses = PoseTable::derive(&dims);
        assert!(
            poses.slider_right.initial.x > poses.slider_right.target.x,
            "exploded pose must precede assembled pose for {dims:?}"
        );
        assert!(poses.slider_left.initial.x < poses.slider_left.target.x);
        assert!(poses.cap.initial.y > poses.cap.target.y);
    }
}

#[test]
fn test_initial_clearance_matches_dimension_table() {
    for dims in dimension_sets() {
        let poses = PoseTable::derive(&dims);
        // Needle tip world X at the initial pose sits exactly
        // `needle_clearance` beyond the chip edge.
        let tip_world = poses.slider_right.initial.x as f64 + dims.needle_tip_local_x();
        assert!((tip_world - dims.chip_edge_x() - dims.needle_clearance).abs() < 1e-9);
    }
}

// ============================================================================
// Canonical Values
// ============================================================================

#[test]
fn test_canonical_pose_constants() {
    let poses = PoseTable::derive(&Dimensions::default());
    assert!((poses.slider_right.target.x - 13.75).abs() < 1e-6);
    assert!((poses.slider_right.initial.x - 18.25).abs() < 1e-6);
    assert!((poses.cap.initial.y - 20.0).abs() < 1e-6);
    assert!((poses.cap.target.y - 5.1).abs() < 1e-6);
}

#[test]
fn test_scene_seats_components_at_initial_poses() {
    for dims in dimension_sets() {
        let scene = CassetteScene::new(&dims);
        let poses = PoseTable::derive(&dims);
        assert_eq!(
            scene.group(ComponentId::SliderRight).position,
            poses.slider_right.initial
        );
        assert_eq!(
            scene.group(ComponentId::SliderLeft).position,
            poses.slider_left.initial
        );
        assert_eq!(scene.group(ComponentId::Cap).position, poses.cap.initial);
        assert_eq!(
            scene.group(ComponentId::Chip).position,
            poses.initial_position(ComponentId::Chip)
        );
    }
}
