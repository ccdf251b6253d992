//! Microchip
//!
//! The chip body is an extruded footprint with symmetric port funnels
//! indented into both end faces. Two subtractions follow, in this order:
//! first the interior flow channel running the full length, then the
//! shallow top recess the glass lid sits in. Both cutters are oversized
//! by a small clearance so no coincident surfaces reach the evaluator.
//!
//! The group is built in chip-local space, centred on the chip body;
//! the scene seats it at platform height. The glass lid is a separate
//! component so it can be toggled on its own.

use glam::{DVec2, Mat4, Vec3};

use crate::csg;
use crate::dims::Dimensions;
use crate::parts::materials::MaterialId;
use crate::scene::{ComponentGroup, ComponentId, Solid};
use crate::solid::extrude_profile;

/// Extra length on the channel cutter beyond the chip body.
const CHANNEL_CLEARANCE: f32 = 0.2;
/// How far the recess cutter stands proud of the chip top face.
const RECESS_CLEARANCE: f32 = 0.05;

/// Chip footprint with port funnels, drawn counter-clockwise in XY.
///
/// Each end face carries a funnel: a wide opening tapering to a narrow
/// throat `port_funnel_depth` into the chip.
fn chip_outline(dims: &Dimensions) -> Vec<DVec2> {
    let half_length = dims.chip_length / 2.0;
    let half_width = dims.chip_width / 2.0;
    let throat = dims.port_throat_width / 2.0;
    let opening = dims.port_opening_width / 2.0;
    let inner_x = half_length - dims.port_funnel_depth;

    vec![
        DVec2::new(-half_length, -half_width),
        DVec2::new(half_length, -half_width),
        // Right-side port funnel
        DVec2::new(half_length, -opening),
        DVec2::new(inner_x, -throat),
        DVec2::new(inner_x, throat),
        DVec2::new(half_length, opening),
        DVec2::new(half_length, half_width),
        DVec2::new(-half_length, half_width),
        // Left-side port funnel
        DVec2::new(-half_length, opening),
        DVec2::new(-inner_x, throat),
        DVec2::new(-inner_x, -throat),
        DVec2::new(-half_length, -opening),
    ]
}

/// T-shaped channel cross-section, drawn in XY with y up from 0.
fn channel_profile(dims: &Dimensions) -> Vec<DVec2> {
    let lower = dims.channel_lower_width / 2.0;
    let upper = dims.channel_upper_width / 2.0;
    let lower_h = dims.channel_lower_height;
    let total_h = dims.channel_total_height;

    vec![
        DVec2::new(-lower, 0.0),
        DVec2::new(lower, 0.0),
        DVec2::new(lower, lower_h),
        DVec2::new(upper, lower_h),
        DVec2::new(upper, total_h),
        DVec2::new(-upper, total_h),
        DVec2::new(-upper, lower_h),
        DVec2::new(-lower, lower_h),
    ]
}

/// Octagonal recess outline: a rectangle whose ends taper toward the
/// port throats, so the recess meets the funnels cleanly.
fn recess_outline(dims: &Dimensions) -> Vec<DVec2> {
    let half_width = (dims.chip_width - 2.0) / 2.0;
    let throat = dims.port_throat_width / 2.0;
    let outer_x = dims.chip_length / 2.0 - dims.port_funnel_depth;
    let corner_x = outer_x - 2.0;

    vec![
        DVec2::new(-corner_x, -half_width),
        DVec2::new(corner_x, -half_width),
        DVec2::new(outer_x, -throat),
        DVec2::new(outer_x, throat),
        DVec2::new(corner_x, half_width),
        DVec2::new(-corner_x, half_width),
        DVec2::new(-outer_x, throat),
        DVec2::new(-outer_x, -throat),
    ]
}

/// Y of the chip top face in chip-local coordinates.
fn chip_top_local(dims: &Dimensions) -> f32 {
    (dims.chip_height / 2.0) as f32 - 0.05
}

/// Build the chip body (ports, channel and recess applied).
pub fn build(dims: &Dimensions) -> ComponentGroup {
    let chip_height = dims.chip_height as f32;
    let chip_length = dims.chip_length as f32;
    let top = chip_top_local(dims);

    // Body: footprint extruded upward, centred on the origin. The
    // profile plane (XY) becomes the floor plane (XZ).
    let mut body = extrude_profile(&chip_outline(dims), chip_height - 0.05);
    body.transform(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
    body.translate(Vec3::new(0.0, -chip_height / 2.0, 0.0));

    // Channel cutter: cross-section extruded past both end faces, laid
    // along X, its top `channel_top_cover` below the chip top surface.
    let channel_len = chip_length + CHANNEL_CLEARANCE;
    let mut channel = extrude_profile(&channel_profile(dims), channel_len);
    channel.transform(Mat4::from_rotation_y(-std::f32::consts::FRAC_PI_2));
    let channel_top = top - dims.channel_top_cover as f32;
    channel.translate(Vec3::new(
        channel_len / 2.0,
        channel_top - dims.channel_total_height as f32,
        0.0,
    ));

    // Recess cutter: outline extruded to the recess depth plus a proud
    // margin, cut down into the top face.
    let recess_depth = dims.recess_depth as f32;
    let mut recess = extrude_profile(&recess_outline(dims), recess_depth + RECESS_CLEARANCE);
    recess.transform(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
    recess.translate(Vec3::new(0.0, top - recess_depth, 0.0));

    // Subtractions in fixed order: channel, then recess.
    let mut chip = csg::subtract(&body, &channel);
    chip = csg::subtract(&chip, &recess);
    chip.set_color(MaterialId::Chip.color());
    chip.recompute_normals();

    ComponentGroup::new(ComponentId::Chip, vec![Solid::new(chip, MaterialId::Chip)])
}

/// Build the glass lid: a thin sheet of the recess outline resting at
/// the top of the recess. Shares the chip's placement but toggles
/// independently.
pub fn build_glass_lid(dims: &Dimensions) -> ComponentGroup {
    let top = chip_top_local(dims);
    let thickness = dims.glass_lid_thickness as f32;

    let mut lid = extrude_profile(&recess_outline(dims), thickness);
    lid.transform(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
    lid.translate(Vec3::new(0.0, top - thickness, 0.0));
    lid.set_color(MaterialId::Glass.color());

    ComponentGroup::new(
        ComponentId::GlassLid,
        vec![Solid::new(lid, MaterialId::Glass)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_is_closed_and_symmetric() {
        let outline = chip_outline(&Dimensions::default());
        assert_eq!(outline.len(), 12);
        // Mirror symmetry: for every point, (-x, y) is also present.
        for p in &outline {
            assert!(
                outline
                    .iter()
                    .any(|q| (q.x + p.x).abs() < 1e-9 && (q.y - p.y).abs() < 1e-9),
                "missing mirror of {p:?}"
            );
        }
    }

    #[test]
    fn test_channel_cut_removes_volume() {
        let dims = Dimensions::default();
        let mut body = extrude_profile(&chip_outline(&dims), dims.chip_height as f32 - 0.05);
        body.transform(Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        body.translate(Vec3::new(0.0, -(dims.chip_height as f32) / 2.0, 0.0));
        let body_volume = body.volume();

        let chip = build(&dims);
        let cut_volume = chip.solids[0].mesh.volume();
        assert!(cut_volume > 0.0);
        assert!(
            cut_volume < body_volume - 1.0,
            "channel and recess must remove material: {cut_volume} vs {body_volume}"
        );
    }

    #[test]
    fn test_chip_stays_within_footprint() {
        let dims = Dimensions::default();
        let chip = build(&dims);
        let (min, max) = chip.merged_mesh().bounds();
        assert!(max.x - min.x <= dims.chip_length as f32 + 1e-3);
        assert!(max.z - min.z <= dims.chip_width as f32 + 1e-3);
        assert!(max.y - min.y <= dims.chip_height as f32 + 1e-3);
    }

    #[test]
    fn test_glass_lid_sits_flush_with_top() {
        let dims = Dimensions::default();
        let lid = build_glass_lid(&dims);
        let (_, max) = lid.merged_mesh().bounds();
        assert!((max.y - chip_top_local(&dims)).abs() < 1e-4);
    }

    #[test]
    fn test_glass_lid_is_translucent() {
        let lid = build_glass_lid(&Dimensions::default());
        assert!(lid.solids[0].material.is_transparent());
    }
}
