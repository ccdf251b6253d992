//! Cassette Base
//!
//! The stationary tray: main floor, raised chip platform with recess
//! walls, outer side walls, and four T-slot rails the carts ride on.
//! The outer walls get slot cutouts for the cap's attachment fins,
//! subtracted with a clearance margin so the boolean never sees
//! coincident surfaces.

use glam::Vec3;

use crate::csg;
use crate::dims::Dimensions;
use crate::parts::cap::{FIN_LENGTH, FIN_SPACING_X, FIN_THICKNESS};
use crate::parts::materials::MaterialId;
use crate::scene::{ComponentGroup, ComponentId, Solid};
use crate::solid::cuboid;

/// Z offsets of the four T-slot rails from the centreline.
const RAIL_OFFSETS_Z: [f32; 4] = [-4.5, -2.5, 2.5, 4.5];

/// Extra size of the fin slot cutout over the fin it receives.
const SLOT_CLEARANCE: f32 = 0.1;

/// Build the base group in its own object space (it never moves).
pub fn build(dims: &Dimensions) -> ComponentGroup {
    let base_length = dims.base_length() as f32;
    let chip_length = dims.chip_length as f32;
    let chip_width = dims.chip_width as f32;
    let platform_h = dims.chip_platform_height as f32;
    let wall_h = dims.recess_wall_height as f32;
    let wall_t = dims.wall_thickness as f32;
    let outer_wall_h = dims.base_wall_height as f32;
    let rail_top = dims.rail_top_y as f32;

    let mut solids = Vec::new();
    let mut add = |mesh, material: MaterialId| {
        solids.push(Solid::new(mesh, material));
    };

    // Main floor
    let mut floor = cuboid(Vec3::new(base_length, 0.2, chip_width + 2.0));
    floor.translate(Vec3::new(0.0, -0.1, 0.0));
    add(floor, MaterialId::Base);

    // Chip platform, wider than the chip to close gaps
    let mut platform = cuboid(Vec3::new(chip_length, platform_h, chip_width + 2.0));
    platform.translate(Vec3::new(0.0, platform_h / 2.0, 0.0));
    add(platform, MaterialId::Base);

    // Full-length solid side walls of the chip recess
    let wall_y = platform_h + wall_h / 2.0;
    for side in [-1.0f32, 1.0] {
        let mut wall = cuboid(Vec3::new(chip_length, wall_h, wall_t));
        wall.translate(Vec3::new(
            0.0,
            wall_y,
            side * (chip_width / 2.0 + wall_t / 2.0),
        ));
        add(wall, MaterialId::Base);
    }

    // Notched end walls: two segments each, doubled in height, leaving
    // a central gap for the needle cradle to pass through.
    let total_wall_width = chip_width + 2.0 * wall_t;
    let clearance = dims.cradle_clearance_width as f32;
    let segment_len = (total_wall_width - clearance) / 2.0;
    let end_wall_x = chip_length / 2.0 + wall_t / 2.0;
    let end_wall_y = platform_h + wall_h;
    for end in [-1.0f32, 1.0] {
        for side in [-1.0f32, 1.0] {
            let mut segment = cuboid(Vec3::new(wall_t, 2.0 * wall_h, segment_len));
            segment.translate(Vec3::new(
                end * end_wall_x,
                end_wall_y,
                side * (clearance / 2.0 + segment_len / 2.0),
            ));
            add(segment, MaterialId::Base);
        }
    }

    // Outer side walls with the cap fin slots cut out of the top edge
    for side in [-1.0f32, 1.0] {
        let mut wall = cuboid(Vec3::new(base_length, outer_wall_h, 1.0));
        wall.translate(Vec3::new(
            0.0,
            outer_wall_h / 2.0 - 0.2,
            side * (chip_width / 2.0 + 1.5),
        ));

        let wall_top = outer_wall_h - 0.2;
        for fin_x in [-FIN_SPACING_X, FIN_SPACING_X] {
            // Slot reaches from just above the wall top to below the
            // fin's seated depth, and punches through the full wall.
            let slot_h = outer_wall_h - 0.5;
            let mut slot = cuboid(Vec3::new(
                FIN_LENGTH + SLOT_CLEARANCE,
                slot_h,
                FIN_THICKNESS + 2.0 * SLOT_CLEARANCE + 0.2,
            ));
            slot.translate(Vec3::new(
                fin_x * base_length,
                wall_top - slot_h / 2.0 + 0.1,
                side * (chip_width / 2.0 + 1.5),
            ));
            wall = csg::subtract(&wall, &slot);
        }

        wall.set_color(MaterialId::Base.color());
        add(wall, MaterialId::Base);
    }

    // T-slot rails: stem plus wider top flange
    for z in RAIL_OFFSETS_Z {
        let mut stem = cuboid(Vec3::new(base_length, rail_top, 0.5));
        stem.translate(Vec3::new(0.0, rail_top / 2.0, z));
        add(stem, MaterialId::Base);

        let mut top = cuboid(Vec3::new(base_length, 0.2, 1.5));
        top.translate(Vec3::new(0.0, rail_top - 0.1, z));
        add(top, MaterialId::Base);
    }

    ComponentGroup::new(ComponentId::Base, solids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_spans_full_length() {
        let group = build(&Dimensions::default());
        let (min, max) = group.merged_mesh().bounds();
        assert!((max.x - min.x - 44.5).abs() < 1e-3);
    }

    #[test]
    fn test_base_is_all_base_material() {
        let group = build(&Dimensions::default());
        assert!(group.solids.iter().all(|s| s.material == MaterialId::Base));
    }

    #[test]
    fn test_slots_removed_material_from_outer_walls() {
        // The slotted wall must have less volume than an uncut wall.
        let dims = Dimensions::default();
        let group = build(&dims);
        // Outer wall footprint is base_length x wall_height x 1.0.
        let uncut = dims.base_length() * dims.base_wall_height;
        // Outer walls are solids 8 and 9 (after floor, platform, 2 side
        // walls, 4 end-wall segments).
        for wall in &group.solids[8..10] {
            let vol = wall.mesh.volume();
            assert!(vol > 0.0);
            assert!(vol < uncut - 1.0, "slot cutouts should remove material");
        }
    }
}
