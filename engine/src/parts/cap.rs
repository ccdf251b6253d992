//! Top Cap
//!
//! The cap is a single fused solid: main body, a slightly larger roof
//! plate, two side walls skirting down outside the base's outer walls,
//! and four attachment fins dropping from the body into the slot
//! cutouts in those walls. Unions are applied body -> roof -> walls ->
//! fins, in that order.
//!
//! Local origin is the centre of the main body; the placement policy
//! moves the whole group along Y. At the assembled pose the body rests
//! just above the outer wall tops, the skirt clears the wall outer
//! faces, and the fins seat inside the slots with clearance all round.

use glam::Vec3;

use crate::csg;
use crate::dims::Dimensions;
use crate::parts::materials::MaterialId;
use crate::scene::{ComponentGroup, ComponentId, Solid};
use crate::solid::cuboid;

/// Fin footprint along X.
pub(crate) const FIN_LENGTH: f32 = 2.0;
/// Fin thickness along Z (thinner than the wall it drops into).
pub(crate) const FIN_THICKNESS: f32 = 0.8;
/// Fin position as a fraction of the base length, mirrored both sides.
pub(crate) const FIN_SPACING_X: f32 = 0.25;
/// How far the fins drop below the cap body.
const FIN_DROP: f32 = 3.5;
/// How far the side walls skirt down from the body.
const WALL_DROP: f32 = 2.0;
/// Overlap between the body and each unioned piece, so the evaluator
/// never sees exactly abutting faces.
const UNION_OVERLAP: f32 = 0.05;
/// Gap between the skirt's inner face and the base wall's outer face.
const SKIRT_CLEARANCE: f32 = 0.4;

/// Build the cap group in cap-local space.
pub fn build(dims: &Dimensions) -> ComponentGroup {
    let base_length = dims.base_length() as f32;
    let chip_width = dims.chip_width as f32;
    let cap_h = dims.cap_height as f32;

    // The base's outer walls are 1.0 thick, centred 1.5 outside the
    // chip half-width; the cap spans them plus the skirt.
    let wall_center_z = chip_width / 2.0 + 1.5;
    let wall_outer_z = wall_center_z + 0.5;
    let skirt_inner_z = wall_outer_z + SKIRT_CLEARANCE;

    let cap_length = base_length + 2.0;
    let cap_width = 2.0 * (skirt_inner_z + FIN_THICKNESS);

    // Main body
    let body = cuboid(Vec3::new(cap_length, cap_h, cap_width));

    // Roof plate: a thin lip overhanging the body on every side
    let mut roof = cuboid(Vec3::new(cap_length + 0.4, 0.3, cap_width + 0.4));
    roof.translate(Vec3::new(0.0, cap_h / 2.0 + 0.15 - UNION_OVERLAP, 0.0));

    // Side walls skirting down outside the base's outer walls
    let mut walls = Vec::new();
    for side in [-1.0f32, 1.0] {
        let mut wall = cuboid(Vec3::new(cap_length, WALL_DROP, FIN_THICKNESS));
        wall.translate(Vec3::new(
            0.0,
            -cap_h / 2.0 - WALL_DROP / 2.0 + UNION_OVERLAP,
            side * (skirt_inner_z + FIN_THICKNESS / 2.0),
        ));
        walls.push(wall);
    }

    // Attachment fins, two per side, dropping from the body at the base
    // wall centreline so they pass through the slot cutouts
    let mut fins = Vec::new();
    for side in [-1.0f32, 1.0] {
        for end in [-1.0f32, 1.0] {
            let mut fin = cuboid(Vec3::new(FIN_LENGTH, FIN_DROP, FIN_THICKNESS));
            fin.translate(Vec3::new(
                end * FIN_SPACING_X * base_length,
                -cap_h / 2.0 - FIN_DROP / 2.0 + UNION_OVERLAP,
                side * wall_center_z,
            ));
            fins.push(fin);
        }
    }

    // Fuse in the fixed order: body -> roof -> walls -> fins.
    let mut cap = csg::union(&body, &roof);
    for wall in &walls {
        cap = csg::union(&cap, wall);
    }
    for fin in &fins {
        cap = csg::union(&cap, fin);
    }
    cap.set_color(MaterialId::Cap.color());

    ComponentGroup::new(ComponentId::Cap, vec![Solid::new(cap, MaterialId::Cap)])
}
