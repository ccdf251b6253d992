//! Slider Cart
//!
//! The needle cart that rides the T-slot rails: main body, two T-slot
//! hooks gripping the rails, the needle cradle at the origin, and the
//! needle assembly (shaft, luer flange, luer port, bore) aligned with
//! the chip's port height.
//!
//! The cart is built facing the chip in -X (the right cart); the left
//! cart is the same build rotated half a turn about Y.

use glam::{Mat4, Vec3};

use crate::dims::Dimensions;
use crate::parts::materials::MaterialId;
use crate::scene::{ComponentGroup, ComponentId, Solid};
use crate::solid::{cuboid, cylinder_y};

/// Z offsets of the two hook pairs (matches the inner rail pair).
const HOOK_OFFSETS_Z: [f32; 2] = [-3.5, 3.5];

/// A cylinder laid along the X axis.
fn cylinder_x(radius: f32, length: f32, segments: u32) -> crate::mesh::TriMesh {
    let mut cyl = cylinder_y(radius, length, segments);
    cyl.transform(Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
    cyl
}

/// Build one slider cart.
///
/// `flipped` builds the left cart: the right cart rotated 180 degrees
/// about Y so its needle faces the opposite chip port.
pub fn build(dims: &Dimensions, flipped: bool) -> ComponentGroup {
    let chip_width = dims.chip_width as f32;
    let rail_top = dims.rail_top_y as f32;
    let body_h = dims.slider_body_height as f32;
    let body_len = dims.slider_body_length as f32;
    let cradle_w = dims.cradle_width as f32;
    let needle_y = dims.chip_center_y() as f32;

    let body_y = rail_top + body_h / 2.0;
    let body_x = cradle_w / 2.0 + body_len / 2.0 - 0.5;

    let mut solids = Vec::new();

    // Main body behind the cradle
    let mut body = cuboid(Vec3::new(body_len + 1.0, body_h, chip_width + 2.0));
    body.translate(Vec3::new(body_x, body_y, 0.0));
    solids.push(Solid::new(body, MaterialId::Slider));

    // T-slot hooks: stem down from the body, foot spreading under the
    // rail flange
    for z in HOOK_OFFSETS_Z {
        let mut stem = cuboid(Vec3::new(body_len, 0.4, 0.5));
        stem.translate(Vec3::new(body_x, body_y - body_h / 2.0 - 0.2, z));
        solids.push(Solid::new(stem, MaterialId::Slider));

        let mut foot = cuboid(Vec3::new(body_len, 0.4, 1.5));
        foot.translate(Vec3::new(body_x, body_y - body_h / 2.0 - 0.4, z));
        solids.push(Solid::new(foot, MaterialId::Slider));
    }

    // Cradle: carries the needle, its centre is the cart origin
    let cradle_h = needle_y - rail_top + 0.5;
    let mut cradle = cuboid(Vec3::new(cradle_w, cradle_h, 4.0));
    cradle.translate(Vec3::new(0.0, rail_top + cradle_h / 2.0, 0.0));
    solids.push(Solid::new(cradle, MaterialId::Slider));

    // Needle shaft, protruding toward the chip
    let shaft_len = dims.needle_shaft_length as f32;
    let mut shaft = cylinder_x(dims.needle_radius as f32, shaft_len, 16);
    shaft.translate(Vec3::new(-shaft_len / 2.0, needle_y, 0.0));
    solids.push(Solid::new(shaft, MaterialId::Needle));

    // Luer port behind the cradle: flange, barrel, and the bore shown
    // in a darker material
    let luer_x = cradle_w / 2.0;
    let mut flange = cylinder_x(1.2, 0.5, 32);
    flange.translate(Vec3::new(luer_x + 0.25, needle_y, 0.0));
    solids.push(Solid::new(flange, MaterialId::Needle));

    let mut barrel = cylinder_x(0.8, 2.0, 32);
    barrel.translate(Vec3::new(luer_x + 1.5, needle_y, 0.0));
    solids.push(Solid::new(barrel, MaterialId::Needle));

    let mut bore = cylinder_x(0.5, 2.05, 32);
    bore.translate(Vec3::new(luer_x + 1.5, needle_y, 0.0));
    solids.push(Solid::new(bore, MaterialId::PortBore));

    let id = if flipped {
        ComponentId::SliderLeft
    } else {
        ComponentId::SliderRight
    };

    let mut group = ComponentGroup::new(id, solids);
    if flipped {
        let half_turn = Mat4::from_rotation_y(std::f32::consts::PI);
        for solid in &mut group.solids {
            solid.mesh.transform(half_turn);
        }
    }
    group
}
