//! Primitive Solid Builders
//!
//! Boxes, cylinders and extruded 2D profiles as closed triangle meshes.
//! All primitives are built centred at the origin in object space (the
//! extrusion starts at z = 0) and positioned with [`TriMesh::transform`]
//! or [`TriMesh::translate`]. Faces carry flat normals and consistent
//! counter-clockwise outward winding; the boolean evaluator depends on
//! the orientation being correct.

use glam::{DVec2, Vec3};

use crate::mesh::{ear_clip, MeshVertex, TriMesh};

/// Default color for freshly built primitives; part builders repaint.
const BUILD_COLOR: [f32; 4] = [0.6, 0.6, 0.6, 1.0];

fn push_vertex(mesh: &mut TriMesh, position: Vec3, normal: Vec3) -> u32 {
    let idx = mesh.vertices.len() as u32;
    mesh.vertices.push(MeshVertex {
        position: position.to_array(),
        normal: normal.to_array(),
        color: BUILD_COLOR,
    });
    idx
}

/// Axis-aligned box centred at the origin.
///
/// `size` is the full extent along each axis. Each face has its own four
/// vertices so shading stays crisp.
pub fn cuboid(size: Vec3) -> TriMesh {
    let h = size * 0.5;
    let mut mesh = TriMesh::new();

    // (normal, four corners in CCW order seen from outside)
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        (
            Vec3::X,
            [
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, -h.y, h.z),
            ],
        ),
        (
            Vec3::NEG_X,
            [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(-h.x, -h.y, -h.z),
            ],
        ),
        (
            Vec3::Y,
            [
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(-h.x, h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(h.x, h.y, -h.z),
            ],
        ),
        (
            Vec3::NEG_Y,
            [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(h.x, -h.y, h.z),
            ],
        ),
        (
            Vec3::Z,
            [
                Vec3::new(-h.x, -h.y, h.z),
                Vec3::new(h.x, -h.y, h.z),
                Vec3::new(h.x, h.y, h.z),
                Vec3::new(-h.x, h.y, h.z),
            ],
        ),
        (
            Vec3::NEG_Z,
            [
                Vec3::new(h.x, -h.y, -h.z),
                Vec3::new(-h.x, -h.y, -h.z),
                Vec3::new(-h.x, h.y, -h.z),
                Vec3::new(h.x, h.y, -h.z),
            ],
        ),
    ];

    for (normal, corners) in faces {
        let base = mesh.vertices.len() as u32;
        for corner in corners {
            push_vertex(&mut mesh, corner, normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// Cylinder along the Y axis, centred at the origin.
pub fn cylinder_y(radius: f32, height: f32, segments: u32) -> TriMesh {
    let segments = segments.max(3);
    let h = height / 2.0;
    let mut mesh = TriMesh::new();

    let ring: Vec<(f32, f32)> = (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            (angle.cos(), angle.sin())
        })
        .collect();

    // Side quads with flat per-segment normals averaged at the edge
    // midpoint; for a visualizer at 16-32 segments this reads as round.
    for i in 0..segments as usize {
        let j = (i + 1) % segments as usize;
        let (c0, s0) = ring[i];
        let (c1, s1) = ring[j];

        let n0 = Vec3::new(c0, 0.0, s0);
        let n1 = Vec3::new(c1, 0.0, s1);

        let b0 = push_vertex(&mut mesh, Vec3::new(radius * c0, -h, radius * s0), n0);
        let t0 = push_vertex(&mut mesh, Vec3::new(radius * c0, h, radius * s0), n0);
        let t1 = push_vertex(&mut mesh, Vec3::new(radius * c1, h, radius * s1), n1);
        let b1 = push_vertex(&mut mesh, Vec3::new(radius * c1, -h, radius * s1), n1);

        mesh.indices.extend_from_slice(&[b0, t0, t1, b0, t1, b1]);
    }

    // Caps
    let top_center = push_vertex(&mut mesh, Vec3::new(0.0, h, 0.0), Vec3::Y);
    let bot_center = push_vertex(&mut mesh, Vec3::new(0.0, -h, 0.0), Vec3::NEG_Y);
    let top_base = mesh.vertices.len() as u32;
    for &(c, s) in &ring {
        push_vertex(&mut mesh, Vec3::new(radius * c, h, radius * s), Vec3::Y);
    }
    let bot_base = mesh.vertices.len() as u32;
    for &(c, s) in &ring {
        push_vertex(&mut mesh, Vec3::new(radius * c, -h, radius * s), Vec3::NEG_Y);
    }

    for i in 0..segments {
        let j = (i + 1) % segments;
        // Top cap winds CCW seen from +Y, bottom from -Y.
        mesh.indices
            .extend_from_slice(&[top_center, top_base + j, top_base + i]);
        mesh.indices
            .extend_from_slice(&[bot_center, bot_base + i, bot_base + j]);
    }

    mesh
}

/// Linear extrusion of a closed 2D profile along +Z.
///
/// The profile lies in the XY plane (any winding); the solid spans
/// z = 0 .. `depth`. Caps are triangulated by ear clipping, so concave
/// outlines (the chip footprint, the channel cross-section) are fine.
/// Self-intersecting profiles are not detected; garbage in, garbage out.
pub fn extrude_profile(profile: &[DVec2], depth: f32) -> TriMesh {
    let mut mesh = TriMesh::new();
    if profile.len() < 3 {
        return mesh;
    }

    let tris = ear_clip(profile);

    // Normalize to CCW so the side-wall outward normals come out right.
    let ccw: Vec<DVec2> = if crate::mesh::triangulate::signed_area(profile) >= 0.0 {
        profile.to_vec()
    } else {
        profile.iter().rev().copied().collect()
    };
    let n = ccw.len();

    // Side walls, one flat quad per profile edge.
    for i in 0..n {
        let j = (i + 1) % n;
        let a = ccw[i];
        let b = ccw[j];
        let edge = b - a;
        let len = edge.length();
        if len < 1e-12 {
            continue;
        }
        let normal = Vec3::new((edge.y / len) as f32, (-edge.x / len) as f32, 0.0);

        let a0 = push_vertex(&mut mesh, Vec3::new(a.x as f32, a.y as f32, 0.0), normal);
        let b0 = push_vertex(&mut mesh, Vec3::new(b.x as f32, b.y as f32, 0.0), normal);
        let b1 = push_vertex(&mut mesh, Vec3::new(b.x as f32, b.y as f32, depth), normal);
        let a1 = push_vertex(&mut mesh, Vec3::new(a.x as f32, a.y as f32, depth), normal);

        mesh.indices.extend_from_slice(&[a0, b0, b1, a0, b1, a1]);
    }

    // Caps. Ear clipping reports CCW triples in input order, which face
    // +Z; the back cap reverses them.
    let front_base = mesh.vertices.len() as u32;
    for p in profile {
        push_vertex(&mut mesh, Vec3::new(p.x as f32, p.y as f32, depth), Vec3::Z);
    }
    let back_base = mesh.vertices.len() as u32;
    for p in profile {
        push_vertex(&mut mesh, Vec3::new(p.x as f32, p.y as f32, 0.0), Vec3::NEG_Z);
    }

    for t in &tris {
        mesh.indices.extend_from_slice(&[
            front_base + t[0],
            front_base + t[1],
            front_base + t[2],
        ]);
        mesh.indices.extend_from_slice(&[
            back_base + t[0],
            back_base + t[2],
            back_base + t[1],
        ]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_counts_and_volume() {
        let m = cuboid(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.vertices.len(), 24);
        assert_eq!(m.triangle_count(), 12);
        assert!((m.volume() - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_cuboid_bounds_centered() {
        let m = cuboid(Vec3::new(2.0, 4.0, 6.0));
        let (min, max) = m.bounds();
        assert!((min.x + 1.0).abs() < 1e-6);
        assert!((max.y - 2.0).abs() < 1e-6);
        assert!((max.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_cylinder_volume_approaches_analytic() {
        let m = cylinder_y(1.0, 2.0, 64);
        let analytic = std::f64::consts::PI * 2.0;
        // Inscribed polygon underestimates slightly.
        assert!(m.volume() < analytic);
        assert!(m.volume() > analytic * 0.99);
    }

    #[test]
    fn test_cylinder_min_segments() {
        let m = cylinder_y(1.0, 1.0, 1);
        assert!(m.triangle_count() >= 3 * 2 + 3 * 2 - 3); // clamped to 3 segments
        assert!(m.volume() > 0.0);
    }

    #[test]
    fn test_extrude_square_volume() {
        let profile = vec![
            DVec2::new(-1.0, -1.0),
            DVec2::new(1.0, -1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(-1.0, 1.0),
        ];
        let m = extrude_profile(&profile, 3.0);
        assert!((m.volume() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_extrude_clockwise_profile_still_positive_volume() {
        let profile = vec![
            DVec2::new(-1.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, -1.0),
            DVec2::new(-1.0, -1.0),
        ];
        let m = extrude_profile(&profile, 2.0);
        assert!((m.volume() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_extrude_concave_profile() {
        // L-shaped cross-section, area 3.
        let profile = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        let m = extrude_profile(&profile, 1.0);
        assert!((m.volume() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_extrude_too_few_points_empty() {
        assert!(extrude_profile(&[DVec2::ZERO, DVec2::X], 1.0).is_empty());
    }
}
