//! Boolean Solid Evaluator
//!
//! BSP-tree constructive solid geometry over triangle meshes: build a
//! BSP per operand, clip each against the other, and collect the
//! surviving polygons. Union and subtract are all the part builders
//! need; both assume closed, consistently wound input.
//!
//! Interior math runs in f64; meshes convert at the boundary. Polygons
//! stay convex through every split, so the result triangulates by
//! fanning.
//!
//! No validation is performed: open, self-intersecting or degenerate
//! input produces an empty or non-manifold result, and the caller
//! surfaces whatever comes back. Cutters tangent to the surface they cut
//! are the classic failure mode; every cutter in [`crate::parts`] is
//! oversized by a small clearance instead of relying on the epsilon.
//! Operation order is fixed by the callers and is not commutative for
//! tangent or degenerate cases.

mod node;
mod plane;
mod polygon;

use glam::{DVec3, Vec3};

pub use plane::{Plane, PLANE_EPSILON};
pub use polygon::{CsgVertex, Polygon};

use crate::mesh::{MeshVertex, TriMesh};
use node::Node;

/// Convert a triangle mesh into BSP polygons.
fn mesh_to_polygons(mesh: &TriMesh) -> Vec<Polygon> {
    let mut polygons = Vec::with_capacity(mesh.triangle_count());
    for tri in mesh.indices.chunks(3) {
        let verts: Vec<CsgVertex> = tri
            .iter()
            .map(|&i| {
                let v = &mesh.vertices[i as usize];
                CsgVertex {
                    pos: DVec3::new(
                        v.position[0] as f64,
                        v.position[1] as f64,
                        v.position[2] as f64,
                    ),
                    normal: DVec3::new(
                        v.normal[0] as f64,
                        v.normal[1] as f64,
                        v.normal[2] as f64,
                    ),
                }
            })
            .collect();

        // Skip slivers that collapse below the plane epsilon; they
        // contribute nothing and seed useless splitting planes.
        let ab = verts[1].pos - verts[0].pos;
        let ac = verts[2].pos - verts[0].pos;
        if ab.cross(ac).length() < PLANE_EPSILON * PLANE_EPSILON {
            continue;
        }

        let color = mesh.vertices[tri[0] as usize].color;
        polygons.push(Polygon::new(verts, color));
    }
    polygons
}

/// Convert BSP polygons back into a triangle mesh (fan triangulation).
fn polygons_to_mesh(polygons: &[Polygon]) -> TriMesh {
    let mut mesh = TriMesh::new();
    for polygon in polygons {
        let base = mesh.vertices.len() as u32;
        for v in &polygon.vertices {
            mesh.vertices.push(MeshVertex {
                position: Vec3::new(v.pos.x as f32, v.pos.y as f32, v.pos.z as f32)
                    .to_array(),
                normal: Vec3::new(
                    v.normal.x as f32,
                    v.normal.y as f32,
                    v.normal.z as f32,
                )
                .to_array(),
                color: polygon.color,
            });
        }
        for i in 1..polygon.vertices.len() as u32 - 1 {
            mesh.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }
    mesh
}

/// Boolean union `a + b`.
pub fn union(a: &TriMesh, b: &TriMesh) -> TriMesh {
    let mut a = Node::new(mesh_to_polygons(a));
    let mut b = Node::new(mesh_to_polygons(b));

    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());

    polygons_to_mesh(&a.all_polygons())
}

/// Boolean difference `a - b`.
pub fn subtract(a: &TriMesh, b: &TriMesh) -> TriMesh {
    let mut a = Node::new(mesh_to_polygons(a));
    let mut b = Node::new(mesh_to_polygons(b));

    a.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.all_polygons());
    a.invert();

    polygons_to_mesh(&a.all_polygons())
}
