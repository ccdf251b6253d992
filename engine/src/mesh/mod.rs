//! Triangle Mesh Core
//!
//! CPU-side triangle meshes with per-vertex position, normal and flat
//! color. Everything the primitive builders and the boolean evaluator
//! produce flows through [`TriMesh`]; the viewer uploads it to GPU
//! buffers unchanged and the exporters serialize it unchanged.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

pub mod triangulate;

pub use triangulate::ear_clip;

/// Vertex for mesh rendering and export (position, normal, color).
///
/// Layout matches the WGSL vertex input: 3 + 3 + 4 floats, 40 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 40]);

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append another mesh, rebasing its indices.
    pub fn merge(&mut self, other: &TriMesh) {
        let base_idx = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base_idx));
    }

    /// Apply an affine transform to positions and (rotation-only) to
    /// normals. Assumes the linear part is a rotation, which is all the
    /// part builders ever apply; normals are re-normalized anyway.
    pub fn transform(&mut self, mat: Mat4) {
        for v in &mut self.vertices {
            let p = mat.transform_point3(Vec3::from_array(v.position));
            let n = mat.transform_vector3(Vec3::from_array(v.normal));
            v.position = p.to_array();
            v.normal = n.normalize_or_zero().to_array();
        }
    }

    /// Translate all vertices.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v.position[2] += offset.z;
        }
    }

    /// Paint every vertex with a single flat color.
    pub fn set_color(&mut self, color: [f32; 4]) {
        for v in &mut self.vertices {
            v.color = color;
        }
    }

    /// Axis-aligned bounding box as `(min, max)`.
    ///
    /// Returns zeros for an empty mesh.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        if self.vertices.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            let p = Vec3::from_array(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Recompute smooth, area-weighted vertex normals from the faces.
    ///
    /// Used after boolean operations, which leave per-polygon normals
    /// that can disagree at shared vertices.
    pub fn recompute_normals(&mut self) {
        for v in &mut self.vertices {
            v.normal = [0.0, 0.0, 0.0];
        }

        for tri in self.indices.chunks(3) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;

            let p0 = Vec3::from_array(self.vertices[i0].position);
            let p1 = Vec3::from_array(self.vertices[i1].position);
            let p2 = Vec3::from_array(self.vertices[i2].position);

            // Cross product magnitude is proportional to triangle area,
            // giving area-weighted averaging.
            let face_normal = (p1 - p0).cross(p2 - p0);

            for &idx in &[i0, i1, i2] {
                self.vertices[idx].normal[0] += face_normal.x;
                self.vertices[idx].normal[1] += face_normal.y;
                self.vertices[idx].normal[2] += face_normal.z;
            }
        }

        for v in &mut self.vertices {
            let n = Vec3::from_array(v.normal);
            let len = n.length();
            v.normal = if len > 1e-8 {
                (n / len).to_array()
            } else {
                [0.0, 1.0, 0.0]
            };
        }
    }

    /// Signed volume of a closed mesh (divergence theorem).
    pub fn volume(&self) -> f64 {
        let mut vol = 0.0;
        for tri in self.indices.chunks(3) {
            let v0 = self.vertices[tri[0] as usize].position;
            let v1 = self.vertices[tri[1] as usize].position;
            let v2 = self.vertices[tri[2] as usize].position;
            let (x0, y0, z0) = (v0[0] as f64, v0[1] as f64, v0[2] as f64);
            let (x1, y1, z1) = (v1[0] as f64, v1[1] as f64, v1[2] as f64);
            let (x2, y2, z2) = (v2[0] as f64, v2[1] as f64, v2[2] as f64);
            vol += x0 * (y1 * z2 - y2 * z1) - x1 * (y0 * z2 - y2 * z0)
                + x2 * (y0 * z1 - y1 * z0);
        }
        vol / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriMesh {
        TriMesh {
            vertices: vec![
                MeshVertex {
                    position: [0.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    color: [1.0; 4],
                },
                MeshVertex {
                    position: [1.0, 0.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    color: [1.0; 4],
                },
                MeshVertex {
                    position: [1.0, 1.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    color: [1.0; 4],
                },
                MeshVertex {
                    position: [0.0, 1.0, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    color: [1.0; 4],
                },
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn test_merge_rebases_indices() {
        let mut a = quad();
        let b = quad();
        a.merge(&b);
        assert_eq!(a.vertices.len(), 8);
        assert_eq!(a.indices.len(), 12);
        assert_eq!(a.indices[6], 4);
    }

    #[test]
    fn test_translate_moves_bounds() {
        let mut m = quad();
        m.translate(Vec3::new(2.0, 3.0, 4.0));
        let (min, max) = m.bounds();
        assert!((min.x - 2.0).abs() < 1e-6);
        assert!((max.y - 4.0).abs() < 1e-6);
        assert!((min.z - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_rotation_keeps_unit_normals() {
        let mut m = quad();
        m.transform(Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2));
        for v in &m.vertices {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_set_color() {
        let mut m = quad();
        m.set_color([0.2, 0.4, 0.6, 1.0]);
        assert_eq!(m.vertices[3].color, [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn test_recompute_normals_flat_quad() {
        let mut m = quad();
        m.recompute_normals();
        for v in &m.vertices {
            assert!((v.normal[2] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_empty_bounds() {
        let m = TriMesh::new();
        assert_eq!(m.bounds(), (Vec3::ZERO, Vec3::ZERO));
    }
}
