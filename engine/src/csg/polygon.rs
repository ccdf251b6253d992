//! Convex polygons carried through the BSP tree.

use glam::DVec3;

use super::plane::Plane;

/// A polygon vertex: position plus shading normal.
///
/// Shading normals are interpolated when an edge is split so curved
/// surfaces (cylinder walls) keep smooth shading through booleans.
#[derive(Debug, Clone, Copy)]
pub struct CsgVertex {
    pub pos: DVec3,
    pub normal: DVec3,
}

impl CsgVertex {
    pub fn interpolate(&self, other: &CsgVertex, t: f64) -> CsgVertex {
        CsgVertex {
            pos: self.pos.lerp(other.pos, t),
            normal: self.normal.lerp(other.normal, t).normalize_or_zero(),
        }
    }

    fn flip(&mut self) {
        self.normal = -self.normal;
    }
}

/// A convex polygon with its supporting plane and a flat color.
///
/// Input triangles are convex and plane splits of convex polygons stay
/// convex, so fan triangulation is always valid on the way back out.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<CsgVertex>,
    pub plane: Plane,
    pub color: [f32; 4],
}

impl Polygon {
    /// Build from vertices, deriving the plane from the first three.
    pub fn new(vertices: Vec<CsgVertex>, color: [f32; 4]) -> Self {
        let plane = Plane::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        Self {
            vertices,
            plane,
            color,
        }
    }

    /// Build with an explicit plane (used when splitting, where the
    /// parent plane is still exact but a recomputed one might not be).
    pub fn with_plane(vertices: Vec<CsgVertex>, plane: Plane, color: [f32; 4]) -> Self {
        Self {
            vertices,
            plane,
            color,
        }
    }

    /// Convenience constructor with face-normal shading.
    pub fn from_positions(positions: &[DVec3], color: [f32; 4]) -> Self {
        let plane = Plane::from_points(positions[0], positions[1], positions[2]);
        let vertices = positions
            .iter()
            .map(|&pos| CsgVertex {
                pos,
                normal: plane.normal,
            })
            .collect();
        Self {
            vertices,
            plane,
            color,
        }
    }

    /// Reverse orientation: vertex order, shading normals and plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_midpoint() {
        let a = CsgVertex {
            pos: DVec3::ZERO,
            normal: DVec3::X,
        };
        let b = CsgVertex {
            pos: DVec3::new(2.0, 0.0, 0.0),
            normal: DVec3::X,
        };
        let m = a.interpolate(&b, 0.5);
        assert!((m.pos.x - 1.0).abs() < 1e-12);
        assert!((m.normal - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_flip_reverses_plane() {
        let mut p = Polygon::from_positions(
            &[
                DVec3::ZERO,
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            [1.0; 4],
        );
        let n = p.plane.normal;
        p.flip();
        assert!((p.plane.normal + n).length() < 1e-12);
    }
}
