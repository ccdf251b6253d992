//! Splitting planes for the BSP tree.

use glam::DVec3;

use super::polygon::{CsgVertex, Polygon};

/// Tolerance below which a point counts as lying on a plane.
///
/// Coincident-surface input still produces artifacts; cutters are sized
/// with a clearance margin rather than relying on this epsilon.
pub const PLANE_EPSILON: f64 = 1e-5;

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

/// An oriented plane `normal . x = w`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: DVec3,
    pub w: f64,
}

impl Plane {
    /// Plane through three points, normal by right-hand winding.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Self {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        Self {
            normal,
            w: normal.dot(a),
        }
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Split `polygon` by this plane, routing the pieces into the four
    /// output lists. Coplanar polygons go front or back by normal
    /// agreement; spanning polygons are cut along the intersection line
    /// with interpolated vertices.
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
        coplanar_front: &mut Vec<Polygon>,
        coplanar_back: &mut Vec<Polygon>,
        front: &mut Vec<Polygon>,
        back: &mut Vec<Polygon>,
    ) {
        let mut polygon_type = COPLANAR;
        let mut types = Vec::with_capacity(polygon.vertices.len());

        for v in &polygon.vertices {
            let t = self.normal.dot(v.pos) - self.w;
            let vertex_type = if t < -PLANE_EPSILON {
                BACK
            } else if t > PLANE_EPSILON {
                FRONT
            } else {
                COPLANAR
            };
            polygon_type |= vertex_type;
            types.push(vertex_type);
        }

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let mut f: Vec<CsgVertex> = Vec::new();
                let mut b: Vec<CsgVertex> = Vec::new();

                let n = polygon.vertices.len();
                for i in 0..n {
                    let j = (i + 1) % n;
                    let ti = types[i];
                    let tj = types[j];
                    let vi = polygon.vertices[i];
                    let vj = polygon.vertices[j];

                    if ti != BACK {
                        f.push(vi);
                    }
                    if ti != FRONT {
                        b.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        let t = (self.w - self.normal.dot(vi.pos))
                            / self.normal.dot(vj.pos - vi.pos);
                        let v = vi.interpolate(&vj, t);
                        f.push(v);
                        b.push(v);
                    }
                }

                if f.len() >= 3 {
                    front.push(Polygon::with_plane(f, polygon.plane, polygon.color));
                }
                if b.len() >= 3 {
                    back.push(Polygon::with_plane(b, polygon.plane, polygon.color));
                }
            }
        }
    }
}
