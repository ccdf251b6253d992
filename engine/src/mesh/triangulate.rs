//! Simple Polygon Triangulation
//!
//! Ear-clipping triangulation for the closed 2D profiles the extrusion
//! builder caps with. The chip outline and channel cross-section are
//! concave, so a fan is not enough. Input is an ordered vertex loop
//! without holes; winding may be either direction (it is normalized to
//! counter-clockwise internally).

use glam::DVec2;

/// Signed area of a closed polygon (positive for counter-clockwise).
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    area / 2.0
}

/// 2D cross product of `(b - a)` and `(c - a)`.
fn cross(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether `p` lies inside (or on the edge of) triangle `a, b, c` (CCW).
fn point_in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    cross(a, b, p) >= -1e-12 && cross(b, c, p) >= -1e-12 && cross(c, a, p) >= -1e-12
}

/// Triangulate a simple polygon by ear clipping.
///
/// Returns index triples into the input slice, wound counter-clockwise
/// with respect to the input plane. Degenerate input (< 3 points,
/// collinear loops) yields an empty list; the caller surfaces whatever
/// comes back, per the no-validation policy of the boolean pipeline.
pub fn ear_clip(points: &[DVec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // Work on CCW indices; remember whether we flipped so the output
    // triples can be reported in input order.
    let ccw = signed_area(points) >= 0.0;
    let mut remaining: Vec<u32> = if ccw {
        (0..n as u32).collect()
    } else {
        (0..n as u32).rev().collect()
    };

    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let mut clipped = false;

        for i in 0..m {
            let i_prev = remaining[(i + m - 1) % m];
            let i_curr = remaining[i];
            let i_next = remaining[(i + 1) % m];

            let a = points[i_prev as usize];
            let b = points[i_curr as usize];
            let c = points[i_next as usize];

            // Reflex corner: not an ear.
            if cross(a, b, c) <= 1e-12 {
                continue;
            }

            // Any other remaining vertex inside the candidate ear?
            let mut contains_other = false;
            for &j in &remaining {
                if j == i_prev || j == i_curr || j == i_next {
                    continue;
                }
                if point_in_triangle(points[j as usize], a, b, c) {
                    contains_other = true;
                    break;
                }
            }
            if contains_other {
                continue;
            }

            triangles.push([i_prev, i_curr, i_next]);
            remaining.remove(i);
            clipped = true;
            break;
        }

        if !clipped {
            // Degenerate remainder (collinear or self-intersecting).
            // Emit nothing further rather than loop forever.
            break;
        }
    }

    if remaining.len() == 3 {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    }

    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    /// An L-shape: concave, six corners, four triangles.
    fn l_shape() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(0.0, 2.0),
        ]
    }

    fn triangulated_area(points: &[DVec2], tris: &[[u32; 3]]) -> f64 {
        tris.iter()
            .map(|t| {
                let a = points[t[0] as usize];
                let b = points[t[1] as usize];
                let c = points[t[2] as usize];
                ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs() / 2.0
            })
            .sum()
    }

    #[test]
    fn test_square_two_triangles() {
        let pts = square();
        let tris = ear_clip(&pts);
        assert_eq!(tris.len(), 2);
        assert!((triangulated_area(&pts, &tris) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_l_shape_four_triangles() {
        let pts = l_shape();
        let tris = ear_clip(&pts);
        assert_eq!(tris.len(), 4);
        assert!((triangulated_area(&pts, &tris) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_clockwise_input_same_area() {
        let mut pts = square();
        pts.reverse();
        let tris = ear_clip(&pts);
        assert_eq!(tris.len(), 2);
        assert!((triangulated_area(&pts, &tris) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_returns_empty() {
        assert!(ear_clip(&[DVec2::ZERO, DVec2::new(1.0, 0.0)]).is_empty());
    }

    #[test]
    fn test_signed_area_orientation() {
        assert!(signed_area(&square()) > 0.0);
        let mut cw = square();
        cw.reverse();
        assert!(signed_area(&cw) < 0.0);
    }
}
