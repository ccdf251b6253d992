//! ASCII PLY Export
//!
//! Writes the visible subset of the scene as one vertex-colored polygon
//! mesh. The header is written by hand; colors are 8-bit RGBA sampled
//! from the vertex colors the part builders painted (which are the
//! material base colors, flat, with no lighting).

use std::io::Write;
use std::path::Path;

use crate::export::ExportError;
use crate::mesh::TriMesh;
use crate::scene::CassetteScene;

/// Collect every visible group into one world-space mesh.
fn visible_world_mesh(scene: &CassetteScene) -> TriMesh {
    let mut mesh = TriMesh::new();
    for group in scene.visible_groups() {
        mesh.merge(&group.world_mesh());
    }
    mesh
}

fn color_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Serialize the visible scene to an ASCII PLY string.
///
/// A scene with everything hidden yields a valid file with zero
/// elements.
pub fn to_ply_string(scene: &CassetteScene) -> String {
    let mesh = visible_world_mesh(scene);

    let mut out = String::new();
    out.push_str("ply\n");
    out.push_str("format ascii 1.0\n");
    out.push_str("comment Generated by cassette-studio\n");
    out.push_str(&format!("element vertex {}\n", mesh.vertices.len()));
    out.push_str("property float x\n");
    out.push_str("property float y\n");
    out.push_str("property float z\n");
    out.push_str("property float nx\n");
    out.push_str("property float ny\n");
    out.push_str("property float nz\n");
    out.push_str("property uchar red\n");
    out.push_str("property uchar green\n");
    out.push_str("property uchar blue\n");
    out.push_str("property uchar alpha\n");
    out.push_str(&format!("element face {}\n", mesh.triangle_count()));
    out.push_str("property list uchar int vertex_indices\n");
    out.push_str("end_header\n");

    for v in &mesh.vertices {
        out.push_str(&format!(
            "{} {} {} {} {} {} {} {} {} {}\n",
            v.position[0],
            v.position[1],
            v.position[2],
            v.normal[0],
            v.normal[1],
            v.normal[2],
            color_to_u8(v.color[0]),
            color_to_u8(v.color[1]),
            color_to_u8(v.color[2]),
            color_to_u8(v.color[3]),
        ));
    }

    for tri in mesh.indices.chunks(3) {
        out.push_str(&format!("3 {} {} {}\n", tri[0], tri[1], tri[2]));
    }

    out
}

/// Write the visible scene to a PLY file.
pub fn write_ply(scene: &CassetteScene, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(to_ply_string(scene).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::Dimensions;
    use crate::scene::ComponentId;

    #[test]
    fn test_header_counts_match_payload() {
        let scene = CassetteScene::new(&Dimensions::default());
        let ply = to_ply_string(&scene);

        let vertex_count: usize = ply
            .lines()
            .find_map(|l| l.strip_prefix("element vertex "))
            .unwrap()
            .parse()
            .unwrap();
        let face_count: usize = ply
            .lines()
            .find_map(|l| l.strip_prefix("element face "))
            .unwrap()
            .parse()
            .unwrap();

        let body: Vec<&str> = ply
            .lines()
            .skip_while(|l| *l != "end_header")
            .skip(1)
            .collect();
        assert_eq!(body.len(), vertex_count + face_count);
    }

    #[test]
    fn test_hidden_component_contributes_no_vertices() {
        let mut scene = CassetteScene::new(&Dimensions::default());
        let full = to_ply_string(&scene);
        scene.set_visible(ComponentId::Cap, false);
        let without_cap = to_ply_string(&scene);

        let count = |s: &str| -> usize {
            s.lines()
                .find_map(|l| l.strip_prefix("element vertex "))
                .unwrap()
                .parse()
                .unwrap()
        };
        let cap_vertices = scene.group(ComponentId::Cap).merged_mesh().vertices.len();
        assert_eq!(count(&full) - count(&without_cap), cap_vertices);
    }

    #[test]
    fn test_all_hidden_yields_empty_elements() {
        let mut scene = CassetteScene::new(&Dimensions::default());
        for id in ComponentId::ALL {
            scene.set_visible(id, false);
        }
        let ply = to_ply_string(&scene);
        assert!(ply.contains("element vertex 0\n"));
        assert!(ply.contains("element face 0\n"));
    }
}
