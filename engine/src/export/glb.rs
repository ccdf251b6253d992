//! Binary glTF (GLB) Export
//!
//! Builds a glTF 2.0 asset with one node per visible component group,
//! carrying the group's current translation, and one mesh primitive per
//! group with POSITION / NORMAL / COLOR_0 attributes and 32-bit
//! indices. Two materials cover the whole palette: an opaque
//! vertex-colored default and a blended one for translucent groups.
//!
//! The container is assembled by hand: a 12-byte header, the JSON chunk
//! padded with spaces, and the binary chunk padded with zeros, each to
//! a 4-byte boundary.

use std::path::Path;

use serde_json::json;

use crate::export::ExportError;
use crate::scene::CassetteScene;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

const COMPONENT_F32: u32 = 5126;
const COMPONENT_U32: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// A buffer view plus its accessor metadata, accumulated while packing.
struct PackedView {
    byte_offset: usize,
    byte_length: usize,
}

/// Append `data` to `bin`, returning its view placement.
fn pack(bin: &mut Vec<u8>, data: &[u8]) -> PackedView {
    // Chunk data is always 4-byte aligned here because every element
    // written is an f32 or u32.
    let byte_offset = bin.len();
    bin.extend_from_slice(data);
    PackedView {
        byte_offset,
        byte_length: data.len(),
    }
}

/// Serialize the visible scene to GLB bytes.
///
/// Returns [`ExportError::EmptyScene`] when every component is hidden.
pub fn to_glb_bytes(scene: &CassetteScene) -> Result<Vec<u8>, ExportError> {
    let mut bin: Vec<u8> = Vec::new();
    let mut buffer_views = Vec::new();
    let mut accessors = Vec::new();
    let mut meshes = Vec::new();
    let mut nodes = Vec::new();

    let materials = json!([
        {
            "name": "flat",
            "pbrMetallicRoughness": {
                "baseColorFactor": [1.0, 1.0, 1.0, 1.0],
                "metallicFactor": 0.0,
                "roughnessFactor": 0.9
            }
        },
        {
            "name": "glass",
            "pbrMetallicRoughness": {
                "baseColorFactor": [1.0, 1.0, 1.0, 1.0],
                "metallicFactor": 0.0,
                "roughnessFactor": 0.1
            },
            "alphaMode": "BLEND",
            "doubleSided": true
        }
    ]);

    for group in scene.visible_groups() {
        let mesh = group.merged_mesh();
        if mesh.is_empty() {
            continue;
        }

        let positions: Vec<u8> = mesh
            .vertices
            .iter()
            .flat_map(|v| v.position.iter().flat_map(|f| f.to_le_bytes()))
            .collect();
        let normals: Vec<u8> = mesh
            .vertices
            .iter()
            .flat_map(|v| v.normal.iter().flat_map(|f| f.to_le_bytes()))
            .collect();
        let colors: Vec<u8> = mesh
            .vertices
            .iter()
            .flat_map(|v| v.color.iter().flat_map(|f| f.to_le_bytes()))
            .collect();
        let indices: Vec<u8> = mesh
            .indices
            .iter()
            .flat_map(|i| i.to_le_bytes())
            .collect();

        let (min, max) = mesh.bounds();

        let mut add_view = |data: &[u8], target: u32| -> usize {
            let view = pack(&mut bin, data);
            buffer_views.push(json!({
                "buffer": 0,
                "byteOffset": view.byte_offset,
                "byteLength": view.byte_length,
                "target": target
            }));
            buffer_views.len() - 1
        };

        let pos_view = add_view(&positions, TARGET_ARRAY_BUFFER);
        let normal_view = add_view(&normals, TARGET_ARRAY_BUFFER);
        let color_view = add_view(&colors, TARGET_ARRAY_BUFFER);
        let index_view = add_view(&indices, TARGET_ELEMENT_ARRAY_BUFFER);

        let vertex_count = mesh.vertices.len();
        let pos_accessor = accessors.len();
        accessors.push(json!({
            "bufferView": pos_view,
            "componentType": COMPONENT_F32,
            "count": vertex_count,
            "type": "VEC3",
            "min": [min.x, min.y, min.z],
            "max": [max.x, max.y, max.z]
        }));
        let normal_accessor = accessors.len();
        accessors.push(json!({
            "bufferView": normal_view,
            "componentType": COMPONENT_F32,
            "count": vertex_count,
            "type": "VEC3"
        }));
        let color_accessor = accessors.len();
        accessors.push(json!({
            "bufferView": color_view,
            "componentType": COMPONENT_F32,
            "count": vertex_count,
            "type": "VEC4"
        }));
        let index_accessor = accessors.len();
        accessors.push(json!({
            "bufferView": index_view,
            "componentType": COMPONENT_U32,
            "count": mesh.indices.len(),
            "type": "SCALAR"
        }));

        let translucent = group.solids.iter().any(|s| s.material.is_transparent());
        let material_index = usize::from(translucent);
        let mesh_index = meshes.len();
        meshes.push(json!({
            "name": group.id.label(),
            "primitives": [{
                "attributes": {
                    "POSITION": pos_accessor,
                    "NORMAL": normal_accessor,
                    "COLOR_0": color_accessor
                },
                "indices": index_accessor,
                "material": material_index
            }]
        }));

        nodes.push(json!({
            "name": group.id.label(),
            "mesh": mesh_index,
            "translation": [group.position.x, group.position.y, group.position.z]
        }));
    }

    if nodes.is_empty() {
        return Err(ExportError::EmptyScene);
    }

    let node_indices: Vec<usize> = (0..nodes.len()).collect();
    let gltf = json!({
        "asset": {
            "version": "2.0",
            "generator": "cassette-studio"
        },
        "scene": 0,
        "scenes": [{
            "name": "Cassette Assembly",
            "nodes": node_indices
        }],
        "nodes": nodes,
        "meshes": meshes,
        "materials": materials,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{ "byteLength": bin.len() }]
    });

    let mut json_bytes = serde_json::to_vec(&gltf)?;
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total_length = 12 + 8 + json_bytes.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total_length);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total_length as u32).to_le_bytes());
    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);
    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);

    Ok(out)
}

/// Write the visible scene to a GLB file.
pub fn write_glb(scene: &CassetteScene, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let bytes = to_glb_bytes(scene)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::Dimensions;
    use crate::scene::ComponentId;

    fn json_chunk(glb: &[u8]) -> serde_json::Value {
        let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
        serde_json::from_slice(&glb[20..20 + json_len]).unwrap()
    }

    #[test]
    fn test_header_magic_and_length() {
        let scene = CassetteScene::new(&Dimensions::default());
        let glb = to_glb_bytes(&scene).unwrap();
        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes(glb[4..8].try_into().unwrap()), 2);
        assert_eq!(
            u32::from_le_bytes(glb[8..12].try_into().unwrap()) as usize,
            glb.len()
        );
        assert_eq!(glb.len() % 4, 0);
    }

    #[test]
    fn test_one_node_per_visible_component() {
        let scene = CassetteScene::new(&Dimensions::default());
        let glb = to_glb_bytes(&scene).unwrap();
        let gltf = json_chunk(&glb);
        assert_eq!(gltf["nodes"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_hidden_cap_absent_from_nodes() {
        let mut scene = CassetteScene::new(&Dimensions::default());
        scene.set_visible(ComponentId::Cap, false);
        let glb = to_glb_bytes(&scene).unwrap();
        let gltf = json_chunk(&glb);

        let names: Vec<&str> = gltf["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["name"].as_str().unwrap())
            .collect();
        assert!(!names.contains(&"Top Cap"));
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_node_translation_tracks_group_position() {
        let scene = CassetteScene::new(&Dimensions::default());
        let glb = to_glb_bytes(&scene).unwrap();
        let gltf = json_chunk(&glb);

        let cap = gltf["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|n| n["name"] == "Top Cap")
            .unwrap();
        assert!((cap["translation"][1].as_f64().unwrap() - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_glass_uses_blend_material() {
        let scene = CassetteScene::new(&Dimensions::default());
        let glb = to_glb_bytes(&scene).unwrap();
        let gltf = json_chunk(&glb);

        let glass = gltf["meshes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|m| m["name"] == "Glass Lid")
            .unwrap();
        assert_eq!(glass["primitives"][0]["material"], 1);
        assert_eq!(gltf["materials"][1]["alphaMode"], "BLEND");
    }

    #[test]
    fn test_all_hidden_is_empty_scene_error() {
        let mut scene = CassetteScene::new(&Dimensions::default());
        for id in ComponentId::ALL {
            scene.set_visible(id, false);
        }
        assert!(matches!(
            to_glb_bytes(&scene),
            Err(ExportError::EmptyScene)
        ));
    }
}
