//! Self-Contained Viewer Export
//!
//! Wraps the GLB snapshot in a single HTML document using the
//! `<model-viewer>` web component, with the model embedded as a base64
//! data URI so the file needs no sidecar assets.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::export::{glb, ExportError};
use crate::scene::CassetteScene;

/// Build the viewer document for the visible scene.
pub fn to_html_string(scene: &CassetteScene) -> Result<String, ExportError> {
    let glb_bytes = glb::to_glb_bytes(scene)?;
    let encoded = STANDARD.encode(&glb_bytes);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Cassette Assembly</title>
<script type="module" src="https://unpkg.com/@google/model-viewer/dist/model-viewer.min.js"></script>
<style>
  html, body {{ margin: 0; height: 100%; background: #f0f2f5; }}
  model-viewer {{ width: 100%; height: 100%; }}
</style>
</head>
<body>
<model-viewer
  src="data:model/gltf-binary;base64,{encoded}"
  camera-controls
  shadow-intensity="1"
  alt="Microfluidic cassette assembly">
</model-viewer>
</body>
</html>
"#
    ))
}

/// Write the viewer document to a file.
pub fn write_html(scene: &CassetteScene, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let html = to_html_string(scene)?;
    std::fs::write(path, html)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::Dimensions;
    use crate::scene::ComponentId;

    #[test]
    fn test_document_embeds_glb_data_uri() {
        let scene = CassetteScene::new(&Dimensions::default());
        let html = to_html_string(&scene).unwrap();
        assert!(html.contains("data:model/gltf-binary;base64,"));
        assert!(html.contains("<model-viewer"));
    }

    #[test]
    fn test_embedded_payload_decodes_to_glb() {
        let scene = CassetteScene::new(&Dimensions::default());
        let html = to_html_string(&scene).unwrap();
        let start = html.find("base64,").unwrap() + "base64,".len();
        let end = start + html[start..].find('"').unwrap();
        let bytes = STANDARD.decode(&html[start..end]).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
    }

    #[test]
    fn test_all_hidden_propagates_empty_scene() {
        let mut scene = CassetteScene::new(&Dimensions::default());
        for id in ComponentId::ALL {
            scene.set_visible(id, false);
        }
        assert!(matches!(
            to_html_string(&scene),
            Err(ExportError::EmptyScene)
        ));
    }
}
