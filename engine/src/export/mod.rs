//! Scene Export
//!
//! Snapshots of the currently visible component groups:
//!
//! - [`ply`] - ASCII PLY polygon mesh with flat per-vertex colors
//! - [`glb`] - binary glTF 2.0 scene-interchange container
//! - [`html`] - self-contained viewer page embedding the GLB
//!
//! Hidden components contribute nothing to any format. Colors are
//! sampled from each solid's material base color; no lighting is baked
//! in. Failures surface through [`ExportError`]; there is no retry.

pub mod glb;
pub mod html;
pub mod ply;

/// Errors that can occur while exporting the scene.
#[derive(Debug)]
pub enum ExportError {
    /// Every component is hidden; there is nothing to export.
    EmptyScene,
    /// Standard I/O error while writing the output file.
    Io(std::io::Error),
    /// JSON serialization error while building the glTF chunk.
    Json(serde_json::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::EmptyScene => write!(f, "nothing visible to export"),
            ExportError::Io(e) => write!(f, "IO error: {e}"),
            ExportError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e)
    }
}
