//! Persisted View State
//!
//! The last camera pose (azimuth, elevation, distance, orbit focus) is
//! written to a small JSON file whenever the user finishes an
//! orbit/pan/zoom gesture, and restored on the next launch. A missing
//! or malformed file means "no saved state": the caller falls back to
//! the default camera placement and nothing is reported.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::OrbitCamera;

/// Default file name, written into the working directory.
pub const VIEW_STATE_FILE: &str = "cassette_view.json";

/// JSON-serializable camera pose record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    pub focus: [f32; 3],
}

impl ViewState {
    /// Capture the camera's goal pose (where the damping is headed).
    pub fn capture(camera: &OrbitCamera) -> Self {
        let (azimuth, elevation, distance, focus) = camera.goal_pose();
        Self {
            azimuth,
            elevation,
            distance,
            focus: focus.to_array(),
        }
    }

    /// Apply this pose to a camera, skipping the damped approach.
    pub fn apply(&self, camera: &mut OrbitCamera) {
        camera.restore(
            self.azimuth,
            self.elevation,
            self.distance,
            Vec3::from_array(self.focus),
        );
    }
}

/// Load saved view state, or `None` if absent or malformed.
pub fn load(path: &Path) -> Option<ViewState> {
    let text = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

/// Save view state. I/O errors are returned for the caller to log;
/// there is no retry.
pub fn save(path: &Path, state: &ViewState) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(state).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}
