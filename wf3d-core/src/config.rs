//! Viewer configuration, deserialized from JSON.
//!
//! Every field has a default, so a config file only needs the values it changes:
//!
//! ```json
//! { "lens": { "mode": "orthographic" }, "camera": { "velocity_multiplier": 2.0 } }
//! ```
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraSettings, OrbitCamera};
use crate::error::Result;
use crate::math::Vec3;
use crate::projection::Lens;

/// Colors and sizes of the demo scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    pub background: u32,
    pub grid_color: u32,
    /// Cell size in world units
    pub grid_step: f32,
    /// Cells along each side
    pub grid_count: i32,
    pub show_axes: bool,
    pub axis_size: f32,
    /// Half-length of the cross drawn at the camera target; 0 hides it
    pub marker_size: f32,
    pub marker_color: u32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: 0xAAAAAA,
            grid_color: 0x00AA00,
            grid_step: 2.0,
            grid_count: 10,
            show_axes: true,
            axis_size: 4.0,
            marker_size: 0.5,
            marker_color: 0xFFFF00,
        }
    }
}

/// Represents the complete configuration of one orbit viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraSettings,
    pub lens: Lens,
    pub viewer_position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub scene: SceneStyle,
    /// Host ticks per second
    pub frame_rate: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            lens: Lens::default(),
            viewer_position: [-30.0, -40.0, 25.0],
            target: [0.0, -5.0, 0.0],
            up: [0.0, 0.0, 1.0],
            scene: SceneStyle::default(),
            frame_rate: 30,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!("loaded viewer config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn viewer_position(&self) -> Vec3 {
        Vec3::from(self.viewer_position)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from(self.target)
    }

    /// Camera placed and reset according to this config
    pub fn build_camera(&self) -> OrbitCamera {
        let mut camera = OrbitCamera::new(self.camera, self.viewer_position(), self.target());
        camera.up = Vec3::from(self.up);
        camera.reset();
        camera
    }
}
