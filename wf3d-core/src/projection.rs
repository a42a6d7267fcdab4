//! Lens settings that produce the projection matrix handed to the projector
use serde::{Deserialize, Serialize};

use crate::math::{Mat4, Transform};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

/// Lens configuration for 3D rendering.
///
/// Works in the eye space produced by [`crate::OrbitCamera::view_matrix`]:
/// x right, y down the screen, z toward the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lens {
    pub mode: ProjectionMode,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Half of the visible height in world units (orthographic only)
    pub ortho_half_height: f32,
}

impl Lens {
    pub fn perspective(fov: f32, near: f32, far: f32) -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            fov,
            near,
            far,
            ..Self::default()
        }
    }

    pub fn orthographic(half_height: f32, near: f32, far: f32) -> Self {
        Self {
            mode: ProjectionMode::Orthographic,
            near,
            far,
            ortho_half_height: half_height,
            ..Self::default()
        }
    }

    /// Create the projection matrix for a viewport of the given aspect ratio (width / height)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.mode {
            ProjectionMode::Perspective => {
                let top = self.near * (self.fov.to_radians() / 2.0).tan();
                let right = top * aspect;
                Transform::frustum(-right, right, -top, top, self.near, self.far)
            }
            ProjectionMode::Orthographic => Transform::orthographic(
                self.ortho_half_height * aspect,
                self.ortho_half_height,
                self.near,
                self.far,
            ),
        }
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            fov: 45.0,
            near: 1.0,
            far: 1000.0,
            ortho_half_height: 20.0,
        }
    }
}

/// Width / height of a viewport, guarding against an empty one.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        return 1.0;
    }
    width as f32 / height as f32
}
