//! WF3D Core Library - software wireframe rendering and orbit camera control
//!
//! A pixel surface with Bresenham lines, a 2D canvas abstraction over it, a
//! projector that turns 3D segments and markers into canvas lines, and a
//! pan/orbit camera that turns mouse and wheel input into a view transform.
//! Windowing and event loops live in host crates and talk to the core through
//! [`host::Scene`].

pub mod camera;
pub mod canvas;
pub mod config;
pub mod error;
pub mod host;
pub mod math;
pub mod projection;
pub mod projector;
pub mod surface;
pub mod viewer;

// Re-export commonly used types
pub use camera::{CameraSettings, DragMode, OrbitCamera, SphericalCoords};
pub use canvas::{Canvas2D, ScreenMapping, SurfaceCanvas};
pub use config::{SceneStyle, ViewerConfig};
pub use error::{Error, Result};
pub use host::{InputEvent, MouseButton, Scene, SceneRegistry};
pub use math::{Mat3, Mat4, Transform, Vec3};
pub use projection::{Lens, ProjectionMode};
pub use projector::Projector;
pub use surface::PixelSurface;
pub use viewer::{GridScene, OrbitViewer, Render3D};
