//! Pan/orbit camera driven by mouse deltas, wheel ticks and explicit axis input.
//!
//! The host feeds input between frames ([`OrbitCamera::set_mouse`], the two
//! button flags, wheel ticks) and calls [`OrbitCamera::update`] once per tick.
//! Each update consumes the accumulated mouse delta and wheel ticks, moves the
//! target, distance and spherical angles, and rebuilds the camera transform.
use log::{debug, trace};
use nalgebra::{Matrix4, Vector4};
use serde::{Deserialize, Serialize};

use crate::math::{decompose, rigid_inverse, up_frame, Mat4, Transform, Vec3};

/// Zoom amount contributed by one wheel tick
pub const WHEEL_STEP: f32 = 0.1;

/// Velocities and limits of the camera motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// One global multiplier for tweaking
    pub velocity_multiplier: f32,
    /// Degrees of rotation per unit of look input per second
    pub orbit_velocity: f32,
    /// Pan speed per unit of view distance
    pub pan_velocity: f32,
    /// Zoom speed per unit of view distance
    pub zoom_velocity: f32,
    pub min_pan_velocity: f32,
    pub min_zoom_velocity: f32,
    /// Closest the viewer may get to the target
    pub min_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            velocity_multiplier: 4.0,
            orbit_velocity: 2.0 * 5.25,
            pan_velocity: 0.08,
            zoom_velocity: 5.25,
            min_pan_velocity: 0.08,
            min_zoom_velocity: 0.5,
            min_distance: 0.1,
        }
    }
}

/// What mouse motion currently does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    Orbiting,
    Panning,
}

impl DragMode {
    /// Drag button held with the modifier orbits, without it pans.
    pub fn from_flags(drag_button: bool, alt: bool) -> Self {
        match (drag_button, alt) {
            (true, true) => DragMode::Orbiting,
            (true, false) => DragMode::Panning,
            (false, _) => DragMode::Idle,
        }
    }
}

/// Viewer position relative to the target, angles in degrees.
///
/// Measured in the frame [`up_frame`] builds from the camera's up vector (world
/// axes for Z-up): `elevation` from the down axis (0 below the target, 90
/// level, 180 above), `azimuth` counterclockwise from the frame's X.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalCoords {
    pub distance: f32,
    pub azimuth: f32,
    pub elevation: f32,
}

impl SphericalCoords {
    /// Angles of the viewer for a view vector `target - viewer` around `up`.
    ///
    /// A zero view vector yields zero angles.
    pub fn from_view(view: &Vec3, up: &Vec3) -> Self {
        let view = up_frame(up).transpose() * view;
        let distance = view.norm();
        if distance <= f32::EPSILON {
            return Self::default();
        }

        let elevation = (view.z / distance).clamp(-1.0, 1.0).acos().to_degrees();
        let azimuth = (-view.y).atan2(-view.x).to_degrees();
        Self {
            distance,
            azimuth,
            elevation,
        }
    }
}

/// Camera that orbits, pans and zooms around a target point
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub settings: CameraSettings,

    /// Viewer position used by [`reset`](Self::reset); refreshed by every step.
    pub viewer_position: Vec3,
    pub target: Vec3,
    /// Axis the azimuth rotates around
    pub up: Vec3,

    spherical: SphericalCoords,
    view_distance: f32,
    transform: Mat4,

    // input state, set externally between updates
    drag_button: bool,
    alt_key: bool,
    mode: DragMode,
    wheel_ticks: i32,
    zoom_in: f32,
    zoom_out: f32,
    mouse: Vec3,
    last_mouse: Vec3,
    mouse_delta: Vec3,
    pan_delta: Vec3,
    orbit_delta: Vec3,
}

impl OrbitCamera {
    /// Camera with the given settings looking from `viewer_position` at `target`.
    ///
    /// The camera is reset, so the transform is ready immediately.
    pub fn new(settings: CameraSettings, viewer_position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            settings,
            viewer_position,
            target,
            up: Vec3::z(),
            spherical: SphericalCoords::default(),
            view_distance: 0.0,
            transform: Matrix4::identity(),
            drag_button: false,
            alt_key: false,
            mode: DragMode::Idle,
            wheel_ticks: 0,
            zoom_in: 0.0,
            zoom_out: 0.0,
            mouse: Vec3::zeros(),
            last_mouse: Vec3::zeros(),
            mouse_delta: Vec3::zeros(),
            pan_delta: Vec3::zeros(),
            orbit_delta: Vec3::zeros(),
        };
        camera.reset();
        camera
    }

    /// Recompute the spherical coordinates and transform from viewer/target/up.
    ///
    /// Clears button flags, wheel ticks and accumulated mouse motion.
    pub fn reset(&mut self) {
        self.drag_button = false;
        self.alt_key = false;
        self.mode = DragMode::Idle;
        self.wheel_ticks = 0;
        self.zoom_in = 0.0;
        self.zoom_out = 0.0;
        self.mouse_delta = Vec3::zeros();

        let view = self.target - self.viewer_position;
        self.spherical = SphericalCoords::from_view(&view, &self.up);
        self.view_distance = self.spherical.distance;
        self.transform = Transform::diagonal(1.0);

        debug!(
            "camera reset: distance {:.3}, azimuth {:.2}, elevation {:.2}",
            self.view_distance, self.spherical.azimuth, self.spherical.elevation
        );

        self.make_step(0.0);
    }

    /// Record a new mouse position; motion since the previous call accumulates
    /// until the next update.
    pub fn set_mouse(&mut self, x: f32, y: f32) {
        self.last_mouse = self.mouse;
        self.mouse = Vec3::new(x, y, 0.0);
        self.mouse_delta += self.mouse - self.last_mouse;
    }

    /// Move the recorded mouse position without producing motion.
    pub fn warp_mouse(&mut self, x: f32, y: f32) {
        self.mouse = Vec3::new(x, y, 0.0);
        self.last_mouse = self.mouse;
    }

    /// State of the drag button; orbit and pan only act while it is held.
    pub fn set_drag_button(&mut self, pressed: bool) {
        self.drag_button = pressed;
    }

    /// State of the modifier that turns panning into orbiting
    pub fn set_alt_key(&mut self, pressed: bool) {
        self.alt_key = pressed;
    }

    /// Add wheel ticks; positive ticks zoom in.
    pub fn add_wheel_ticks(&mut self, ticks: i32) {
        self.wheel_ticks += ticks;
    }

    /// Continuous pan input (e.g. a joystick axis); stays applied until changed.
    pub fn set_pan_delta(&mut self, horizontal: f32, vertical: f32) {
        self.pan_delta = Vec3::new(horizontal, vertical, 0.0);
    }

    /// Continuous orbit input; stays applied until changed.
    pub fn set_orbit_delta(&mut self, horizontal: f32, vertical: f32) {
        self.orbit_delta = Vec3::new(horizontal, vertical, 0.0);
    }

    /// Advance the camera by `dt` seconds using the input gathered since the last update.
    pub fn update(&mut self, dt: f32) {
        self.zoom_in = 0.0;
        self.zoom_out = 0.0;

        self.mode = DragMode::from_flags(self.drag_button, self.alt_key);

        if self.wheel_ticks != 0 {
            let zoom = self.wheel_ticks as f32 * WHEEL_STEP;
            self.zoom_in = zoom.max(0.0);
            self.zoom_out = zoom.min(0.0);
            self.wheel_ticks = 0;
            trace!("wheel zoom {zoom:.2}");
        }

        self.make_step(dt);
    }

    fn make_step(&mut self, dt: f32) {
        let s = self.settings;

        // zoom/pan faster when we are farther away
        let pan_velocity =
            s.velocity_multiplier * s.min_pan_velocity.max(s.pan_velocity * self.view_distance);
        let zoom_velocity =
            s.velocity_multiplier * s.min_zoom_velocity.max(s.zoom_velocity * self.view_distance);

        let mut pan_horz = -self.pan_delta.x;
        let mut pan_vert = -self.pan_delta.y;
        let mut look_horz = -self.orbit_delta.x;
        let mut look_vert = -self.orbit_delta.y;

        match self.mode {
            DragMode::Orbiting => {
                look_horz -= self.mouse_delta.x;
                look_vert -= self.mouse_delta.y;
            }
            DragMode::Panning => {
                pan_horz += self.mouse_delta.x;
                pan_vert -= self.mouse_delta.y;
            }
            DragMode::Idle => {}
        }

        let horizontal = self.axis(0);
        let vertical = self.axis(1);
        self.target += horizontal * (pan_horz * pan_velocity * dt)
            + vertical * (pan_vert * pan_velocity * dt);

        let zoom = self.zoom_in + self.zoom_out;
        self.view_distance -= zoom * zoom_velocity * dt;

        let orbit_rate = s.velocity_multiplier * s.orbit_velocity * dt;
        self.spherical.elevation -= look_vert * orbit_rate;
        self.spherical.azimuth += look_horz * orbit_rate;

        // keep the viewer from slipping past the target
        if self.view_distance < s.min_distance {
            trace!(
                "view distance {:.4} clamped to {:.4}",
                self.view_distance,
                s.min_distance
            );
            self.view_distance = s.min_distance;
            self.target -= self.axis(2) * self.view_distance;
        }
        self.spherical.distance = self.view_distance;

        self.transform = Transform::orbit(
            &self.target,
            self.view_distance,
            self.spherical.azimuth,
            self.spherical.elevation,
            &self.up,
        );

        let (position, _) = decompose(&self.transform);
        self.viewer_position = position;

        self.mouse_delta = Vec3::zeros();
    }

    /// Basis column of the current transform (0 = horizontal, 1 = vertical, 2 = toward target)
    fn axis(&self, column: usize) -> Vec3 {
        self.transform.fixed_view::<3, 1>(0, column).into_owned()
    }

    /// Camera-to-world transform
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    /// World-to-eye matrix: x right, y down the screen, z toward the target.
    pub fn view_matrix(&self) -> Mat4 {
        let screen_turn = Matrix4::from_diagonal(&Vector4::new(-1.0, -1.0, 1.0, 1.0));
        screen_turn * rigid_inverse(&self.transform)
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    pub fn spherical(&self) -> SphericalCoords {
        self.spherical
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn is_orbiting(&self) -> bool {
        self.mode == DragMode::Orbiting
    }

    pub fn is_panning(&self) -> bool {
        self.mode == DragMode::Panning
    }

    pub fn wheel_ticks(&self) -> i32 {
        self.wheel_ticks
    }

    /// Mouse motion accumulated since the last update
    pub fn mouse_delta(&self) -> Vec3 {
        self.mouse_delta
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(
            CameraSettings::default(),
            Vec3::new(0.0, 6.0, -20.0),
            Vec3::new(0.0, -1.0, 0.0),
        )
    }
}
