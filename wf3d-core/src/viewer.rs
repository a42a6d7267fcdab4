//! A ready-made 3D scene: one orbit camera, one lens, one projector and a renderer.
//!
//! Mouse controls: drag with the left button to pan, hold the right button while
//! dragging to orbit, wheel to zoom. Keys: `+`/`-` zoom, `r` returns to the home view.
use crate::camera::OrbitCamera;
use crate::canvas::Canvas2D;
use crate::config::{SceneStyle, ViewerConfig};
use crate::host::{InputEvent, MouseButton, Scene};
use crate::math::{Transform, Vec3};
use crate::projection::{aspect_ratio, Lens, ProjectionMode};
use crate::projector::Projector;

/// Draws the 3D content of a viewer once the projector holds this frame's matrices
pub trait Render3D {
    fn render(&mut self, projector: &Projector, camera: &OrbitCamera, canvas: &mut dyn Canvas2D);
}

pub struct OrbitViewer<R> {
    camera: OrbitCamera,
    lens: Lens,
    projector: Projector,
    renderer: R,
    aspect: f32,
    home: (Vec3, Vec3),
}

impl<R: Render3D> OrbitViewer<R> {
    pub fn new(config: &ViewerConfig, width: u32, height: u32, renderer: R) -> Self {
        Self {
            camera: config.build_camera(),
            lens: config.lens,
            projector: Projector::new(),
            renderer,
            aspect: aspect_ratio(width, height),
            home: (config.viewer_position(), config.target()),
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn set_lens(&mut self, lens: Lens) {
        self.lens = lens;
    }

    /// Matrices used by the most recent draw
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Put the camera back at the configured viewer position and target.
    pub fn reset_view(&mut self) {
        let (viewer, target) = self.home;
        self.camera.viewer_position = viewer;
        self.camera.target = target;
        self.camera.reset();
    }
}

impl<R: Render3D> Scene for OrbitViewer<R> {
    fn update(&mut self, dt: f32) {
        self.camera.update(dt);
    }

    fn draw(&mut self, canvas: &mut dyn Canvas2D) {
        self.projector
            .set_perspective_divide(self.lens.mode == ProjectionMode::Perspective);
        self.projector.set_matrices(
            self.lens.projection_matrix(self.aspect),
            self.camera.view_matrix(),
        );
        self.renderer.render(&self.projector, &self.camera, canvas);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::MouseMove { x, y } => self.camera.set_mouse(x, y),
            InputEvent::MouseDown {
                button: MouseButton::Left,
                ..
            } => self.camera.set_drag_button(true),
            InputEvent::MouseDown {
                button: MouseButton::Right,
                ..
            } => self.camera.set_alt_key(true),
            InputEvent::MouseUp {
                button: MouseButton::Left,
                x,
                y,
            } => {
                self.camera.warp_mouse(x, y);
                self.camera.set_drag_button(false);
            }
            InputEvent::MouseUp {
                button: MouseButton::Right,
                ..
            } => self.camera.set_alt_key(false),
            InputEvent::WheelUp | InputEvent::KeyDown('+') | InputEvent::KeyDown('=') => {
                self.camera.add_wheel_ticks(1)
            }
            InputEvent::WheelDown | InputEvent::KeyDown('-') => self.camera.add_wheel_ticks(-1),
            InputEvent::KeyDown('r') => self.reset_view(),
            InputEvent::Resize { width, height } => self.resize(width, height),
            _ => {}
        }
    }
}

/// Ground grid on the XY plane, an axis frame at the origin and a cross at the camera target
#[derive(Debug, Clone, Default)]
pub struct GridScene {
    pub style: SceneStyle,
}

impl GridScene {
    pub fn new(style: SceneStyle) -> Self {
        Self { style }
    }
}

impl Render3D for GridScene {
    fn render(&mut self, projector: &Projector, camera: &OrbitCamera, canvas: &mut dyn Canvas2D) {
        let style = &self.style;
        let origin = Vec3::zeros();

        canvas.clear(style.background);
        projector.plane(
            canvas,
            &origin,
            &Vec3::x(),
            &Vec3::y(),
            style.grid_step,
            style.grid_step,
            style.grid_count,
            style.grid_count,
            style.grid_color,
        );

        if style.show_axes {
            projector.frame_3d(
                canvas,
                &origin,
                &Transform::diagonal(1.0),
                style.axis_size,
                0xFF0000,
                0x00FF00,
                0x0000FF,
            );
        }

        if style.marker_size > 0.0 {
            projector.pt_3d(canvas, &camera.target, style.marker_size, style.marker_color);
        }
    }
}
