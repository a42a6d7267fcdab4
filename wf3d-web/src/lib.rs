//! WF3D Web - draws the wireframe orbit viewer into an HTML canvas
//!
//! The scene is rasterized into an RGB pixel surface on the Rust side and copied
//! to the canvas with `putImageData` once per frame. The page drives the loop
//! from `requestAnimationFrame` and forwards mouse, wheel and key events.
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use log::debug;
use wf3d_core::surface::BYTES_PER_PIXEL;
use wf3d_core::{
    GridScene, InputEvent, MouseButton, OrbitViewer, PixelSurface, Scene, SurfaceCanvas,
    ViewerConfig,
};

/// Expand packed RGB bytes into opaque RGBA, reusing `rgba`'s allocation.
pub fn rgb_to_rgba(rgb: &[u8], rgba: &mut Vec<u8>) {
    rgba.clear();
    rgba.reserve(rgb.len() / BYTES_PER_PIXEL * 4);
    for px in rgb.chunks_exact(BYTES_PER_PIXEL) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 0xFF]);
    }
}

/// DOM `MouseEvent.button` numbering
pub fn mouse_button(button: i16) -> Option<MouseButton> {
    match button {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

/// Single-character DOM `KeyboardEvent.key` values; named keys are ignored.
pub fn key_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Browser-independent part of the viewer: scene, pixel surface and RGBA staging buffer
pub struct WebScene {
    viewer: OrbitViewer<GridScene>,
    canvas: SurfaceCanvas,
    rgba: Vec<u8>,
}

impl WebScene {
    pub fn new(config: &ViewerConfig, width: u32, height: u32) -> Self {
        Self {
            viewer: OrbitViewer::new(config, width, height, GridScene::new(config.scene.clone())),
            canvas: SurfaceCanvas::new(PixelSurface::new(width, height)),
            rgba: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.surface().width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.surface().height()
    }

    pub fn viewer(&self) -> &OrbitViewer<GridScene> {
        &self.viewer
    }

    pub fn input(&mut self, event: &InputEvent) {
        if let InputEvent::Resize { width, height } = *event {
            self.canvas = SurfaceCanvas::new(PixelSurface::new(width, height));
        }
        self.viewer.handle_input(event);
    }

    /// Advance by `dt` seconds and return the frame as RGBA rows
    pub fn frame(&mut self, dt: f32) -> &[u8] {
        self.viewer.update(dt.max(0.0));
        self.viewer.draw(&mut self.canvas);
        rgb_to_rgba(self.canvas.surface().as_bytes(), &mut self.rgba);
        &self.rgba
    }
}

#[wasm_bindgen]
pub struct WebViewer {
    scene: WebScene,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to the `<canvas>` with id `canvas_id`, optionally configured from a JSON string
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<WebViewer, JsValue> {
        let config = match config_json {
            Some(text) => ViewerConfig::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => ViewerConfig::default(),
        };

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("{canvas_id} is not a canvas")))?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        debug!("attached to canvas {canvas_id} ({}x{})", canvas.width(), canvas.height());

        Ok(WebViewer {
            scene: WebScene::new(&config, canvas.width(), canvas.height()),
            context,
        })
    }

    /// Update the camera by `dt` seconds and paint the canvas
    pub fn frame(&mut self, dt: f32) -> Result<(), JsValue> {
        let (width, height) = (self.scene.width(), self.scene.height());
        let pixels = self.scene.frame(dt);
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels), width, height)?;
        self.context.put_image_data(&image, 0.0, 0.0)
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        self.scene.input(&InputEvent::MouseMove { x, y });
    }

    pub fn mouse_down(&mut self, button: i16, x: f32, y: f32) {
        if let Some(button) = mouse_button(button) {
            self.scene.input(&InputEvent::MouseDown { button, x, y });
        }
    }

    pub fn mouse_up(&mut self, button: i16, x: f32, y: f32) {
        if let Some(button) = mouse_button(button) {
            self.scene.input(&InputEvent::MouseUp { button, x, y });
        }
    }

    /// `WheelEvent.deltaY`; negative scrolls zoom in
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.scene.input(&InputEvent::WheelUp);
        } else if delta_y > 0.0 {
            self.scene.input(&InputEvent::WheelDown);
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(c) = key_char(key) {
            self.scene.input(&InputEvent::KeyDown(c));
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(c) = key_char(key) {
            self.scene.input(&InputEvent::KeyUp(c));
        }
    }

    /// Call after changing the canvas element's `width`/`height`
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.input(&InputEvent::Resize { width, height });
    }
}
