//! 2D drawing capability used by the projector, plus the pixel-surface adapter
use serde::{Deserialize, Serialize};

use crate::surface::PixelSurface;

/// Screen coordinates are clamped to this magnitude before truncation
pub const SCREEN_LIMIT: f32 = (1 << 20) as f32;

/// World-to-screen scale and offset applied by [`Canvas2D::line_w`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenMapping {
    pub x_scale: f32,
    pub y_scale: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self {
            x_scale: 1.0,
            y_scale: 1.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

/// A 2D sink that can plot pixels and integer lines.
///
/// World coordinates are centered on the canvas with y pointing up; screen
/// coordinates have their origin at the top-left with rows growing downward.
pub trait Canvas2D {
    fn set_pixel(&mut self, x: i32, y: i32, color: u32);

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: u32);

    fn clear(&mut self, color: u32);

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn mapping(&self) -> ScreenMapping;

    /// Line between two world-space points
    fn line_w(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: u32) {
        let (sx1, sy1) = (self.x_to_screen(x1), self.y_to_screen(y1));
        let (sx2, sy2) = (self.x_to_screen(x2), self.y_to_screen(y2));
        self.line(sx1, sy1, sx2, sy2, color);
    }

    fn x_to_screen(&self, x: f32) -> i32 {
        let m = self.mapping();
        let sx = (self.width() / 2) as f32 + x * m.x_scale + m.x_offset;
        sx.clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i32
    }

    fn y_to_screen(&self, y: f32) -> i32 {
        let m = self.mapping();
        let sy = (self.height() / 2) as f32 - y * m.y_scale + m.y_offset;
        sy.clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i32
    }

    fn screen_to_x(&self, x: i32) -> f32 {
        let m = self.mapping();
        ((x - self.width() / 2) as f32 - m.x_offset) / m.x_scale
    }

    fn screen_to_y(&self, y: i32) -> f32 {
        let m = self.mapping();
        -((y - self.height() / 2) as f32 - m.y_offset) / m.y_scale
    }
}

/// [`Canvas2D`] over an owned [`PixelSurface`]; unit scale and zero offset by default.
#[derive(Debug, Clone)]
pub struct SurfaceCanvas<B = Vec<u8>> {
    surface: PixelSurface<B>,
    mapping: ScreenMapping,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SurfaceCanvas<B> {
    pub fn new(surface: PixelSurface<B>) -> Self {
        Self {
            surface,
            mapping: ScreenMapping::default(),
        }
    }

    pub fn with_mapping(mut self, mapping: ScreenMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn set_mapping(&mut self, mapping: ScreenMapping) {
        self.mapping = mapping;
    }

    pub fn surface(&self) -> &PixelSurface<B> {
        &self.surface
    }

    pub fn into_surface(self) -> PixelSurface<B> {
        self.surface
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Canvas2D for SurfaceCanvas<B> {
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        self.surface.set_pixel(x, y, color);
    }

    fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: u32) {
        self.surface.line(x1, y1, x2, y2, color);
    }

    fn clear(&mut self, color: u32) {
        self.surface.clear(color);
    }

    fn width(&self) -> i32 {
        self.surface.width() as i32
    }

    fn height(&self) -> i32 {
        self.surface.height() as i32
    }

    fn mapping(&self) -> ScreenMapping {
        self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> SurfaceCanvas {
        SurfaceCanvas::new(PixelSurface::new(width, height))
    }

    #[test]
    fn test_forwards_to_surface() {
        let mut c = canvas(10, 6);
        assert_eq!((c.width(), c.height()), (10, 6));

        c.clear(0x111111);
        c.set_pixel(2, 3, 0x00FF00);
        c.line(0, 0, 3, 0, 0xFF0000);

        let s = c.surface();
        assert_eq!(s.get_pixel(2, 3), 0x00FF00);
        assert_eq!(s.get_pixel(3, 0), 0xFF0000);
        assert_eq!(s.get_pixel(9, 5), 0x111111);
    }

    #[test]
    fn test_world_origin_is_canvas_center() {
        let c = canvas(10, 6);
        assert_eq!(c.x_to_screen(0.0), 5);
        assert_eq!(c.y_to_screen(0.0), 3);
        // y grows upward in world space
        assert_eq!(c.y_to_screen(2.0), 1);
    }

    #[test]
    fn test_scale_and_offset() {
        let c = canvas(100, 50).with_mapping(ScreenMapping {
            x_scale: 10.0,
            y_scale: 4.0,
            x_offset: 2.0,
            y_offset: -1.0,
        });
        assert_eq!(c.x_to_screen(1.5), 50 + 15 + 2);
        assert_eq!(c.y_to_screen(1.0), 25 - 4 - 1);

        assert_eq!(c.screen_to_x(c.x_to_screen(3.0)), 3.0);
        assert_eq!(c.screen_to_y(c.y_to_screen(-2.0)), -2.0);
    }

    #[test]
    fn test_line_w_uses_world_mapping() {
        let mut c = canvas(9, 9);
        c.line_w(-2.0, 0.0, 2.0, 0.0, 0xFFFFFF);
        let s = c.surface();
        for x in 2..=6 {
            assert_eq!(s.get_pixel(x, 4), 0xFFFFFF);
        }
        assert_eq!(s.get_pixel(1, 4), 0);
        assert_eq!(s.get_pixel(7, 4), 0);
    }

    #[test]
    fn test_far_world_coordinates_are_clamped() {
        let mut c = canvas(16, 16);
        assert_eq!(c.x_to_screen(1.0e10), SCREEN_LIMIT as i32);
        assert_eq!(c.y_to_screen(1.0e10), -SCREEN_LIMIT as i32);
        assert_eq!(c.x_to_screen(f32::NEG_INFINITY), -SCREEN_LIMIT as i32);

        c.line_w(-1.0e10, 0.0, 1.0e10, 0.0, 0xFFFFFF);
        let s = c.surface();
        for x in 0..16 {
            assert_eq!(s.get_pixel(x, 8), 0xFFFFFF);
        }
        assert_eq!(s.get_pixel(0, 7), 0);
    }
}
