//! Projects 3D segments and composite markers onto a [`Canvas2D`].
//!
//! Set the projection and view matrices once per frame, then issue draw calls.
//! Every call is pure given the matrices and the target canvas.
//!
//! By default the homogeneous w is ignored: `(x, y)` of `combined * (p, 1)` map
//! straight to pixels. Perspective lenses need the divide, which is opt-in
//! through [`Projector::with_perspective_divide`].
use nalgebra::Matrix4;

use crate::canvas::{Canvas2D, SCREEN_LIMIT};
use crate::math::{complementary_basis, decompose, Mat4, Vec3};

/// Smallest homogeneous w still considered in front of the eye
const MIN_W: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    projection: Mat4,
    view: Mat4,
    perspective_divide: bool,
}

impl Projector {
    pub fn new() -> Self {
        Self {
            projection: Matrix4::identity(),
            view: Matrix4::identity(),
            perspective_divide: false,
        }
    }

    /// Divide by w and skip segments that reach the eye plane
    pub fn with_perspective_divide(mut self, enabled: bool) -> Self {
        self.perspective_divide = enabled;
        self
    }

    pub fn set_perspective_divide(&mut self, enabled: bool) {
        self.perspective_divide = enabled;
    }

    pub fn perspective_divide(&self) -> bool {
        self.perspective_divide
    }

    /// Store the matrices used by every following draw call. No validation.
    pub fn set_matrices(&mut self, projection: Mat4, view: Mat4) {
        self.projection = projection;
        self.view = view;
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// View followed by projection
    pub fn combined(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Screen pixel of a world point on a `width` x `height` canvas.
    ///
    /// Always `Some` unless the perspective divide is enabled and the point lies
    /// on or behind the eye plane.
    pub fn project(&self, point: &Vec3, width: i32, height: i32) -> Option<(i32, i32)> {
        self.project_with(&self.combined(), point, width, height)
    }

    fn project_with(
        &self,
        combined: &Mat4,
        point: &Vec3,
        width: i32,
        height: i32,
    ) -> Option<(i32, i32)> {
        let clip = combined * point.push(1.0);

        let ndc = if !self.perspective_divide {
            clip.xyz()
        } else if clip.w.is_nan() || clip.w <= MIN_W {
            return None;
        } else {
            clip.xyz() / clip.w
        };

        let half_w = ((width - 1) / 2) as f32;
        let half_h = ((height - 1) / 2) as f32;
        let to_screen =
            |v: f32, half: f32| ((v + 1.0) * half).clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i32;

        Some((to_screen(ndc.x, half_w), to_screen(ndc.y, half_h)))
    }

    /// One projected segment
    pub fn line_3d(&self, canvas: &mut dyn Canvas2D, p1: &Vec3, p2: &Vec3, color: u32) {
        let combined = self.combined();
        let (w, h) = (canvas.width(), canvas.height());

        if let (Some((x1, y1)), Some((x2, y2))) = (
            self.project_with(&combined, p1, w, h),
            self.project_with(&combined, p2, w, h),
        ) {
            canvas.line(x1, y1, x2, y2, color);
        }
    }

    /// Grid of `numx + 1` lines along `v2` and `numy + 1` lines along `v1`, centered at `p`.
    ///
    /// Half extents use integer halves of `numx`/`numy`, so odd counts give a
    /// grid that reaches one cell further on the positive side.
    #[allow(clippy::too_many_arguments)]
    pub fn plane(
        &self,
        canvas: &mut dyn Canvas2D,
        p: &Vec3,
        v1: &Vec3,
        v2: &Vec3,
        step1: f32,
        step2: f32,
        numx: i32,
        numy: i32,
        color: u32,
    ) {
        let half_x = (numx / 2) as f32 * step1;
        let half_y = (numy / 2) as f32 * step2;

        for i in 0..=numx {
            let offset = p + v1 * ((i - numx / 2) as f32 * step1);
            self.line_3d(canvas, &(offset + v2 * half_y), &(offset - v2 * half_y), color);
        }

        for j in 0..=numy {
            let offset = p + v2 * ((j - numy / 2) as f32 * step2);
            self.line_3d(canvas, &(offset + v1 * half_x), &(offset - v1 * half_x), color);
        }
    }

    /// Axis-aligned 3D cross of half-length `size` centered at `pt`
    pub fn pt_3d(&self, canvas: &mut dyn Canvas2D, pt: &Vec3, size: f32, color: u32) {
        for axis in [Vec3::x(), Vec3::y(), Vec3::z()] {
            let reach = axis * size;
            self.line_3d(canvas, &(pt - reach), &(pt + reach), color);
        }
    }

    /// Shaft from `p1` to `p2` with an open four-sided arrowhead whose apex is `p1`.
    ///
    /// The head's base square sits `tip_size` along the shaft with half-diagonal
    /// `tip_size / 2`. Coincident endpoints draw no head.
    pub fn arrow_3d(
        &self,
        canvas: &mut dyn Canvas2D,
        p1: &Vec3,
        p2: &Vec3,
        tip_size: f32,
        line_color: u32,
        tip_color: u32,
    ) {
        self.line_3d(canvas, p1, p2, line_color);

        let direction = p2 - p1;
        if direction.norm_squared() <= f32::EPSILON * f32::EPSILON {
            return;
        }
        let (up, left) = complementary_basis(&direction);

        let along = p1 + direction.normalize() * tip_size;
        let up = up * (0.5 * tip_size);
        let left = left * (0.5 * tip_size);

        let corners = [along + left, along + up, along - left, along - up];

        for corner in &corners {
            self.line_3d(canvas, corner, p1, tip_color);
        }
        for (i, corner) in corners.iter().enumerate() {
            self.line_3d(canvas, corner, &corners[(i + 1) % corners.len()], tip_color);
        }
    }

    /// The three orientation axes of `transform` as arrows of length `size` from `base`.
    #[allow(clippy::too_many_arguments)]
    pub fn frame_3d(
        &self,
        canvas: &mut dyn Canvas2D,
        base: &Vec3,
        transform: &Mat4,
        size: f32,
        x_color: u32,
        y_color: u32,
        z_color: u32,
    ) {
        let (_, orientation) = decompose(transform);

        for (column, color) in [x_color, y_color, z_color].into_iter().enumerate() {
            let axis = orientation.column(column).into_owned();
            self.arrow_3d(canvas, &(base + axis * size), base, 0.2 * size, color, color);
        }
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new()
    }
}
