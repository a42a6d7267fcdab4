//! Vector/matrix aliases and the transform builders used by the camera and projector.
//!
//! Matrices follow nalgebra's column-vector convention: `a * b` applies `b` first.
use nalgebra::{Matrix3, Matrix4, Rotation3, Unit, Vector3, Vector4};

pub type Vec3 = Vector3<f32>;
pub type Mat3 = Matrix3<f32>;
pub type Mat4 = Matrix4<f32>;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation(offset: &Vec3) -> Mat4 {
        Matrix4::new_translation(offset)
    }

    /// Rotation of `angle` radians about `axis` (right-handed).
    ///
    /// A zero-length axis falls back to world Z.
    pub fn axis_rotation(axis: &Vec3, angle: f32) -> Mat4 {
        let axis = Unit::try_new(*axis, f32::EPSILON).unwrap_or_else(Vector3::z_axis);
        Matrix4::from_axis_angle(&axis, angle)
    }

    /// Diagonal matrix with `value` on every diagonal element
    pub fn diagonal(value: f32) -> Mat4 {
        Matrix4::from_diagonal(&Vector4::repeat(value))
    }

    /// Perspective frustum looking along +Z; the output w equals eye-space z.
    ///
    /// Maps the near plane to NDC z = -1 and the far plane to +1.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        #[rustfmt::skip]
        let m = Matrix4::new(
            2.0 * near / width, 0.0,                 -(right + left) / width,  0.0,
            0.0,                2.0 * near / height, -(top + bottom) / height, 0.0,
            0.0,                0.0,                 (far + near) / depth,     -2.0 * far * near / depth,
            0.0,                0.0,                 1.0,                      0.0,
        );
        m
    }

    /// Orthographic box looking along +Z with w fixed at 1.
    pub fn orthographic(half_width: f32, half_height: f32, near: f32, far: f32) -> Mat4 {
        let depth = far - near;

        #[rustfmt::skip]
        let m = Matrix4::new(
            1.0 / half_width, 0.0,               0.0,         0.0,
            0.0,              1.0 / half_height, 0.0,         0.0,
            0.0,              0.0,               2.0 / depth, -(far + near) / depth,
            0.0,              0.0,               0.0,         1.0,
        );
        m
    }

    /// Camera-to-world transform of an orbiting viewer.
    ///
    /// Backs off `distance` along the view axis, tilts by `elevation` about X,
    /// swings by `azimuth - 90` about Z, then turns that Z-up frame onto `up`
    /// (see [`up_frame`]) and moves to `target`. Angles in degrees.
    /// The elevation rotation must be applied before the azimuth rotation.
    pub fn orbit(target: &Vec3, distance: f32, azimuth: f32, elevation: f32, up: &Vec3) -> Mat4 {
        let back = Self::translation(&Vec3::new(0.0, 0.0, -distance));
        let tilt = Self::axis_rotation(&Vec3::x(), elevation.to_radians());
        let swing = Self::axis_rotation(&Vec3::z(), (azimuth - 90.0).to_radians());
        let frame = up_frame(up).to_homogeneous();

        Self::translation(target) * frame * swing * tilt * back
    }
}

/// Rotation taking world +Z onto `up`.
///
/// Identity for +Z and for a zero-length `up`; a half turn about X for -Z.
pub fn up_frame(up: &Vec3) -> Mat3 {
    let Some(up) = up.try_normalize(f32::EPSILON) else {
        return Mat3::identity();
    };
    Rotation3::rotation_between(&Vec3::z(), &up)
        .unwrap_or_else(|| Rotation3::from_axis_angle(&Vector3::x_axis(), std::f32::consts::PI))
        .into_inner()
}

/// Split an affine transform into its translation and its 3x3 linear part.
pub fn decompose(transform: &Mat4) -> (Vec3, Mat3) {
    let position = transform.fixed_view::<3, 1>(0, 3).into_owned();
    let orientation = transform.fixed_view::<3, 3>(0, 0).into_owned();
    (position, orientation)
}

/// Inverse of a rotation + translation transform, computed without a general inverse.
pub fn rigid_inverse(transform: &Mat4) -> Mat4 {
    let (position, orientation) = decompose(transform);
    let inverse_rotation = orientation.transpose();
    let inverse_translation = -(inverse_rotation * position);

    let mut inverse = inverse_rotation.to_homogeneous();
    inverse
        .fixed_view_mut::<3, 1>(0, 3)
        .copy_from(&inverse_translation);
    inverse
}

/// Two unit vectors orthogonal to `direction` and to each other.
///
/// Gram-Schmidt against the world axis least aligned with `direction`
/// (ties resolve X, then Y, then Z). Returns `(up, left)` with
/// `left = forward x up`. `direction` must be non-zero.
pub fn complementary_basis(direction: &Vec3) -> (Vec3, Vec3) {
    debug_assert!(direction.norm() > 0.0, "basis of a zero-length direction");

    let forward = direction.normalize();
    let (ax, ay, az) = (forward.x.abs(), forward.y.abs(), forward.z.abs());
    let reference = if ax <= ay && ax <= az {
        Vec3::x()
    } else if ay <= az {
        Vec3::y()
    } else {
        Vec3::z()
    };

    let up = (reference - forward * forward.dot(&reference)).normalize();
    let left = forward.cross(&up);
    (up, left)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < 1e-5
    }

    #[test]
    fn test_diagonal_identity() {
        assert!((Transform::diagonal(1.0) - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_decompose_returns_translation_and_rotation() {
        let rotation = Transform::axis_rotation(&Vec3::z(), std::f32::consts::FRAC_PI_2);
        let m = Transform::translation(&Vec3::new(1.0, 2.0, 3.0)) * rotation;

        let (position, orientation) = decompose(&m);
        assert!(approx(&position, &Vec3::new(1.0, 2.0, 3.0)));
        assert!(approx(&orientation.column(0).into_owned(), &Vec3::y()));
        assert!(approx(&orientation.column(1).into_owned(), &-Vec3::x()));
    }

    #[test]
    fn test_rigid_inverse() {
        let m = Transform::orbit(&Vec3::new(1.0, -2.0, 0.5), 7.0, 33.0, 71.0, &Vec3::z());
        let product = rigid_inverse(&m) * m;
        assert!((product - Matrix4::identity()).norm() < 1e-5);
    }

    #[test]
    fn test_orbit_places_viewer_behind_target() {
        let target = Vec3::new(0.0, 0.0, 1.0);
        let m = Transform::orbit(&target, 5.0, 0.0, 90.0, &Vec3::z());
        let (eye, orientation) = decompose(&m);

        // azimuth 0, elevation 90: viewer on +X, level with the target
        assert!(approx(&eye, &Vec3::new(5.0, 0.0, 1.0)));
        // third column points from the viewer to the target
        assert!(approx(&orientation.column(2).into_owned(), &-Vec3::x()));
    }

    #[test]
    fn test_up_frame() {
        assert_eq!(up_frame(&Vec3::z()), Mat3::identity());
        assert_eq!(up_frame(&Vec3::zeros()), Mat3::identity());
        for up in [Vec3::y(), -Vec3::z(), Vec3::new(1.0, -2.0, 0.5)] {
            let frame = up_frame(&up);
            assert!(approx(&(frame * Vec3::z()), &up.normalize()));
            assert!((frame.determinant() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_orbit_about_y_up() {
        // with Y up, elevation 90 keeps the viewer level with the target in Y
        let m = Transform::orbit(&Vec3::zeros(), 5.0, 30.0, 90.0, &Vec3::y());
        let (eye, _) = decompose(&m);
        assert!(eye.y.abs() < 1e-4);
        assert!((eye.norm() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_complementary_basis_is_orthonormal() {
        for direction in [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-2.0, 0.5, 0.1),
        ] {
            let forward = direction.normalize();
            let (up, left) = complementary_basis(&direction);
            assert!((up.norm() - 1.0).abs() < 1e-5);
            assert!((left.norm() - 1.0).abs() < 1e-5);
            assert!(forward.dot(&up).abs() < 1e-5);
            assert!(forward.dot(&left).abs() < 1e-5);
            assert!(up.dot(&left).abs() < 1e-5);
        }
    }

    #[test]
    fn test_complementary_basis_is_deterministic_for_axis_directions() {
        // X is least aligned with Z, so `up` is world X
        let (up, left) = complementary_basis(&Vec3::z());
        assert!(approx(&up, &Vec3::x()));
        assert!(approx(&left, &Vec3::y()));
    }

    #[test]
    fn test_orthographic_maps_depth_range() {
        let m = Transform::orthographic(2.0, 1.0, 1.0, 11.0);
        let near = m.transform_point(&nalgebra::Point3::new(2.0, 1.0, 1.0));
        let far = m.transform_point(&nalgebra::Point3::new(-2.0, -1.0, 11.0));
        assert!((near.coords - Vec3::new(1.0, 1.0, -1.0)).norm() < 1e-5);
        assert!((far.coords - Vec3::new(-1.0, -1.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_frustum_maps_near_and_far_planes() {
        let m = Transform::frustum(-1.0, 1.0, -1.0, 1.0, 2.0, 10.0);
        let corner = m * Vector4::new(1.0, 1.0, 2.0, 1.0);
        let corner = corner.xyz() / corner.w;
        assert!((corner - Vec3::new(1.0, 1.0, -1.0)).norm() < 1e-5);

        let far = m * Vector4::new(0.0, 0.0, 10.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }
}
