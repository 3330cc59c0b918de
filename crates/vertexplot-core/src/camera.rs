//! Minimal orthographic camera: a local frame that projects world points
//! onto a view plane without perspective.

use crate::geom::Vec3;
use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::f64::consts::PI;
use tracing::trace;

/// Keyboard rotation increment, in radians.
pub const ROTATE_STEP: f64 = PI / 24.0;

const AXIS_ALIGNED_TOLERANCE: f64 = 1e-6;

/// Orthographic camera.
///
/// The frame is the caller's axes turned by a unit quaternion. Rotations
/// only touch the quaternion, which is renormalized after each turn, so
/// repeated small rotations do not drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub origin: Vec3,
    base: [Vec3; 3],
    orientation: UnitQuaternion<f64>,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self::from_view_axes(Vec3::UNIT_X, Vec3::UNIT_Y)
    }
}

impl OrthoCamera {
    /// Builds the frame from the view's X and Y axes; Z is their cross
    /// product. Both inputs are normalized.
    pub fn from_view_axes(axis_x: Vec3, axis_y: Vec3) -> Self {
        let axis_z = axis_x.cross(axis_y);
        Self::from_axes(axis_x, axis_y, axis_z)
    }

    /// Builds the frame from all three axes, normalized but otherwise kept
    /// as given. Orthogonality is up to the caller.
    pub fn from_axes(axis_x: Vec3, axis_y: Vec3, axis_z: Vec3) -> Self {
        Self {
            origin: Vec3::ZERO,
            base: [axis_x.normalize(), axis_y.normalize(), axis_z.normalize()],
            orientation: UnitQuaternion::identity(),
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn axis_x(&self) -> Vec3 {
        self.turned(self.base[0])
    }

    pub fn axis_y(&self) -> Vec3 {
        self.turned(self.base[1])
    }

    /// View direction.
    pub fn axis_z(&self) -> Vec3 {
        self.turned(self.base[2])
    }

    fn turned(&self, v: Vec3) -> Vec3 {
        from_na(self.orientation * to_na(v))
    }

    /// World point to camera space: x/y on the view plane, z is depth.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.transform_normal(point - self.origin)
    }

    /// Like [`Self::transform_point`] but without the origin offset, for
    /// directions.
    pub fn transform_normal(&self, vector: Vec3) -> Vec3 {
        Vec3::new(
            self.axis_x().dot(vector),
            self.axis_y().dot(vector),
            self.axis_z().dot(vector),
        )
    }

    /// Spins the frame about its current Y axis by `horizontal`, then about
    /// the resulting X axis by `vertical`. A positive horizontal angle turns
    /// the X axis towards the view direction. Zero angles leave the frame
    /// untouched.
    pub fn rotate(&mut self, horizontal: f64, vertical: f64) {
        if horizontal != 0.0 {
            self.turn_about(self.axis_y(), horizontal);
        }
        if vertical != 0.0 {
            self.turn_about(self.axis_x(), vertical);
        }
        if horizontal != 0.0 || vertical != 0.0 {
            trace!(horizontal, vertical, "camera rotated");
        }
    }

    fn turn_about(&mut self, axis: Vec3, angle: f64) {
        let axis = Unit::new_normalize(to_na(axis));
        self.orientation = UnitQuaternion::from_axis_angle(&axis, -angle) * self.orientation;
        self.orientation.renormalize();
    }

    /// Rotation for a mouse drag of (`dx`, `dy`) pixels: a drag across the
    /// full view width turns the camera by two half turns.
    pub fn rotate_by_drag(&mut self, dx: f64, dy: f64, view_width: f64) {
        if view_width <= 0.0 {
            return;
        }
        let per_pixel = PI / view_width * 2.0;
        self.rotate(dx * per_pixel, dy * per_pixel);
    }

    /// Whether the view direction is parallel to a world axis.
    pub fn is_axis_aligned(&self) -> bool {
        let z = self.axis_z();
        [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z]
            .iter()
            .any(|axis| z.dot(*axis).abs() + AXIS_ALIGNED_TOLERANCE >= 1.0)
    }
}

fn to_na(v: Vec3) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z)
}

fn from_na(v: Vector3<f64>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}
