use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors.
    pub fn perp_dot(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    /// Zero-length input produces NaN components.
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn distance_sq(self, other: Self) -> f64 {
        (self - other).length_sq()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn extend(self, z: f64) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    /// Zero-length input produces NaN components.
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn distance_sq(self, other: Self) -> f64 {
        (self - other).length_sq()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Rotates `self` about `axis` by `angle` radians (right-handed), using
    /// Rodrigues' formula. The axis does not need to be unit length.
    pub fn rotate_about(self, axis: Self, angle: f64) -> Self {
        let k = axis.normalize();
        let (sin, cos) = angle.sin_cos();
        self * cos + k.cross(self) * sin + k * (k.dot(self) * (1.0 - cos))
    }
}

macro_rules! impl_vector_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl Mul for $ty {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl Mul<f64> for $ty {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Div for $ty {
            type Output = Self;
            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl Div<f64> for $ty {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }
    };
}

impl_vector_ops!(Vec2 { x, y });
impl_vector_ops!(Vec3 { x, y, z });

/// Axis-aligned 3D bounds.
///
/// Two sentinel states exist: [`BBox3::EMPTY`] (everything zero, the
/// default) and [`BBox3::VOID`] (inverted extremes, the accumulation seed).
/// Check [`BBox3::is_void`] before treating the corners as real geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl BBox3 {
    pub const EMPTY: Self = Self::new(Vec3::ZERO, Vec3::ZERO);
    pub const VOID: Self = Self::new(
        Vec3::new(f64::MAX, f64::MAX, f64::MAX),
        Vec3::new(-f64::MAX, -f64::MAX, -f64::MAX),
    );

    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_vertices<'a>(vertices: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bbox = Self::VOID;
        for v in vertices {
            bbox.add_point(*v);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    pub fn is_void(&self) -> bool {
        *self == Self::VOID
    }

    pub fn add_point(&mut self, point: Vec3) {
        if point.x < self.min.x {
            self.min.x = point.x;
        }
        if point.x > self.max.x {
            self.max.x = point.x;
        }
        if point.y < self.min.y {
            self.min.y = point.y;
        }
        if point.y > self.max.y {
            self.max.y = point.y;
        }
        if point.z < self.min.z {
            self.min.z = point.z;
        }
        if point.z > self.max.z {
            self.max.z = point.z;
        }
    }

    /// Extends by both corners of `other`. A void `other` has no corners.
    pub fn add_box(&mut self, other: &Self) {
        if other.is_void() {
            return;
        }
        self.add_point(other.min);
        self.add_point(other.max);
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn depth(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn height(&self) -> f64 {
        self.max.z - self.min.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn to_2d(&self) -> BBox2 {
        if self.is_void() {
            return BBox2::VOID;
        }
        BBox2::new(self.min.xy(), self.max.xy())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl BBox2 {
    pub const VOID: Self = Self::new(
        Vec2::new(f64::MAX, f64::MAX),
        Vec2::new(-f64::MAX, -f64::MAX),
    );

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(x + width, y + height))
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec2>) -> Self {
        let mut bbox = Self::VOID;
        for p in points {
            bbox.include_point(*p);
        }
        bbox
    }

    pub fn is_void(&self) -> bool {
        *self == Self::VOID
    }

    pub fn include_point(&mut self, point: Vec2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn union(&self, other: &Self) -> Self {
        if self.is_void() {
            return *other;
        }
        if other.is_void() {
            return *self;
        }
        Self {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    /// Signed: a void box has a negative (non-finite) width.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn is_finite(&self) -> bool {
        self.width().is_finite() && self.height().is_finite()
    }

    /// Grows every side: the total width grows by `2 * dx`.
    pub fn inflate(&self, dx: f64, dy: f64) -> Self {
        Self {
            min: Vec2::new(self.min.x - dx, self.min.y - dy),
            max: Vec2::new(self.max.x + dx, self.max.y + dy),
        }
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Clips the segment `start..end` to `rect` (Liang-Barsky). Returns `None`
/// when no part of the segment lies inside.
pub fn clip_segment(rect: &BBox2, start: Vec2, end: Vec2) -> Option<(Vec2, Vec2)> {
    let d = end - start;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-d.x, start.x - rect.min.x),
        (d.x, rect.max.x - start.x),
        (-d.y, start.y - rect.min.y),
        (d.y, rect.max.y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((start + d * t0, start + d * t1))
}
