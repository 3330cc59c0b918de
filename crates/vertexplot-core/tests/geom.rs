use approx::assert_abs_diff_eq;
use std::f64::consts::FRAC_PI_2;
use vertexplot_core::geom::{clip_segment, BBox2, BBox3, Vec2, Vec3};

#[test]
fn vector_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, 5.0, 6.0);
    assert_eq!(Vec3::new(5.0, 7.0, 9.0), a + b);
    assert_eq!(Vec3::new(-3.0, -3.0, -3.0), a - b);
    assert_eq!(Vec3::new(-1.0, -2.0, -3.0), -a);
    assert_eq!(Vec3::new(4.0, 10.0, 18.0), a * b);
    assert_eq!(Vec3::new(2.0, 4.0, 6.0), a * 2.0);
    assert_eq!(Vec3::new(0.5, 1.0, 1.5), a / 2.0);
    assert_eq!(32.0, a.dot(b));
    assert_eq!(Vec3::new(-3.0, 6.0, -3.0), a.cross(b));
    assert_eq!(Vec3::UNIT_Z, Vec3::UNIT_X.cross(Vec3::UNIT_Y));
    assert_eq!(27.0, a.distance_sq(b));
    assert_eq!(5.0, Vec2::new(3.0, 4.0).length());
    assert_eq!(1.0, Vec2::new(1.0, 0.0).perp_dot(Vec2::new(0.0, 1.0)));
}

#[test]
fn normalize_of_zero_is_nan() {
    let n = Vec3::ZERO.normalize();
    assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    assert_abs_diff_eq!(1.0, Vec3::new(3.0, 4.0, 12.0).normalize().length(), epsilon = 1e-12);
}

#[test]
fn rotate_about_axis_is_right_handed() {
    let r = Vec3::UNIT_X.rotate_about(Vec3::new(0.0, 0.0, 5.0), FRAC_PI_2);
    assert_abs_diff_eq!(0.0, r.x, epsilon = 1e-12);
    assert_abs_diff_eq!(1.0, r.y, epsilon = 1e-12);
    assert_abs_diff_eq!(0.0, r.z, epsilon = 1e-12);

    let p = Vec3::new(1.0, 2.0, 3.0);
    let axis = Vec3::new(1.0, 1.0, 0.0);
    let r = p.rotate_about(axis, 0.7);
    assert_abs_diff_eq!(p.length(), r.length(), epsilon = 1e-12);
    assert_abs_diff_eq!(p.dot(axis), r.dot(axis), epsilon = 1e-12);
}

#[test]
fn bounds_from_vertices() {
    let none: [Vec3; 0] = [];
    assert!(BBox3::from_vertices(&none).is_void());

    let v = Vec3::new(1.0, -2.0, 3.0);
    assert_eq!(BBox3::new(v, v), BBox3::from_vertices(&[v]));

    let bbox = BBox3::from_vertices(&[
        Vec3::new(1.0, 5.0, -1.0),
        Vec3::new(-2.0, 0.0, 4.0),
        Vec3::new(0.0, 2.0, 0.0),
    ]);
    assert_eq!(Vec3::new(-2.0, 0.0, -1.0), bbox.min);
    assert_eq!(Vec3::new(1.0, 5.0, 4.0), bbox.max);
    assert_eq!(3.0, bbox.width());
    assert_eq!(5.0, bbox.depth());
    assert_eq!(5.0, bbox.height());
}

#[test]
fn empty_and_void_states() {
    assert!(BBox3::default().is_empty());
    assert!(!BBox3::default().is_void());
    assert!(BBox3::VOID.is_void());
    assert!(BBox3::VOID.to_2d().is_void());
    assert!(!BBox2::VOID.is_finite());
}

#[test]
fn add_box_extends_and_ignores_void() {
    let mut bbox = BBox3::from_vertices(&[Vec3::ZERO]);
    bbox.add_box(&BBox3::VOID);
    assert_eq!(BBox3::new(Vec3::ZERO, Vec3::ZERO), bbox);

    bbox.add_box(&BBox3::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(2.0, 2.0, 2.0)));
    assert_eq!(Vec3::new(-1.0, -1.0, -1.0), bbox.min);
    assert_eq!(Vec3::new(2.0, 2.0, 2.0), bbox.max);

    let mut seed = BBox3::VOID;
    seed.add_box(&bbox);
    assert_eq!(bbox, seed);
}

#[test]
fn contains_is_inclusive() {
    let bbox = BBox3::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
    assert!(bbox.contains_point(Vec3::new(1.0, 0.0, 0.5)));
    assert!(!bbox.contains_point(Vec3::new(1.0001, 0.0, 0.5)));
    assert!(bbox.contains_box(&BBox3::new(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5))));
}

#[test]
fn bbox2_union_and_inflate() {
    let a = BBox2::from_xywh(0.0, 0.0, 2.0, 2.0);
    let b = BBox2::from_xywh(-1.0, 1.0, 1.0, 4.0);
    let u = a.union(&b);
    assert_eq!(Vec2::new(-1.0, 0.0), u.min);
    assert_eq!(Vec2::new(2.0, 5.0), u.max);
    assert_eq!(a, BBox2::VOID.union(&a));

    let grown = a.inflate(0.5, 1.0);
    assert_eq!(3.0, grown.width());
    assert_eq!(4.0, grown.height());
    assert_eq!(a.center(), grown.center());
}

#[test]
fn clip_segment_to_rect() {
    let rect = BBox2::from_xywh(0.0, 0.0, 10.0, 10.0);

    let (a, b) = clip_segment(&rect, Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0)).expect("crosses rect");
    assert_abs_diff_eq!(0.0, a.x, epsilon = 1e-12);
    assert_abs_diff_eq!(10.0, b.x, epsilon = 1e-12);

    let inside = clip_segment(&rect, Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
    assert_eq!(Some((Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0))), inside);

    assert!(clip_segment(&rect, Vec2::new(-5.0, -5.0), Vec2::new(-1.0, 20.0)).is_none());
    assert!(clip_segment(&rect, Vec2::new(11.0, 0.0), Vec2::new(11.0, 10.0)).is_none());
}
