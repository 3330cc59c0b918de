use vertexplot_core::camera::OrthoCamera;
use vertexplot_core::geom::{BBox2, Vec2, Vec3};
use vertexplot_core::model::{Face, PlotData, Segment, SetId, VertexRef, VertexSet};
use vertexplot_core::GeometryError;

fn points(coords: &[(f64, f64)]) -> Vec<Vec3> {
    coords.iter().map(|&(x, y)| Vec3::new(x, y, 0.0)).collect()
}

fn plot_with_default_points(n: usize) -> PlotData {
    let mut plot = PlotData::new();
    for i in 0..n {
        plot.add_point(Vec3::new(i as f64, 0.0, 0.0));
    }
    plot
}

#[test]
fn add_vertex_fills_missing_components() {
    let mut set = VertexSet::new();
    set.add_vertex(&[1.0, 2.0]);
    set.add_vertex(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        vec![Vec3::new(1.0, 2.0, 0.0), Vec3::new(1.0, 2.0, 3.0)],
        set.vertices
    );
    assert!(!set.is_2d);
}

#[test]
fn auto_set_2d_follows_z_values() {
    let mut set = VertexSet::new();
    set.vertices = vec![Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO];
    set.auto_set_2d();
    assert!(!set.is_2d);

    set.vertices[0].z = 0.0;
    set.auto_set_2d();
    assert!(set.is_2d);
}

#[test]
fn face_and_line_indices_are_checked() {
    let mut set = VertexSet::polyline(points(&[(0.0, 0.0), (1.0, 0.0)]), false);
    assert_eq!(
        Err(GeometryError::IndexOutOfRange { index: 2, len: 2 }),
        set.add_face(Face::new(vec![0usize, 1, 2]))
    );
    assert!(set.faces().is_empty());
    assert!(set.add_line(Segment { start: 0, end: 5 }).is_err());
    assert!(set.lines().is_empty());
}

#[test]
fn polyline_segments() {
    let triangle = points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);

    let closed = VertexSet::polyline(triangle.clone(), true);
    let segs = closed.line_segments().expect("valid set");
    assert_eq!(3, segs.len());
    assert_eq!((triangle[2], triangle[0]), segs[2]);

    let open = VertexSet::polyline(triangle, false);
    assert_eq!(2, open.line_segments().expect("valid set").len());

    let mut scattered = VertexSet::new();
    scattered.push_vertex(Vec3::ZERO);
    scattered.push_vertex(Vec3::UNIT_X);
    assert!(scattered.line_segments().expect("valid set").is_empty());
}

#[test]
fn faces_replace_the_implicit_polyline() {
    let mut set = VertexSet::polyline(
        points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
        true,
    );
    set.add_face(Face::new(vec![0usize, 1, 2])).expect("in range");
    set.add_line(Segment { start: 0, end: 3 }).expect("in range");

    let segs = set.line_segments().expect("valid set");
    assert_eq!(4, segs.len());
    assert_eq!((set.vertices[0], set.vertices[3]), segs[3]);
}

#[test]
fn removing_a_vertex_leaves_faces_dangling() {
    let mut set = VertexSet::polyline(points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]), true);
    set.add_face(Face::new(vec![0usize, 1, 2])).expect("in range");
    assert_eq!(Some(Vec3::new(1.0, 1.0, 0.0)), set.remove_vertex(2));
    assert_eq!(None, set.remove_vertex(7));

    assert_eq!(
        Err(GeometryError::IndexOutOfRange { index: 2, len: 2 }),
        set.line_segments()
    );
}

#[test]
fn add_line_index_requires_an_existing_vertex() {
    let mut plot = PlotData::new();
    assert_eq!(
        Err(GeometryError::IndexOutOfRange { index: 0, len: 0 }),
        plot.add_line_index(0)
    );
}

#[test]
fn plot_segments_include_default_face_then_sets() {
    let mut plot = plot_with_default_points(3);
    for i in 0..3 {
        plot.add_line_index(i).expect("in range");
    }
    plot.add_set(VertexSet::polyline(points(&[(5.0, 5.0), (6.0, 6.0)]), false));

    let segs = plot.line_segments().expect("valid plot");
    assert_eq!(4, segs.len());
    assert_eq!((Vec3::new(5.0, 5.0, 0.0), Vec3::new(6.0, 6.0, 0.0)), segs[3]);
}

#[test]
fn selection_is_invalidated_lazily() {
    let mut plot = plot_with_default_points(3);
    plot.select(Some(SetId::Default), Some(2));
    assert_eq!(Some(2), plot.selected_index());

    plot.default_set_mut().remove_vertex(0);
    assert_eq!(None, plot.selected_index());
    assert_eq!(None, plot.selected_vertex());
    assert_eq!(Some(SetId::Default), plot.selected_set());
}

#[test]
fn stale_selection_stays_cleared_when_the_set_grows() {
    let mut plot = plot_with_default_points(3);
    plot.select(Some(SetId::Default), Some(2));

    plot.default_set_mut().remove_vertex(2);
    assert_eq!(None, plot.selected_index());
    plot.add_point(Vec3::new(9.0, 9.0, 0.0));
    assert_eq!(None, plot.selected_index());

    // Removing and re-adding through separate borrows clears it too.
    plot.select(Some(SetId::Default), Some(2));
    plot.default_set_mut().remove_vertex(2);
    plot.default_set_mut().push_vertex(Vec3::ZERO);
    assert_eq!(None, plot.selected_index());
}

#[test]
fn advance_wraps_in_both_directions() {
    let mut plot = plot_with_default_points(3);
    plot.select(None, None);

    plot.advance_selected_point(1);
    assert_eq!(Some(SetId::Default), plot.selected_set());
    assert_eq!(Some(0), plot.selected_index());

    plot.advance_selected_point(-1);
    assert_eq!(Some(2), plot.selected_index());

    plot.advance_selected_point(1);
    assert_eq!(Some(0), plot.selected_index());

    let mut empty = PlotData::new();
    empty.advance_selected_point(1);
    assert_eq!(None, empty.selected_index());
}

#[test]
fn delete_selected_point_moves_to_previous() {
    let mut plot = plot_with_default_points(3);
    plot.select(Some(SetId::Default), Some(1));
    assert_eq!(Some(Vec3::new(1.0, 0.0, 0.0)), plot.delete_selected_point());
    assert_eq!(2, plot.default_set().len());
    assert_eq!(Some(0), plot.selected_index());

    // Deleting the first vertex wraps the selection to the last.
    assert_eq!(Some(Vec3::ZERO), plot.delete_selected_point());
    assert_eq!(Some(0), plot.selected_index());
    assert_eq!(vec![Vec3::new(2.0, 0.0, 0.0)], plot.default_set().vertices);

    plot.select(Some(SetId::Default), None);
    assert_eq!(None, plot.delete_selected_point());
}

#[test]
fn removing_sets_fixes_up_the_selection() {
    let mut plot = PlotData::new();
    for _ in 0..3 {
        plot.add_set(VertexSet::polyline(points(&[(0.0, 0.0), (1.0, 1.0)]), false));
    }

    plot.select(Some(SetId::Extra(2)), Some(1));
    plot.remove_set(0).expect("set exists");
    assert_eq!(Some(SetId::Extra(1)), plot.selected_set());
    assert_eq!(Some(1), plot.selected_index());

    plot.remove_set(1).expect("set exists");
    assert_eq!(None, plot.selected_set());
    assert_eq!(None, plot.selected_index());

    assert_eq!(
        Err(GeometryError::NoSuchSet(SetId::Extra(5))),
        plot.remove_set(5).map(|_| ())
    );
}

#[test]
fn replace_sets_and_clear_all() {
    let mut plot = plot_with_default_points(2);
    plot.add_line_index(1).expect("in range");
    plot.select(Some(SetId::Default), Some(1));

    plot.replace_sets(vec![VertexSet::polyline(points(&[(1.0, 1.0)]), false)]);
    assert!(plot.default_set().is_empty());
    assert!(plot.default_face().indices.is_empty());
    assert_eq!(1, plot.sets().len());
    assert_eq!(Some(SetId::Default), plot.selected_set());
    assert_eq!(None, plot.selected_index());

    plot.clear_all();
    assert!(plot.sets().is_empty());
    assert_eq!(None, plot.selected_set());
}

#[test]
fn bounds_union_every_set() {
    assert!(PlotData::new().bounds_2d().is_void());

    let mut plot = PlotData::new();
    plot.add_point(Vec3::new(0.0, 0.0, 1.0));
    plot.add_set(VertexSet::polyline(points(&[(5.0, -2.0)]), false));

    assert_eq!(
        BBox2::new(Vec2::new(0.0, -2.0), Vec2::new(5.0, 0.0)),
        plot.bounds_2d()
    );
    let b3 = plot.bounds_3d();
    assert_eq!(Vec3::new(0.0, -2.0, 0.0), b3.min);
    assert_eq!(Vec3::new(5.0, 0.0, 1.0), b3.max);
}

#[test]
fn hit_test_picks_the_nearest_vertex_within_radius() {
    let mut plot = PlotData::new();
    plot.add_point(Vec3::ZERO);
    plot.add_set(VertexSet::polyline(points(&[(3.0, 0.0), (1.0, 0.0)]), false));

    assert_eq!(
        Some(VertexRef {
            set: SetId::Extra(0),
            index: 1
        }),
        plot.hit_test(Vec2::new(0.8, 0.0), 2.0)
    );
    assert_eq!(
        Some(VertexRef {
            set: SetId::Default,
            index: 0
        }),
        plot.hit_test(Vec2::new(0.1, 0.0), 2.0)
    );
    assert_eq!(None, plot.hit_test(Vec2::new(0.5, 0.5), 0.1));
}

#[test]
fn select_nearest_miss_keeps_the_set() {
    let mut plot = PlotData::new();
    plot.add_set(VertexSet::polyline(points(&[(3.0, 0.0)]), false));
    plot.select(Some(SetId::Extra(0)), Some(0));

    assert_eq!(None, plot.select_nearest(Vec2::new(100.0, 100.0), 1.0));
    assert_eq!(Some(SetId::Extra(0)), plot.selected_set());
    assert_eq!(None, plot.selected_index());

    assert!(plot.select_nearest(Vec2::new(3.0, 0.5), 1.0).is_some());
    assert_eq!(Some(0), plot.selected_index());
}

#[test]
fn projection_does_not_mutate_the_plot() {
    let mut plot = PlotData::new();
    plot.add_point(Vec3::UNIT_X);

    let mut camera = OrthoCamera::default();
    camera.rotate(std::f64::consts::FRAC_PI_2, 0.0);
    let projected = plot.projected(&camera);

    let v = projected.default_set().vertices[0];
    assert!(v.x.abs() < 1e-12);
    assert!(v.y.abs() < 1e-12);
    assert!((v.z + 1.0).abs() < 1e-12);
    assert_eq!(Vec3::UNIT_X, plot.default_set().vertices[0]);
}
