use vertexplot_core::geom::Vec3;
use vertexplot_core::model::VertexSet;
use vertexplot_core::notation::write_sets;
use vertexplot_core::parser::parse;

#[test]
fn closed_2d_polyline_notation() {
    let set = VertexSet::polyline(
        vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.5, -2.0, 0.0)],
        true,
    );
    assert_eq!("{\n   0, 0\n   1.5, -2\n}\n", set.to_notation());
}

#[test]
fn open_3d_polyline_notation() {
    let set = VertexSet::polyline(vec![Vec3::new(1.0, 2.0, 3.0)], false);
    assert_eq!("[\n   1, 2, 3\n]\n", set.to_notation());
}

#[test]
fn loose_points_have_no_braces() {
    let mut set = VertexSet::new();
    set.add_vertex(&[4.0, 5.0]);
    assert_eq!("   4, 5\n", set.to_notation());
}

#[test]
fn parsed_sets_survive_a_rewrite() {
    let text = "{0,0\n1,0\n1,1}\n[0.25, -3.0e-2\n7, 8, 9]\n";
    let first = parse(text);
    assert!(first.errors.is_empty());

    let rewritten = write_sets(&first.sets);
    let second = parse(&rewritten);
    assert!(second.errors.is_empty());
    assert_eq!(first.sets, second.sets);
}
