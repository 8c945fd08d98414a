use crate::mesh::{ConstrainedTriangulator, TriangulationError, Triangulator};

use approx::assert_relative_eq;
use geo::{Area, Coord, MultiPolygon, Polygon, coord, polygon};

fn square(x: f64, y: f64, size: f64) -> Polygon {
    polygon![
        (x: x, y: y),
        (x: x + size, y: y),
        (x: x + size, y: y + size),
        (x: x, y: y + size),
        (x: x, y: y),
    ]
}

#[test]
fn triangulates_square() -> Result<(), TriangulationError> {
    let region = MultiPolygon::new(vec![square(0.0, 0.0, 100.0)]);
    let mesh = ConstrainedTriangulator::default().triangulate(&region, &[], 200.0)?;

    assert_relative_eq!(mesh.area(), 10_000.0, epsilon = 1e-6);
    assert!(mesh.triangles.len() >= 50, "refinement bounds the area");
    assert!(mesh.segments.len() >= 4);

    Ok(())
}

#[test]
fn forced_points_survive() -> Result<(), TriangulationError> {
    let region = MultiPolygon::new(vec![square(0.0, 0.0, 100.0)]);
    let forced: Vec<Coord> = vec![coord! { x: 10.0, y: 50.0 }, coord! { x: 90.0, y: 50.0 }];

    let mesh = ConstrainedTriangulator::default().triangulate(&region, &forced, 400.0)?;

    assert_eq!(mesh.forced.len(), 2);
    for (vertex, coord) in mesh.forced.iter().zip(&forced) {
        assert_eq!(mesh.vertices[*vertex], *coord);
        assert!(mesh.is_forced(*vertex));
        assert!(mesh.is_interior(*vertex));
    }

    // Every forced vertex belongs to at least one triangle
    for vertex in &mesh.forced {
        assert!(mesh.triangles.iter().any(|tri| tri.contains(vertex)));
    }

    Ok(())
}

#[test]
fn holes_are_excluded() -> Result<(), TriangulationError> {
    let outer = square(0.0, 0.0, 100.0);
    let hole = square(40.0, 40.0, 20.0);
    let region = MultiPolygon::new(vec![Polygon::new(
        outer.exterior().clone(),
        vec![hole.exterior().clone()],
    )]);

    let mesh = ConstrainedTriangulator::default().triangulate(&region, &[], 500.0)?;
    assert_relative_eq!(mesh.area(), region.unsigned_area(), epsilon = 1e-6);
    assert_relative_eq!(mesh.area(), 9_600.0, epsilon = 1e-6);

    Ok(())
}

#[test]
fn disjoint_polygons_share_mesh() -> Result<(), TriangulationError> {
    let region = MultiPolygon::new(vec![square(0.0, 0.0, 50.0), square(500.0, 0.0, 50.0)]);
    let mesh = ConstrainedTriangulator::default().triangulate(&region, &[], 100.0)?;

    // The gap between the polygons is not triangulated
    assert_relative_eq!(mesh.area(), 5_000.0, epsilon = 1e-6);

    Ok(())
}

#[test]
fn empty_region_has_no_triangles() {
    let region = MultiPolygon::new(vec![]);
    let result = ConstrainedTriangulator::default().triangulate(&region, &[], 100.0);

    assert!(matches!(result, Err(TriangulationError::Empty)));
}
