use crate::graph::Topology;
use crate::mesh::{ConstrainedTriangulator, Triangulator};
use crate::spatial::{GeometryKernel, Planar};
use crate::topology::cell::circumcircle;
use crate::topology::region::endpoints;
use crate::topology::{BuildConfig, BuildError, Partition, TopologyBuilder};
use crate::util::fixture::{trace, traces};

use approx::assert_relative_eq;
use geo::{Area, Distance, Euclidean, Point, coord, line_string};
use tracenet_fixtures::{CROSS, DISJOINT, GRID, OVERLAPPING, STRAIGHT};

fn build(wkts: &[&str]) -> Topology {
    TopologyBuilder::new(BuildConfig::default())
        .build(&traces(wkts), &[])
        .expect("topology builds")
}

#[test]
fn circumcircle_of_right_triangle() {
    let (center, radius) = circumcircle(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 2.0, y: 0.0 },
        coord! { x: 0.0, y: 2.0 },
    )
    .expect("triangle is not degenerate");

    assert_relative_eq!(center.x(), 1.0);
    assert_relative_eq!(center.y(), 1.0);
    assert_relative_eq!(radius, 2f64.sqrt());

    let collinear = circumcircle(
        coord! { x: 0.0, y: 0.0 },
        coord! { x: 1.0, y: 1.0 },
        coord! { x: 2.0, y: 2.0 },
    );
    assert!(collinear.is_none());
}

#[test]
fn region_covers_every_buffer() -> Result<(), BuildError> {
    let config = BuildConfig::default();
    let traces = traces(&CROSS);

    let region = TopologyBuilder::new(config).region(&traces)?;
    assert_eq!(region.0.len(), 1);

    for trace in &traces {
        let buffer = Planar.buffer(trace, config.thickness / 2.0);
        assert!(region.unsigned_area() >= buffer.unsigned_area());
    }

    Ok(())
}

#[test]
fn small_holes_are_filled() -> Result<(), BuildError> {
    // The corridor about a 50m square loop leaves a 30m square hole.
    let square = line_string![
        (x: 0.0, y: 0.0),
        (x: 50.0, y: 0.0),
        (x: 50.0, y: 50.0),
        (x: 0.0, y: 50.0),
        (x: 0.0, y: 0.0),
    ];

    let builder = TopologyBuilder::new(BuildConfig::default());
    let filled = builder.region(std::slice::from_ref(&square))?;
    assert!(filled.iter().all(|polygon| polygon.interiors().is_empty()));

    let builder = TopologyBuilder::new(BuildConfig::default().with_min_inner_perimeter(10.0));
    let kept = builder.region(&[square])?;
    assert_eq!(kept.iter().map(|polygon| polygon.interiors().len()).sum::<usize>(), 1);

    Ok(())
}

#[test]
fn endpoints_survive_triangulation() -> Result<(), BuildError> {
    let config = BuildConfig::default();
    let traces = traces(&GRID);

    let region = TopologyBuilder::new(config).region(&traces)?;
    let forced = endpoints(&traces);
    let mesh = ConstrainedTriangulator::default().triangulate(&region, &forced, config.max_area())?;

    for coord in &forced {
        assert!(
            mesh.vertices.contains(coord),
            "endpoint {coord:?} is not a mesh vertex"
        );
    }

    let partition = Partition::new(&mesh);
    let cells = partition.cells();
    let forced_cells = cells.values().filter(|cell| !cell.forced.is_empty()).count();
    assert!(forced_cells > 0);

    Ok(())
}

#[test_log::test]
fn straight_trace_is_one_edge() {
    let topology = build(&[STRAIGHT]);

    assert_eq!(topology.node_count(), 2);
    assert_eq!(topology.edge_count(), 2);

    let edge = topology.edges().next().expect("edge exists");
    assert!(!edge.terminal);
    assert_relative_eq!(edge.length, 1000.0, epsilon = 1.0);

    let mut ends = topology
        .nodes()
        .map(|(_, node)| node.position.x())
        .collect::<Vec<_>>();
    ends.sort_by(f64::total_cmp);

    assert_relative_eq!(ends[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(ends[1], 1000.0, epsilon = 1e-9);
}

#[test_log::test]
fn cross_has_single_junction() {
    let topology = build(&CROSS);

    let junctions = topology
        .nodes()
        .filter(|(id, _)| topology.degree(*id) > 2)
        .collect::<Vec<_>>();

    assert_eq!(junctions.len(), 1, "junctions: {junctions:?}");

    let (junction, node) = junctions[0];
    assert_eq!(topology.degree(junction), 4);
    assert!(node.position.x().abs() < 10.0 && node.position.y().abs() < 10.0);

    assert_eq!(topology.edge_count(), 8);
    assert!(topology.edges().all(|edge| !edge.terminal));
    assert!(topology.is_connected());
}

#[test]
fn grid_is_connected() {
    let topology = build(&GRID);

    assert!(topology.is_connected());
    assert!(topology.edges().all(|edge| edge.length > 0.0));

    // Each edge's geometry begins and ends at its nodes
    for edge in topology.edges() {
        let source = topology.position(edge.key.source).expect("source exists");
        let target = topology.position(edge.key.target).expect("target exists");

        assert_eq!(edge.geometry.0.first(), Some(&source.0));
        assert_eq!(edge.geometry.0.last(), Some(&target.0));
    }
}

#[test]
fn overlapping_traces_share_corridor() {
    let topology = build(&OVERLAPPING);

    assert!(topology.is_connected());

    // Both recordings follow the same road, so no junction lies
    // far from either end.
    for (id, node) in topology.nodes() {
        if topology.degree(id) > 2 {
            let x = node.position.x();
            assert!(!(100.0..900.0).contains(&x), "junction midway at {x}");
        }
    }
}

#[test]
fn disjoint_traces_form_components() {
    let topology = build(&DISJOINT);

    assert!(!topology.is_connected());
    assert_eq!(topology.node_count(), 4);
    assert_eq!(topology.edge_count(), 4);
}

#[test]
fn anchors_attach_by_terminal_edges() -> Result<(), BuildError> {
    let anchor = Point::new(500.0, 60.0);
    let topology = TopologyBuilder::new(BuildConfig::default()).build(&[trace(STRAIGHT)], &[anchor])?;

    let terminals = topology
        .nodes()
        .filter(|(_, node)| node.terminal)
        .collect::<Vec<_>>();

    assert_eq!(terminals.len(), 1);
    assert_eq!(terminals[0].1.position, anchor);
    assert_eq!(topology.degree(terminals[0].0), 1);

    let terminal_edges = topology.edges().filter(|edge| edge.terminal).count();
    assert_eq!(terminal_edges, 2);

    // The ends of the trace remain reachable without the anchor
    let start = topology.nearest_node(&Point::new(0.0, 0.0)).expect("node exists");
    let end = topology.nearest_node(&Point::new(1000.0, 0.0)).expect("node exists");
    let (length, route) = topology.route(start, end).expect("route exists");

    assert_relative_eq!(length, 1000.0, epsilon = 1.0);
    assert!(route.iter().all(|key| topology.edge(key).is_some_and(|edge| !edge.terminal)));

    Ok(())
}

#[test]
fn anchors_attach_to_nearest_node() -> Result<(), BuildError> {
    let anchors = [Point::new(1050.0, 30.0), Point::new(-40.0, -20.0)];
    let topology = TopologyBuilder::new(BuildConfig::default()).build(&[trace(STRAIGHT)], &anchors)?;

    let interior = topology
        .nodes()
        .filter(|(_, node)| !node.terminal)
        .map(|(index, node)| (index, node.position))
        .collect::<Vec<_>>();

    for (index, node) in topology.nodes().filter(|(_, node)| node.terminal) {
        let nearest = interior
            .iter()
            .min_by(|(_, a), (_, b)| {
                Euclidean
                    .distance(*a, node.position)
                    .total_cmp(&Euclidean.distance(*b, node.position))
            })
            .map(|(index, _)| *index);

        let attached = topology.outgoing(index).map(|edge| edge.key.target).collect::<Vec<_>>();
        assert_eq!(attached.len(), 1);
        assert_eq!(Some(attached[0]), nearest);
    }

    Ok(())
}

#[test]
fn degenerate_input_is_rejected() {
    let builder = TopologyBuilder::new(BuildConfig::default());

    assert!(matches!(builder.build(&[], &[]), Err(BuildError::NoTraces)));

    let point = line_string![(x: 5.0, y: 5.0), (x: 5.0, y: 5.0)];
    let result = builder.build(&[trace(STRAIGHT), point], &[]);
    assert!(matches!(result, Err(BuildError::DegenerateTrace(1))));

    let invalid = TopologyBuilder::new(BuildConfig::default().with_thickness(-1.0));
    let result = invalid.build(&[trace(STRAIGHT)], &[]);
    assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
}

#[test]
fn default_config_is_valid() {
    let config = BuildConfig::default();
    assert!(config.validate().is_ok());
    assert_relative_eq!(config.max_area(), 400.0);
    assert_relative_eq!(config.tolerance(), 2.0);

    let kernel = Planar;
    assert_relative_eq!(kernel.length(&trace(STRAIGHT)), 1000.0);
}
