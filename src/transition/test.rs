use crate::graph::{EdgeKey, Topology, TopologyGraph, TopologyNode, connect};
use crate::spatial::{GeometryKernel, Planar, Vector};
use crate::topology::{BuildConfig, TopologyBuilder};
use crate::transition::candidate::{Candidate, CandidateGraph, Label};
use crate::transition::layer::{Sample, Sampler};
use crate::transition::solver::{PathReconstructor, UNREACHABLE_COST};
use crate::transition::*;
use crate::util::fixture::{trace, traces};

use approx::assert_relative_eq;
use geo::{LineString, Point, line_string};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use tracenet_fixtures::{
    CROSS, CROSS_NORTH_QUERY, GRID, GRID_L_QUERY, SPLIT, SPLIT_QUERY, STRAIGHT,
    STRAIGHT_NOISY_QUERY,
};

fn build(wkts: &[&str]) -> Topology {
    TopologyBuilder::new(BuildConfig::default())
        .build(&traces(wkts), &[])
        .expect("topology builds")
}

fn near(point: Point, x: f64, y: f64, tolerance: f64) -> bool {
    (point.x() - x).hypot(point.y() - y) < tolerance
}

/// A junction `1` with a long edge in from `0`, a short spur to `2`,
/// a long edge out to `3`, and an anchor `4` attached to `0`.
fn junction() -> Topology {
    let mut graph = TopologyGraph::default();
    let positions = [(0.0, 0.0), (100.0, 0.0), (100.0, 30.0), (600.0, 0.0), (0.0, -40.0)];
    let nodes = positions.map(|(x, y)| graph.add_node(TopologyNode::new(Point::new(x, y))));

    for (a, b, terminal) in [(0, 1, false), (1, 2, false), (1, 3, false), (4, 0, true)] {
        let geometry: LineString = vec![positions[a], positions[b]].into();
        let length = Planar.length(&geometry);
        connect(&mut graph, nodes[a], nodes[b], geometry, length, terminal);
    }

    Topology::new(graph)
}

#[test_log::test]
fn straight_trace_matches_single_edge() -> Result<(), MatchError> {
    let topology = build(&[STRAIGHT]);
    let matcher = Matcher::new(&topology, MatchConfig::default().with_increment(100.0));

    let route = matcher.match_trace(&trace(STRAIGHT))?;
    assert_eq!(route.edges.len(), 1, "edges: {:?}", route.edges);

    let edge = route.edges[0];
    let source = topology.position(edge.source).expect("source exists");
    let target = topology.position(edge.target).expect("target exists");

    assert!(near(source, 0.0, 0.0, 1.0));
    assert!(near(target, 1000.0, 0.0, 1.0));

    // One candidate for each sample, all upon the same edge
    assert_eq!(route.candidates.len(), 11);
    assert!(route.candidates.iter().all(|candidate| candidate.edge == edge));
    assert!(route.cost.is_finite());

    assert_relative_eq!(Planar.length(&route.linestring(&topology)), 1000.0, epsilon = 1.0);
    Ok(())
}

#[test]
fn noisy_trace_matches_single_edge() -> Result<(), MatchError> {
    let topology = build(&[STRAIGHT]);
    let matcher = Matcher::new(&topology, MatchConfig::default());

    let route = matcher.match_trace(&trace(STRAIGHT_NOISY_QUERY))?;
    assert_eq!(route.edges.len(), 1, "edges: {:?}", route.edges);

    let source = topology.position(route.edges[0].source).expect("source exists");
    assert!(near(source, 0.0, 0.0, 1.0));

    Ok(())
}

#[test_log::test]
fn cross_arm_query_stays_on_arm() -> Result<(), MatchError> {
    let topology = build(&CROSS);
    let matcher = Matcher::new(&topology, MatchConfig::default());

    let route = matcher.match_trace(&trace(CROSS_NORTH_QUERY))?;
    assert_eq!(route.edges.len(), 1, "edges: {:?}", route.edges);

    for key in &route.edges {
        let edge = topology.edge(key).expect("matched edge exists");
        assert!(!edge.terminal);

        for coord in &edge.geometry {
            assert!(coord.x.abs() < 20.0, "{key} leaves the northern arm");
            assert!(coord.y > -20.0, "{key} leaves the northern arm");
        }
    }

    // The query travels south, toward the junction
    let edge = route.edges[0];
    let source = topology.position(edge.source).expect("source exists");
    let target = topology.position(edge.target).expect("target exists");
    assert!(source.y() > target.y());

    Ok(())
}

#[test_log::test]
fn grid_query_turns_at_junction() -> Result<(), MatchError> {
    let topology = build(&GRID);
    let matcher = Matcher::new(&topology, MatchConfig::default());

    let route = matcher.match_trace(&trace(GRID_L_QUERY))?;
    assert_eq!(route.edges.len(), 2, "edges: {:?}", route.edges);

    let position = |node: usize| topology.position(node).expect("node exists");
    let (east, north) = (route.edges[0], route.edges[1]);

    assert!(near(position(east.source), 0.0, 0.0, 30.0));
    assert!(near(position(east.target), 1000.0, 0.0, 30.0));
    assert_eq!(east.target, north.source);
    assert!(near(position(north.target), 1000.0, 1000.0, 30.0));

    Ok(())
}

#[test]
fn batch_matching_is_keyed_and_reproducible() {
    let topology = build(&[STRAIGHT]);
    let matcher = Matcher::new(&topology, MatchConfig::default().with_seed(7));

    let traces = BTreeMap::from([
        ("clean", trace(STRAIGHT)),
        ("noisy", trace(STRAIGHT_NOISY_QUERY)),
    ]);

    let first = matcher.match_traces(&traces);
    let second = matcher.match_traces(&traces);

    assert_eq!(first, second);
    assert_eq!(first.keys().copied().collect::<Vec<_>>(), vec!["clean", "noisy"]);
    assert_eq!(first["clean"], first["noisy"]);
    assert_eq!(first["clean"].as_ref().map(Vec::len), Ok(1));
}

#[test]
fn batch_failure_is_kept_to_its_trace() {
    let topology = build(&[STRAIGHT]);
    let matcher = Matcher::new(&topology, MatchConfig::default());

    let traces = BTreeMap::from([
        ("clean", trace(STRAIGHT)),
        ("distant", line_string![(x: 5000.0, y: 5000.0), (x: 6000.0, y: 5000.0)]),
    ]);

    let results = matcher.match_traces(&traces);
    assert_eq!(results.len(), 2);

    assert_eq!(results["clean"].as_ref().map(Vec::len), Ok(1));
    assert_eq!(results["distant"], Err(MatchError::NoCandidates));
}

#[test_log::test]
fn trace_across_disconnected_roads_is_matched() -> Result<(), MatchError> {
    let topology = build(&SPLIT);
    assert!(!topology.is_connected());

    let matcher = Matcher::new(&topology, MatchConfig::default());
    let route = matcher.match_trace(&trace(SPLIT_QUERY))?;

    assert_eq!(route.edges.len(), 2, "edges: {:?}", route.edges);
    assert!(route.cost >= UNREACHABLE_COST);

    let position = |node: usize| topology.position(node).expect("node exists");
    let (west, east) = (route.edges[0], route.edges[1]);

    assert!(position(west.source).x() < position(west.target).x());
    assert!(position(west.target).x() < 500.0);
    assert!(position(east.source).x() > 500.0);
    assert!(position(east.source).x() < position(east.target).x());

    Ok(())
}

#[test]
fn unmatchable_traces_are_rejected() {
    let topology = build(&[STRAIGHT]);
    let matcher = Matcher::new(&topology, MatchConfig::default());

    let distant = line_string![(x: 5000.0, y: 5000.0), (x: 6000.0, y: 5000.0)];
    assert!(matches!(
        matcher.match_trace(&distant),
        Err(MatchError::NoCandidates)
    ));

    let point = line_string![(x: 10.0, y: 0.0), (x: 10.0, y: 0.0)];
    assert!(matches!(
        matcher.match_trace(&point),
        Err(MatchError::DegenerateTrace)
    ));

    let invalid = Matcher::new(&topology, MatchConfig::default().with_increment(0.0));
    assert!(matches!(
        invalid.match_trace(&trace(STRAIGHT)),
        Err(MatchError::InvalidConfig(_))
    ));
}

#[test]
fn samples_span_the_trace() -> Result<(), MatchError> {
    let config = MatchConfig::default().with_increment(100.0);
    let sampler = Sampler::new(&Planar, &config);
    let mut rng = StdRng::seed_from_u64(0);

    let samples = sampler.samples(&trace(STRAIGHT), &mut rng)?;
    assert_eq!(samples.len(), 11);

    for (index, sample) in samples.iter().enumerate() {
        assert_relative_eq!(sample.offset, index as f64 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(sample.position.x(), index as f64 * 100.0, epsilon = 1e-9);
        assert_relative_eq!(sample.direction.x, 1.0, epsilon = 1e-9);
    }

    Ok(())
}

#[test]
fn samples_avoid_corners() -> Result<(), MatchError> {
    let config = MatchConfig::default();
    let sampler = Sampler::new(&Planar, &config);
    let corner = Point::new(500.0, 0.0);

    let bend = line_string![
        (x: 0.0, y: 0.0),
        (x: 250.0, y: 1.0),
        (x: 500.0, y: 0.0),
        (x: 500.0, y: 500.0),
    ];

    assert_eq!(sampler.corners(&bend), vec![corner]);

    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = sampler.samples(&bend, &mut rng)?;

        let first = samples.first().expect("first sample");
        let last = samples.last().expect("last sample");
        assert!(near(first.position, 0.0, 0.0, 1e-6));
        assert!(near(last.position, 500.0, 500.0, 1e-6));

        for sample in &samples[1..samples.len() - 1] {
            assert!(Planar.distance(sample.position, corner) >= config.scope);
        }

        assert!(samples.windows(2).all(|pair| pair[0].offset < pair[1].offset));
    }

    Ok(())
}

#[test]
fn emission_follows_measurement_error() {
    let emission = GaussianEmission { sigma_z: 4.07 };
    let (candidate, sample) = (Point::new(0.0, 4.07), Point::new(0.0, 0.0));

    let cost = emission.cost(EmissionContext::new(&candidate, &sample));
    assert_relative_eq!(cost, 0.5);

    let cost = emission.cost(EmissionContext::new(&sample, &sample));
    assert_relative_eq!(cost, 0.0);
}

#[test]
fn transition_costs_each_movement() {
    let strategy = RouteDeviation {
        beta: 2.0,
        switch_bias: 0.5,
    };

    let candidate = |edge: EdgeKey, offset: f64, length: f64| Candidate {
        edge,
        offset,
        remaining: length - offset,
        distance: 0.0,
        position: Point::new(offset, 0.0),
        layer: 0,
        emission: 0.0,
    };

    let a = candidate(EdgeKey::new(0, 1, 0), 20.0, 100.0);
    let b = candidate(EdgeKey::new(0, 1, 0), 60.0, 100.0);
    let c = candidate(EdgeKey::new(1, 2, 0), 10.0, 50.0);
    let d = candidate(EdgeKey::new(5, 6, 0), 30.0, 50.0);

    let cost = |source, target, movement| {
        strategy.cost(TransitionContext::new(source, target, movement))
    };

    assert_relative_eq!(cost(Some(&a), Some(&b), Movement::Along), 20.0);
    assert_relative_eq!(cost(Some(&a), Some(&c), Movement::Adjacent), 45.5);
    assert_relative_eq!(cost(None, Some(&a), Movement::Enter), 10.0);
    assert_relative_eq!(cost(Some(&a), None, Movement::Exit), 40.0);

    // 80 + 100 + 30 travelled against 150 in a straight line, across two edges
    let routed = Movement::Routed {
        length: 100.0,
        hops: 2,
        straightline: 150.0,
    };
    assert_relative_eq!(cost(Some(&a), Some(&d), routed), 30.0 + 1.5);

    assert!(cost(Some(&a), Some(&d), Movement::Unreachable).is_infinite());
}

#[test]
fn candidate_graph_joins_consecutive_layers() {
    let sample = |x: f64| Sample {
        position: Point::new(x, 0.0),
        direction: Vector::new(1.0, 0.0),
        offset: x,
    };

    let candidate = |key: usize| Candidate {
        edge: EdgeKey::new(0, 1, key),
        offset: 0.0,
        remaining: 0.0,
        distance: 0.0,
        position: Point::new(0.0, 0.0),
        layer: usize::MAX,
        emission: 0.0,
    };

    let graph = CandidateGraph::new(vec![
        (sample(0.0), vec![candidate(0), candidate(1)]),
        (sample(50.0), vec![candidate(2)]),
    ]);

    assert_eq!(graph.layer_count(), 2);
    assert_eq!(graph.candidate_count(), 3);
    assert_eq!(graph.layer(1)[0].layer, 1);

    let successors = |label| graph.successors(label).collect::<Vec<_>>();
    assert_eq!(
        successors(Label::Source),
        vec![Label::Candidate(0), Label::Candidate(1)]
    );
    assert_eq!(successors(Label::Candidate(1)), vec![Label::Candidate(2)]);
    assert_eq!(successors(Label::Candidate(2)), vec![Label::Target]);
    assert!(successors(Label::Target).is_empty());
}

#[test]
fn reconstruction_drops_bounces_and_terminals() {
    let topology = junction();
    let reconstructor = PathReconstructor::new(&topology, 200.0);

    let inbound = EdgeKey::new(0, 1, 0);
    let spur = EdgeKey::new(1, 2, 0);
    let outbound = EdgeKey::new(1, 3, 0);
    let anchor = EdgeKey::new(4, 0, 0);

    // Jitter across the short spur and back is removed
    let edges = vec![anchor, inbound, inbound, spur, spur.reverse(), outbound];
    assert_eq!(reconstructor.refine(edges), vec![inbound, outbound]);

    // Doubling back along a long edge is kept
    let edges = vec![inbound, outbound, outbound.reverse()];
    assert_eq!(reconstructor.refine(edges.clone()), edges);
}
