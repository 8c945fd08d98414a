use crate::graph::{EdgeKey, Topology, TopologyGraph, TopologyNode, connect};
use crate::transition::primitives::{PriorityQueue, SequenceCache};

use approx::assert_relative_eq;
use geo::{LineString, Point};

/// Two chained edges, `0 - 1 - 2`, and an isolated node `3`.
fn chain() -> Topology {
    let mut graph = TopologyGraph::default();
    let nodes = [(0.0, 0.0), (100.0, 0.0), (100.0, 60.0), (900.0, 900.0)]
        .map(|(x, y)| graph.add_node(TopologyNode::new(Point::new(x, y))));

    let first: LineString = vec![(0.0, 0.0), (100.0, 0.0)].into();
    let second: LineString = vec![(100.0, 0.0), (100.0, 60.0)].into();

    connect(&mut graph, nodes[0], nodes[1], first, 100.0, false);
    connect(&mut graph, nodes[1], nodes[2], second, 60.0, false);

    Topology::new(graph)
}

#[test]
fn cache_is_symmetric() {
    let mut cache = SequenceCache::new();
    let edges = vec![EdgeKey::new(4, 7, 0), EdgeKey::new(7, 9, 1)];

    cache.add(4, 9, 120.0, edges.clone());

    let forward = cache.lookup(4, 9).expect("stored route");
    assert_relative_eq!(forward.length, 120.0);
    assert_eq!(forward.edges, edges);

    let backward = cache.lookup(9, 4).expect("reversed route");
    assert_relative_eq!(backward.length, 120.0);
    assert_eq!(
        backward.edges,
        vec![EdgeKey::new(9, 7, 1), EdgeKey::new(7, 4, 0)]
    );

    assert_eq!(cache.len(), 1);
    assert!(cache.lookup(4, 7).is_none());
}

#[test]
fn cache_keeps_first_route() {
    let mut cache = SequenceCache::new();

    cache.add(1, 2, 10.0, vec![EdgeKey::new(1, 2, 0)]);
    cache.add(2, 1, 15.0, vec![EdgeKey::new(2, 1, 1)]);

    let sequence = cache.lookup(2, 1).expect("stored route");
    assert_relative_eq!(sequence.length, 10.0);
    assert_eq!(sequence.edges, vec![EdgeKey::new(2, 1, 0)]);
}

#[test]
fn cache_reads_through_to_topology() {
    let topology = chain();
    let mut cache = SequenceCache::new();

    let sequence = cache.query(&topology, 2, 0).expect("route exists");
    assert_relative_eq!(sequence.length, 160.0);
    assert_eq!(sequence.hops(), 2);
    assert_eq!(
        sequence.edges,
        vec![EdgeKey::new(2, 1, 0), EdgeKey::new(1, 0, 0)]
    );

    // The reverse is answered from the stored entry
    assert_eq!(cache.len(), 1);
    let reverse = cache.lookup(0, 2).expect("cached");
    assert_eq!(
        reverse.edges,
        vec![EdgeKey::new(0, 1, 0), EdgeKey::new(1, 2, 0)]
    );

    assert!(cache.query(&topology, 0, 3).is_none());
    assert!(cache.is_unreachable(3, 0));
    assert_eq!(cache.len(), 1);
}

#[test]
fn queue_pops_in_priority_order() {
    let mut queue = PriorityQueue::new();

    queue.add_or_update('a', 3.0);
    queue.add_or_update('b', 1.0);
    queue.add_or_update('c', 2.0);

    assert_eq!(queue.pop(), Some(('b', 1.0)));
    assert_eq!(queue.pop(), Some(('c', 2.0)));
    assert_eq!(queue.pop(), Some(('a', 3.0)));
    assert_eq!(queue.pop(), None);
}

#[test]
fn queue_updates_leave_one_live_entry() {
    let mut queue = PriorityQueue::new();

    queue.add_or_update(1, 5.0);
    queue.add_or_update(2, 4.0);
    queue.add_or_update(1, 0.5);
    queue.add_or_update(1, 7.0);

    assert_eq!(queue.len(), 2);
    assert_eq!(queue.pop(), Some((2, 4.0)));
    assert_eq!(queue.pop(), Some((1, 7.0)));
    assert!(queue.pop().is_none());
    assert!(queue.is_empty());
}

#[test]
fn queue_skips_removed_keys() {
    let mut queue = PriorityQueue::new();

    queue.add_or_update("near", 1.0);
    queue.add_or_update("far", 2.0);

    assert!(queue.remove(&"near"));
    assert!(!queue.contains(&"near"));
    assert_eq!(queue.pop(), Some(("far", 2.0)));
    assert_eq!(queue.pop(), None);
}
