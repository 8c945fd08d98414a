use crate::graph::{EdgeKey, Topology, TopologyEdge};

use geo::{Distance, Euclidean};
use log::trace;
use petgraph::graph::{EdgeReference, NodeIndex};
use petgraph::visit::EdgeFiltered;

impl Topology {
    /// Finds the shortest route between two nodes, by edge length.
    ///
    /// Terminal edges are never traversed, and where two nodes are joined
    /// by parallel edges the shortest is taken. Returns the route length and
    /// its edges, or `None` if `finish` cannot be reached from `start`.
    /// A route from a node to itself is empty.
    pub fn route(&self, start: usize, finish: usize) -> Option<(f64, Vec<EdgeKey>)> {
        trace!("Routing {start} -> {finish}");

        let (start, finish) = (NodeIndex::new(start), NodeIndex::new(finish));
        let target = self.graph.node_weight(finish)?.position;
        self.graph.node_weight(start)?;

        let interior = EdgeFiltered::from_fn(&self.graph, |edge: EdgeReference<TopologyEdge>| {
            !edge.weight().terminal
        });

        let (length, path) = petgraph::algo::astar(
            &interior,
            start,
            |node| node == finish,
            |edge| edge.weight().length,
            |node| Euclidean.distance(self.graph[node].position, target),
        )?;

        let edges = path
            .windows(2)
            .map(|pair| {
                self.graph
                    .edges_connecting(pair[0], pair[1])
                    .filter(|edge| !edge.weight().terminal)
                    .min_by(|a, b| a.weight().length.total_cmp(&b.weight().length))
                    .map(|edge| edge.weight().key)
            })
            .collect::<Option<Vec<_>>>()?;

        Some((length, edges))
    }
}
