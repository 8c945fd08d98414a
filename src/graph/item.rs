use crate::graph::{EdgeKey, IndexedEdge, TopologyEdge, TopologyNode};

use geo::{LineString, Point};
use log::debug;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use rustc_hash::FxHashMap;

use std::fmt::{Debug, Formatter};

pub type TopologyGraph = DiGraph<TopologyNode, TopologyEdge>;

pub(crate) type IndexedNode = GeomWithData<Point, NodeIndex>;

/// The network inferred from a set of traces.
///
/// A directed multigraph whose nodes are junctions, turns and anchors,
/// and whose edges carry the simplified geometry between them. Every
/// edge is present in both directions under the same key.
///
/// The topology is immutable once built. Edge geometries are held in
/// an `RTree` so that matching may scan for the edges near a position.
pub struct Topology {
    pub(crate) graph: TopologyGraph,
    pub(crate) lookup: FxHashMap<EdgeKey, EdgeIndex>,

    pub(crate) index: RTree<IndexedEdge>,
    pub(crate) index_node: RTree<IndexedNode>,
}

/// Joins `a` and `b` by an undirected edge, adding both of its directions.
///
/// The edge is keyed by the number of edges already joining the pair,
/// and the reverse direction carries the reversed geometry. Returns the
/// key of the `a` to `b` direction.
pub fn connect(
    graph: &mut TopologyGraph,
    a: NodeIndex,
    b: NodeIndex,
    geometry: LineString,
    length: f64,
    terminal: bool,
) -> EdgeKey {
    let key = EdgeKey::new(a.index(), b.index(), graph.edges_connecting(a, b).count());

    let mut reversed = geometry.clone();
    reversed.0.reverse();

    graph.add_edge(
        b,
        a,
        TopologyEdge {
            key: key.reverse(),
            geometry: reversed,
            length,
            terminal,
        },
    );

    graph.add_edge(
        a,
        b,
        TopologyEdge {
            key,
            geometry,
            length,
            terminal,
        },
    );

    key
}

impl Debug for Topology {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Topology with Nodes: {}, Edges: {}",
            self.graph.node_count(),
            self.graph.edge_count()
        )
    }
}

impl Topology {
    /// Indexes a graph whose edge keys agree with its node indices.
    pub fn new(graph: TopologyGraph) -> Self {
        let lookup = graph
            .edge_references()
            .map(|edge| (edge.weight().key, edge.id()))
            .collect::<FxHashMap<_, _>>();

        let index = RTree::bulk_load(
            graph
                .edge_weights()
                .map(IndexedEdge::new)
                .collect::<Vec<_>>(),
        );

        let index_node = RTree::bulk_load(
            graph
                .node_indices()
                .map(|node| GeomWithData::new(graph[node].position, node))
                .collect::<Vec<_>>(),
        );

        debug!(
            "Indexed {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Topology {
            graph,
            lookup,
            index,
            index_node,
        }
    }

    #[inline]
    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// The number of directed edges, twice the number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn node(&self, node: usize) -> Option<&TopologyNode> {
        self.graph.node_weight(NodeIndex::new(node))
    }

    #[inline]
    pub fn position(&self, node: usize) -> Option<Point> {
        self.node(node).map(|node| node.position)
    }

    #[inline]
    pub fn edge(&self, key: &EdgeKey) -> Option<&TopologyEdge> {
        self.lookup
            .get(key)
            .and_then(|index| self.graph.edge_weight(*index))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (usize, &TopologyNode)> {
        self.graph
            .node_indices()
            .map(|node| (node.index(), &self.graph[node]))
    }

    pub fn edges(&self) -> impl Iterator<Item = &TopologyEdge> {
        self.graph.edge_weights()
    }

    /// The edges leaving `node`.
    pub fn outgoing(&self, node: usize) -> impl Iterator<Item = &TopologyEdge> {
        self.graph
            .edges_directed(NodeIndex::new(node), Direction::Outgoing)
            .map(|edge| edge.weight())
    }

    /// The number of undirected edges meeting at `node`.
    ///
    /// As each edge is stored in both directions, this is
    /// the count of its outgoing edges.
    pub fn degree(&self, node: usize) -> usize {
        self.outgoing(node).count()
    }

    /// The node closest to `point`, if the topology has any nodes.
    pub fn nearest_node(&self, point: &Point) -> Option<usize> {
        self.index_node
            .nearest_neighbor(point)
            .map(|node| node.data.index())
    }

    /// Whether every node may reach every other, ignoring direction.
    pub fn is_connected(&self) -> bool {
        self.graph.node_count() > 0 && petgraph::algo::connected_components(&self.graph) == 1
    }
}
