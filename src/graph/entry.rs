use geo::{LineString, Point};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Names a single directed edge of a [`Topology`](crate::graph::Topology).
///
/// Two nodes may be joined by more than one edge, so the pair of
/// endpoints is qualified by a `key`. Both directions of the same
/// undirected edge share their `key`, so the [reverse](EdgeKey::reverse)
/// of a key names its twin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: usize,
    pub target: usize,
    pub key: usize,
}

impl EdgeKey {
    pub const fn new(source: usize, target: usize, key: usize) -> Self {
        EdgeKey {
            source,
            target,
            key,
        }
    }

    /// The key of the same edge, traversed in the opposite direction.
    #[inline]
    pub const fn reverse(&self) -> Self {
        EdgeKey {
            source: self.target,
            target: self.source,
            key: self.key,
        }
    }

    #[inline]
    pub fn source_node(&self) -> NodeIndex {
        NodeIndex::new(self.source)
    }

    #[inline]
    pub fn target_node(&self) -> NodeIndex {
        NodeIndex::new(self.target)
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.source, self.target, self.key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub position: Point,

    /// Set upon nodes joining exactly two edges which meet at a sharp angle.
    pub turn: bool,

    /// Set upon nodes inserted for a known anchor point.
    pub terminal: bool,
}

impl TopologyNode {
    pub const fn new(position: Point) -> Self {
        TopologyNode {
            position,
            turn: false,
            terminal: false,
        }
    }
}

/// A directed edge of the topology, with its geometry running
/// from the source node to the target node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopologyEdge {
    pub key: EdgeKey,
    pub geometry: LineString,
    pub length: f64,

    /// Terminal edges connect an anchor to the network. They are
    /// never part of a route between two interior positions.
    pub terminal: bool,
}
