use crate::graph::EdgeKey;

use geo::Point;

/// A hypothesised position of a sample upon one edge of the topology.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub edge: EdgeKey,

    /// How far along the edge the position lies, from its source.
    pub offset: f64,

    /// The distance left to travel along the edge, to its target.
    pub remaining: f64,

    /// The perpendicular distance between the sample and the edge.
    pub distance: f64,

    /// The projected position upon the edge.
    pub position: Point,

    /// The layer, and so the sample, the candidate belongs to.
    pub layer: usize,

    pub emission: f64,
}

impl Candidate {
    /// Whether travel from `self` reaches `other` without leaving the edge.
    #[inline]
    pub fn precedes_along(&self, other: &Candidate) -> bool {
        self.edge == other.edge && other.offset >= self.offset
    }

    /// Whether `other`'s edge begins where `self`'s edge ends.
    #[inline]
    pub fn adjoins(&self, other: &Candidate) -> bool {
        self.edge.target == other.edge.source
    }
}

/// Names a vertex of the [`CandidateGraph`](super::CandidateGraph).
///
/// The source and target sentinels bracket the layers, so that
/// the solver searches for a single path between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Source,
    Target,
    Candidate(usize),
}
