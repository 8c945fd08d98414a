use crate::graph::{EdgeKey, Topology};
use crate::transition::candidate::{Candidate, CandidateGraph, Label};
use crate::transition::primitives::SequenceCache;

use log::{debug, warn};

/// Converts a solved label sequence into the edges it travels.
pub struct PathReconstructor<'a> {
    topology: &'a Topology,

    /// Edges below this length, travelled and immediately travelled
    /// back, are removed from the path.
    bounce_length: f64,
}

impl<'a> PathReconstructor<'a> {
    pub fn new(topology: &'a Topology, bounce_length: f64) -> Self {
        PathReconstructor {
            topology,
            bounce_length,
        }
    }

    /// The edges travelled through the candidates of `labels`, in order.
    ///
    /// Where consecutive candidates are neither upon the same edge nor
    /// upon adjoining edges, the cached route between them is spliced in.
    pub fn edges(
        &self,
        graph: &CandidateGraph,
        cache: &mut SequenceCache,
        labels: &[Label],
    ) -> Vec<EdgeKey> {
        let candidates = labels
            .iter()
            .filter_map(|label| graph.candidate(*label))
            .collect::<Vec<&Candidate>>();

        let mut edges = Vec::with_capacity(candidates.len());
        for pair in candidates.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            edges.push(a.edge);

            if a.precedes_along(b) || a.adjoins(b) {
                continue;
            }

            match cache.query(self.topology, a.edge.target, b.edge.source) {
                Some(sequence) => edges.extend(sequence.edges),
                None => warn!("No route between {} and {} to splice", a.edge, b.edge),
            }
        }

        if let Some(last) = candidates.last() {
            edges.push(last.edge);
        }

        self.refine(edges)
    }

    /// Drops repeated and terminal edges, and short edges bounced across.
    pub fn refine(&self, edges: Vec<EdgeKey>) -> Vec<EdgeKey> {
        let total = edges.len();
        let mut path: Vec<EdgeKey> = Vec::with_capacity(total);

        for key in edges {
            let Some(edge) = self.topology.edge(&key) else {
                warn!("Edge {key} is not part of the topology");
                continue;
            };

            if edge.terminal || path.last() == Some(&key) {
                continue;
            }

            if path.last() == Some(&key.reverse()) && edge.length < self.bounce_length {
                path.pop();
                continue;
            }

            path.push(key);
        }

        debug!("Refined {total} spliced edges into {}", path.len());
        path
    }
}
