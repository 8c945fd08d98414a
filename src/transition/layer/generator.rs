use crate::graph::{Topology, TopologyEdge};
use crate::spatial::GeometryKernel;
use crate::spatial::vector::heading;
use crate::transition::candidate::{Candidate, CandidateGraph};
use crate::transition::layer::Sample;
use crate::transition::{
    CostingStrategies, EmissionContext, EmissionStrategy, MatchConfig, MatchError,
    TransitionStrategy,
};

use log::{debug, warn};
use measure_time::debug_time;

/// Generates the layers of the candidate graph.
///
/// Each layer holds the candidates of one sample: a projection of the
/// sample onto each edge within `scope` of it, heading the same way as
/// the sample. Terminal edges are only candidates of the first and
/// last samples, where a trace may begin or end at an anchor.
pub struct CandidateGenerator<'a, K, E, T>
where
    K: GeometryKernel,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    topology: &'a Topology,
    kernel: &'a K,
    config: &'a MatchConfig,

    heuristics: &'a CostingStrategies<E, T>,
}

impl<'a, K, E, T> CandidateGenerator<'a, K, E, T>
where
    K: GeometryKernel,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn new(
        topology: &'a Topology,
        kernel: &'a K,
        config: &'a MatchConfig,
        heuristics: &'a CostingStrategies<E, T>,
    ) -> Self {
        CandidateGenerator {
            topology,
            kernel,
            config,
            heuristics,
        }
    }

    /// Projects the sample onto `edge`, if the edge is near enough and
    /// heading the same way.
    fn candidate(&self, sample: &Sample, edge: &TopologyEdge) -> Option<Candidate> {
        let projection = self.kernel.project(&edge.geometry, &sample.position)?;
        if projection.distance >= self.config.scope {
            return None;
        }

        let direction = heading(&edge.geometry, projection.offset)?;
        if direction.dot(&sample.direction) < 0.0 {
            return None;
        }

        let offset = projection.offset.clamp(0.0, edge.length);
        let emission = self.heuristics.emission(EmissionContext::new(
            &projection.position,
            &sample.position,
        ));

        Some(Candidate {
            edge: edge.key,
            offset,
            remaining: edge.length - offset,
            distance: projection.distance,
            position: projection.position,
            layer: 0,
            emission,
        })
    }

    /// The candidates of one sample.
    pub fn layer(&self, sample: &Sample, allow_terminal: bool) -> Vec<Candidate> {
        self.topology
            .scan_edges(&sample.position, self.config.scope)
            .filter(|edge| allow_terminal || !edge.terminal)
            .filter_map(|edge| self.candidate(sample, edge))
            .collect()
    }

    /// Generates the candidate graph over the samples of a trace.
    ///
    /// Samples without any candidate are dropped.
    pub fn generate(&self, samples: Vec<Sample>) -> Result<CandidateGraph, MatchError> {
        debug_time!("generate layers");

        let last = samples.len().saturating_sub(1);
        let layers = samples
            .into_iter()
            .enumerate()
            .filter_map(|(index, sample)| {
                let candidates = self.layer(&sample, index == 0 || index == last);

                if candidates.is_empty() {
                    warn!(
                        "No candidates near sample {index} at ({:.1}, {:.1}), dropping it",
                        sample.position.x(),
                        sample.position.y()
                    );
                    return None;
                }

                Some((sample, candidates))
            })
            .collect::<Vec<_>>();

        if layers.is_empty() {
            return Err(MatchError::NoCandidates);
        }

        let graph = CandidateGraph::new(layers);
        debug!(
            "Generated {} candidates across {} layers",
            graph.candidate_count(),
            graph.layer_count()
        );

        Ok(graph)
    }
}
