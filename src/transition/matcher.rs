use crate::graph::{EdgeKey, Topology};
use crate::spatial::{GeometryKernel, Planar};
use crate::transition::candidate::Candidate;
use crate::transition::layer::{CandidateGenerator, Sampler};
use crate::transition::primitives::SequenceCache;
use crate::transition::solver::{PathReconstructor, ViterbiSolver};
use crate::transition::{
    CostingStrategies, EmissionStrategy, GaussianEmission, MatchConfig, MatchError,
    RouteDeviation, TransitionStrategy,
};

use geo::{Coord, LineString};
use log::{info, warn};
use measure_time::{debug_time, info_time};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// The result of matching one trace onto a topology.
#[derive(Clone, Debug)]
pub struct MatchedRoute {
    /// The edges travelled, in order.
    pub edges: Vec<EdgeKey>,

    /// The total cost of the chosen candidates.
    pub cost: f64,

    /// The candidate chosen for each sample retained.
    pub candidates: Vec<Candidate>,
}

impl MatchedRoute {
    /// The geometry of the matched edges, joined end to end.
    pub fn linestring(&self, topology: &Topology) -> LineString {
        let mut coords: Vec<Coord> = Vec::new();

        for edge in self.edges.iter().filter_map(|key| topology.edge(key)) {
            let skip = match (coords.last(), edge.geometry.0.first()) {
                (Some(last), Some(first)) if last == first => 1,
                _ => 0,
            };

            coords.extend(edge.geometry.0.iter().skip(skip));
        }

        LineString::new(coords)
    }
}

/// Matches traces onto a [`Topology`].
///
/// Each trace is sampled, the candidate edges near each sample are
/// found, and the least-cost sequence of candidates is solved for. The
/// routes between chosen candidates are spliced together into the
/// sequence of edges the trace travelled.
///
/// ```rust,ignore
/// let matcher = Matcher::new(&topology, MatchConfig::default());
/// let route = matcher.match_trace(&trace)?;
/// ```
pub struct Matcher<'a, K = Planar, E = GaussianEmission, T = RouteDeviation>
where
    K: GeometryKernel,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    topology: &'a Topology,
    config: MatchConfig,

    kernel: K,
    heuristics: CostingStrategies<E, T>,
}

impl<'a> Matcher<'a> {
    pub fn new(topology: &'a Topology, config: MatchConfig) -> Self {
        Matcher {
            topology,
            heuristics: CostingStrategies::from_config(&config),
            kernel: Planar,
            config,
        }
    }
}

impl<'a, E, T> Matcher<'a, Planar, E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Creates a matcher which costs candidates by the given strategies.
    pub fn with_costing(
        topology: &'a Topology,
        config: MatchConfig,
        heuristics: CostingStrategies<E, T>,
    ) -> Self {
        Matcher {
            topology,
            config,
            kernel: Planar,
            heuristics,
        }
    }
}

impl<'a, K, E, T> Matcher<'a, K, E, T>
where
    K: GeometryKernel,
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// Creates a matcher over an alternative geometry backend.
    pub fn with_backend(
        topology: &'a Topology,
        config: MatchConfig,
        kernel: K,
        heuristics: CostingStrategies<E, T>,
    ) -> Self {
        Matcher {
            topology,
            config,
            kernel,
            heuristics,
        }
    }

    #[inline]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Matches a single trace, drawing sample moves from the configured seed.
    pub fn match_trace(&self, trace: &LineString) -> Result<MatchedRoute, MatchError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.match_with(trace, &mut rng)
    }

    /// Matches a single trace, drawing sample moves from `rng`.
    pub fn match_with<R: Rng>(
        &self,
        trace: &LineString,
        rng: &mut R,
    ) -> Result<MatchedRoute, MatchError> {
        debug_time!("match trace");
        self.config.validate()?;

        let samples = Sampler::new(&self.kernel, &self.config).samples(trace, rng)?;
        let graph =
            CandidateGenerator::new(self.topology, &self.kernel, &self.config, &self.heuristics)
                .generate(samples)?;

        let mut cache = SequenceCache::new();
        let solution = ViterbiSolver::new(self.topology, &self.heuristics).solve(&graph, &mut cache)?;

        let edges = PathReconstructor::new(self.topology, self.config.bounce_length()).edges(
            &graph,
            &mut cache,
            &solution.labels,
        );

        let candidates = solution
            .labels
            .iter()
            .filter_map(|label| graph.candidate(*label))
            .copied()
            .collect::<Vec<_>>();

        info!(
            "Matched {} samples onto {} edges at cost {:.3}, caching {} routes",
            candidates.len(),
            edges.len(),
            solution.cost,
            cache.len()
        );

        Ok(MatchedRoute {
            edges,
            cost: solution.cost,
            candidates,
        })
    }

    /// Matches every trace of `traces` in parallel, keyed as given.
    ///
    /// Each trace draws from its own generator, seeded by the configured
    /// seed and its key, so that results do not depend on scheduling.
    /// Each trace routes through its own cache, and a trace which fails
    /// to match holds its error without affecting the others.
    pub fn match_traces<Id>(
        &self,
        traces: &BTreeMap<Id, LineString>,
    ) -> BTreeMap<Id, Result<Vec<EdgeKey>, MatchError>>
    where
        Id: Ord + Hash + Clone + Debug + Send + Sync,
        K: Sync,
        E: Sync,
        T: Sync,
    {
        info_time!("match {} traces", traces.len());

        traces
            .par_iter()
            .map(|(id, trace)| {
                let seed = self.config.seed ^ FxBuildHasher.hash_one(id);
                let mut rng = StdRng::seed_from_u64(seed);

                let edges = self
                    .match_with(trace, &mut rng)
                    .map(|route| route.edges)
                    .inspect_err(|err| warn!("Could not match trace {id:?}: {err}"));

                (id.clone(), edges)
            })
            .collect()
    }
}
