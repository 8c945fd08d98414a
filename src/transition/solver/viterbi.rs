use crate::graph::Topology;
use crate::transition::candidate::{CandidateGraph, Label};
use crate::transition::primitives::{PriorityQueue, SequenceCache};
use crate::transition::{
    CostingStrategies, EmissionStrategy, MatchError, Movement, TransitionContext,
    TransitionStrategy,
};

use geo::{Distance, Euclidean};
use log::{debug, trace};
use measure_time::debug_time;
use rustc_hash::{FxHashMap, FxHashSet};

/// The cost of moving between candidates with no route between them.
///
/// Finite so that a trace spanning disconnected parts of the topology
/// is still matched, while any connected sequence is always preferred.
pub const UNREACHABLE_COST: f64 = 1e9;

/// The least-cost path through a candidate graph.
#[derive(Clone, Debug)]
pub struct Solution {
    pub cost: f64,

    /// The labels of the path, from the source to the target sentinel.
    pub labels: Vec<Label>,
}

/// Finds the least-cost sequence of candidates, one from each layer.
///
/// As every cost is non-negative, the layered graph is searched in the
/// manner of Dijkstra, settling labels in order of their accumulated cost
/// until the target is reached. Each label's cost accrues the transition
/// onto it and its own emission. Impossible transitions cost
/// [`UNREACHABLE_COST`] rather than ending the search.
pub struct ViterbiSolver<'a, E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    topology: &'a Topology,
    heuristics: &'a CostingStrategies<E, T>,
}

impl<'a, E, T> ViterbiSolver<'a, E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn new(topology: &'a Topology, heuristics: &'a CostingStrategies<E, T>) -> Self {
        ViterbiSolver {
            topology,
            heuristics,
        }
    }

    /// Classifies the travel between `source` and `target`, routing
    /// between their edges through the `cache` where necessary.
    pub fn movement(
        &self,
        graph: &CandidateGraph,
        cache: &mut SequenceCache,
        source: Label,
        target: Label,
    ) -> Movement {
        match (graph.candidate(source), graph.candidate(target)) {
            (None, Some(_)) => Movement::Enter,
            (Some(_), None) => Movement::Exit,
            (None, None) => Movement::Unreachable,
            (Some(a), Some(b)) if a.precedes_along(b) => Movement::Along,
            (Some(a), Some(b)) if a.adjoins(b) => Movement::Adjacent,
            (Some(a), Some(b)) => {
                let Some(sequence) = cache.query(self.topology, a.edge.target, b.edge.source)
                else {
                    return Movement::Unreachable;
                };

                let straightline = match (graph.sample(a.layer), graph.sample(b.layer)) {
                    (Some(u), Some(v)) => Euclidean.distance(u.position, v.position),
                    _ => return Movement::Unreachable,
                };

                Movement::Routed {
                    length: sequence.length,
                    hops: sequence.hops(),
                    straightline,
                }
            }
        }
    }

    pub fn solve(
        &self,
        graph: &CandidateGraph,
        cache: &mut SequenceCache,
    ) -> Result<Solution, MatchError> {
        debug_time!("solve candidate graph");

        let mut cost = FxHashMap::<Label, f64>::default();
        let mut predecessor = FxHashMap::<Label, Label>::default();
        let mut settled = FxHashSet::<Label>::default();
        let mut queue = PriorityQueue::new();

        cost.insert(Label::Source, 0.0);
        queue.add_or_update(Label::Source, 0.0);

        let mut reached = None;
        while let Some((label, accrued)) = queue.pop() {
            if label == Label::Target {
                reached = Some(accrued);
                break;
            }

            settled.insert(label);

            for next in graph.successors(label) {
                if settled.contains(&next) {
                    continue;
                }

                let movement = self.movement(graph, cache, label, next);
                let context =
                    TransitionContext::new(graph.candidate(label), graph.candidate(next), movement);

                let transition = match self.heuristics.transition(context) {
                    cost if cost.is_finite() => cost,
                    _ => UNREACHABLE_COST,
                };
                let emission = graph.candidate(next).map_or(0.0, |c| c.emission);

                let total = accrued + transition + emission;
                if !total.is_finite() {
                    continue;
                }

                if total < cost.get(&next).copied().unwrap_or(f64::INFINITY) {
                    trace!("Relaxed {next:?} to {total:.3} through {label:?}");

                    cost.insert(next, total);
                    predecessor.insert(next, label);
                    queue.add_or_update(next, total);
                }
            }
        }

        let Some(total) = reached else {
            return Err(MatchError::NoPathFound);
        };

        let mut labels = vec![Label::Target];
        let mut current = Label::Target;
        while let Some(previous) = predecessor.get(&current) {
            labels.push(*previous);
            current = *previous;
        }

        labels.reverse();
        debug!(
            "Solved {} layers at cost {total:.3}, settling {} labels",
            graph.layer_count(),
            settled.len()
        );

        Ok(Solution {
            cost: total,
            labels,
        })
    }
}
