use crate::transition::Strategy;
use crate::transition::candidate::Candidate;

pub trait TransitionStrategy: for<'a> Strategy<TransitionContext<'a>> {}
impl<T> TransitionStrategy for T where T: for<'a> Strategy<TransitionContext<'a>> {}

/// How travel proceeds between two consecutive labels of the candidate graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    /// From the source sentinel onto a candidate of the first layer.
    Enter,

    /// From a candidate of the last layer to the target sentinel.
    Exit,

    /// Forward along a single edge.
    Along,

    /// Directly onto the edge beginning where the source's edge ends.
    Adjacent,

    /// Across the shortest route between the end of the source's
    /// edge and the start of the target's edge.
    Routed {
        /// The length of the route between the two edges.
        length: f64,

        /// The number of edges the route crosses.
        hops: usize,

        /// The straight-line distance between the two samples.
        straightline: f64,
    },

    /// No route joins the two edges.
    Unreachable,
}

#[derive(Clone, Copy, Debug)]
pub struct TransitionContext<'a> {
    /// The candidate travel begins from, absent for the source sentinel.
    pub source_candidate: Option<&'a Candidate>,

    /// The candidate travel ends upon, absent for the target sentinel.
    pub target_candidate: Option<&'a Candidate>,

    pub movement: Movement,
}

impl<'a> TransitionContext<'a> {
    pub fn new(
        source: Option<&'a Candidate>,
        target: Option<&'a Candidate>,
        movement: Movement,
    ) -> Self {
        Self {
            source_candidate: source,
            target_candidate: target,
            movement,
        }
    }

    /// The distance travelled between the two candidates, when known.
    ///
    /// Covers the remainder of the source's edge, any route between the
    /// edges, and the offset into the target's edge.
    pub fn route_length(&self) -> Option<f64> {
        let source = self.source_candidate;
        let target = self.target_candidate;

        match self.movement {
            Movement::Enter => Some(target?.offset),
            Movement::Exit => Some(source?.remaining),
            Movement::Along => Some((target?.offset - source?.offset).abs()),
            Movement::Adjacent => Some(source?.remaining + target?.offset),
            Movement::Routed { length, .. } => Some(source?.remaining + length + target?.offset),
            Movement::Unreachable => None,
        }
    }
}
