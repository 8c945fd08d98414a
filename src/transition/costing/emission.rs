use crate::transition::Strategy;

use geo::Point;

pub trait EmissionStrategy: for<'a> Strategy<EmissionContext<'a>> {}
impl<T> EmissionStrategy for T where T: for<'a> Strategy<EmissionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct EmissionContext<'a> {
    /// The proposed (candidate) position to be matched onto.
    ///
    /// This belongs to the topology, and is not provided
    /// as input to the match query.
    pub candidate_position: &'a Point,

    /// The sampled position the costing method is matching.
    pub source_position: &'a Point,
}

impl<'a> EmissionContext<'a> {
    pub fn new(candidate: &'a Point, source: &'a Point) -> Self {
        Self {
            candidate_position: candidate,
            source_position: source,
        }
    }
}
