//! Matches traces onto a built [`Topology`](crate::graph::Topology).
//!
//! A trace is reduced to sparse samples, each of which is projected onto
//! the nearby edges heading its way. The resulting layers of candidates
//! are searched for the sequence of least cost, weighing how far each
//! candidate lies from its sample against how plausibly the topology can
//! be travelled between consecutive candidates.

pub mod candidate;
pub mod costing;
pub mod layer;
pub mod primitives;
pub mod solver;

#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod matcher;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use matcher::*;
#[doc(inline)]
pub use primitives::{MatchError, PriorityQueue, Sequence, SequenceCache};
