#![doc = include_str!("../README.md")]

pub mod error;
pub mod graph;
pub mod mesh;
pub mod spatial;
pub mod topology;
pub mod transition;
pub mod util;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use graph::{EdgeKey, Topology, TopologyRecords};
#[doc(inline)]
pub use topology::{BuildConfig, BuildError, TopologyBuilder};
#[doc(inline)]
pub use transition::{MatchConfig, MatchError, MatchedRoute, Matcher};
