//! The topology graph produced by the builder and consumed by the matcher.

#[doc(hidden)]
pub mod entry;
#[doc(hidden)]
pub mod item;
#[doc(hidden)]
pub mod record;
#[doc(hidden)]
pub mod route;
#[doc(hidden)]
pub mod scan;


#[doc(inline)]
pub use entry::{EdgeKey, TopologyEdge, TopologyNode};
#[doc(inline)]
pub use item::{Topology, TopologyGraph, connect};
#[doc(inline)]
pub use record::{EdgeRecord, NodeRecord, TopologyRecords};
#[doc(inline)]
pub use scan::IndexedEdge;
