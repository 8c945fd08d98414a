//! Planar geometry primitives used by both the topology builder
//! and the matcher.
//!
//! All coordinates are planar (projected) and all distances are
//! Euclidean, in the unit of the input traces.

#[doc(hidden)]
pub mod index;
#[doc(hidden)]
pub mod kernel;
#[doc(hidden)]
pub mod vector;


#[doc(inline)]
pub use index::SpatialIndex;
#[doc(inline)]
pub use kernel::{GeometryKernel, Planar, Projection};
#[doc(inline)]
pub use vector::Vector;
