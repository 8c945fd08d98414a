//! Constrained triangulation of the buffered region.

#[doc(hidden)]
pub mod constrained;
#[doc(hidden)]
pub mod entity;
#[doc(hidden)]
pub mod error;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use constrained::ConstrainedTriangulator;
#[doc(inline)]
pub use entity::{Mesh, Triangulator};
#[doc(inline)]
pub use error::TriangulationError;
