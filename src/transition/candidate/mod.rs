pub mod entry;
pub mod graph;

#[doc(inline)]
pub use entry::*;
#[doc(inline)]
pub use graph::*;
