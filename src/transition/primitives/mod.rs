pub mod cache;
pub use cache::*;

pub mod error;
pub use error::*;

pub mod queue;
pub use queue::PriorityQueue;

#[cfg(test)]
mod test;
