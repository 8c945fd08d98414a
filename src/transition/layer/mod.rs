#[doc(hidden)]
pub mod generator;
#[doc(hidden)]
pub mod sample;

#[doc(inline)]
pub use generator::CandidateGenerator;
#[doc(inline)]
pub use sample::{Sample, Sampler};
