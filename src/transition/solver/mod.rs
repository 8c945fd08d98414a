#[doc(hidden)]
pub mod reconstruct;
#[doc(hidden)]
pub mod viterbi;

#[doc(inline)]
pub use reconstruct::*;
#[doc(inline)]
pub use viterbi::*;
