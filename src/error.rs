use crate::topology::BuildError;
use crate::transition::MatchError;

use thiserror::Error;

/// The crate-level error, for callers which both build and match
/// and wish to propagate a single error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to build topology: {0}")]
    Build(BuildError),

    #[error("failed to match trace: {0}")]
    Match(MatchError),
}

crate::impl_err!(BuildError, Build);
crate::impl_err!(MatchError, Match);

pub type Result<T> = std::result::Result<T, Error>;
