use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("trace has no length")]
    DegenerateTrace,

    #[error("no candidate edges lie near the trace")]
    NoCandidates,

    #[error("could not find a path through the candidate graph")]
    NoPathFound,

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
