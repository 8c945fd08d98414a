use crate::mesh::TriangulationError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("no traces were given")]
    NoTraces,

    #[error("trace {0} has no length")]
    DegenerateTrace(usize),

    #[error("buffered traces enclose no area")]
    EmptyRegion,

    #[error("could not triangulate region: {0}")]
    Triangulation(TriangulationError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

impl From<TriangulationError> for BuildError {
    fn from(value: TriangulationError) -> Self {
        BuildError::Triangulation(value)
    }
}
