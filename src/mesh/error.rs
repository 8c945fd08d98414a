use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriangulationError {
    #[error("could not insert vertex into triangulation: {0}")]
    Insertion(String),

    #[error("region produced no triangles")]
    Empty,
}
