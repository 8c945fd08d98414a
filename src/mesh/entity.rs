use crate::mesh::TriangulationError;

use geo::{Coord, MultiPolygon, Point};

/// A triangulated region.
///
/// Vertices are stored once and referenced by index from the
/// [triangles](#field.triangles) and boundary [segments](#field.segments).
/// Triangles are wound counter-clockwise.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Coord>,
    pub triangles: Vec<[usize; 3]>,

    /// The constraint segments forming the exterior and hole boundaries.
    pub segments: Vec<[usize; 2]>,

    /// The vertex index of each forced point, in the order the points were given.
    pub forced: Vec<usize>,

    boundary: Vec<bool>,
    is_forced: Vec<bool>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Coord>,
        triangles: Vec<[usize; 3]>,
        segments: Vec<[usize; 2]>,
        forced: Vec<usize>,
    ) -> Self {
        let mut boundary = vec![false; vertices.len()];
        segments.iter().flatten().for_each(|v| boundary[*v] = true);

        let mut is_forced = vec![false; vertices.len()];
        forced.iter().for_each(|v| is_forced[*v] = true);

        Mesh {
            vertices,
            triangles,
            segments,
            forced,
            boundary,
            is_forced,
        }
    }

    /// Whether the vertex lies upon a boundary segment.
    #[inline]
    pub fn is_boundary(&self, vertex: usize) -> bool {
        self.boundary.get(vertex).copied().unwrap_or(false)
    }

    /// Whether the vertex plays no boundary role. These are the vertices
    /// introduced by refinement, and the forced points.
    #[inline]
    pub fn is_interior(&self, vertex: usize) -> bool {
        !self.is_boundary(vertex)
    }

    #[inline]
    pub fn is_forced(&self, vertex: usize) -> bool {
        self.is_forced.get(vertex).copied().unwrap_or(false)
    }

    #[inline]
    pub fn point(&self, vertex: usize) -> Point {
        Point(self.vertices[vertex])
    }

    /// The total area of all triangles.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|[a, b, c]| {
                let (a, b, c) = (self.vertices[*a], self.vertices[*b], self.vertices[*c]);
                ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2.0
            })
            .sum()
    }
}

/// Triangulates a planar region with holes.
pub trait Triangulator {
    /// Triangulates every polygon of `region`, inserting each of the
    /// `forced` points as a vertex, such that no triangle exceeds `max_area`.
    fn triangulate(
        &self,
        region: &MultiPolygon,
        forced: &[Coord],
        max_area: f64,
    ) -> Result<Mesh, TriangulationError>;
}
