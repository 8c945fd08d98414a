use crate::mesh::{Mesh, TriangulationError, Triangulator};

use geo::{Coord, LineString, MultiPolygon};
use log::{debug, warn};
use measure_time::debug_time;
use spade::handles::FixedVertexHandle;
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, Point2, RefinementParameters, Triangulation,
};

const DEFAULT_MAX_ADDITIONAL_VERTICES: usize = 250_000;

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// A [`Triangulator`] producing an area-refined constrained Delaunay
/// triangulation using `spade`.
///
/// Every ring of the region becomes a chain of constraint edges. Faces
/// outside the exterior rings, or inside the holes, are excluded from
/// the resulting [`Mesh`].
#[derive(Clone, Copy, Debug)]
pub struct ConstrainedTriangulator {
    /// An upper bound on the vertices refinement may insert, so that
    /// degenerate inputs cannot refine indefinitely.
    pub max_additional_vertices: usize,
}

impl Default for ConstrainedTriangulator {
    fn default() -> Self {
        Self {
            max_additional_vertices: DEFAULT_MAX_ADDITIONAL_VERTICES,
        }
    }
}

impl ConstrainedTriangulator {
    pub fn with_max_additional_vertices(self, max_additional_vertices: usize) -> Self {
        Self {
            max_additional_vertices,
        }
    }

    #[inline]
    fn insert(cdt: &mut Cdt, coord: &Coord) -> Result<FixedVertexHandle, TriangulationError> {
        cdt.insert(Point2::new(coord.x, coord.y))
            .map_err(|err| TriangulationError::Insertion(format!("{err:?}")))
    }

    /// Inserts the ring as a closed chain of constraint edges.
    ///
    /// Segments which would cross an existing constraint are skipped,
    /// as a simplified ring may touch a neighbouring ring.
    fn insert_ring(cdt: &mut Cdt, ring: &LineString) -> Result<usize, TriangulationError> {
        let handles = ring
            .coords()
            .map(|coord| Self::insert(cdt, coord))
            .collect::<Result<Vec<_>, _>>()?;

        let mut skipped = 0;
        for pair in handles.windows(2) {
            if let [from, to] = pair {
                if from == to {
                    continue;
                }

                if cdt.can_add_constraint(*from, *to) {
                    cdt.add_constraint(*from, *to);
                } else {
                    skipped += 1;
                }
            }
        }

        Ok(skipped)
    }
}

impl Triangulator for ConstrainedTriangulator {
    fn triangulate(
        &self,
        region: &MultiPolygon,
        forced: &[Coord],
        max_area: f64,
    ) -> Result<Mesh, TriangulationError> {
        debug_time!("triangulate region");
        let mut cdt = Cdt::new();

        // Disjoint polygons share a single triangulation, the exclusion of
        // outer faces keeps the space between them out of the mesh.
        let mut skipped = 0;
        for polygon in region {
            skipped += Self::insert_ring(&mut cdt, polygon.exterior())?;
            for interior in polygon.interiors() {
                skipped += Self::insert_ring(&mut cdt, interior)?;
            }
        }

        if skipped > 0 {
            warn!("Skipped {skipped} boundary segments which crossed existing constraints");
        }

        let forced = forced
            .iter()
            .map(|coord| Self::insert(&mut cdt, coord).map(|handle| handle.index()))
            .collect::<Result<Vec<_>, _>>()?;

        let parameters = RefinementParameters::<f64>::new()
            .exclude_outer_faces(true)
            .with_angle_limit(AngleLimit::from_deg(0.0))
            .with_max_allowed_area(max_area)
            .with_max_additional_vertices(self.max_additional_vertices);

        let result = cdt.refine(parameters);
        if !result.refinement_complete {
            warn!(
                "Refinement stopped at the vertex limit ({}), some triangles exceed the area bound",
                self.max_additional_vertices
            );
        }

        let mut vertices = vec![Coord { x: 0.0, y: 0.0 }; cdt.num_vertices()];
        for vertex in cdt.vertices() {
            let position = vertex.position();
            vertices[vertex.fix().index()] = Coord {
                x: position.x,
                y: position.y,
            };
        }

        let triangles = cdt
            .inner_faces()
            .filter(|face| !result.excluded_faces.contains(&face.fix()))
            .map(|face| face.vertices().map(|vertex| vertex.fix().index()))
            .collect::<Vec<_>>();

        let segments = cdt
            .undirected_edges()
            .filter(|edge| cdt.is_constraint_edge(edge.fix()))
            .map(|edge| edge.vertices().map(|vertex| vertex.fix().index()))
            .collect::<Vec<_>>();

        if triangles.is_empty() {
            return Err(TriangulationError::Empty);
        }

        debug!(
            "Triangulated {} vertices into {} triangles with {} boundary segments",
            vertices.len(),
            triangles.len(),
            segments.len()
        );

        Ok(Mesh::new(vertices, triangles, segments, forced))
    }
}
