use crate::graph::{EdgeKey, Topology, TopologyEdge};
use crate::spatial::SpatialIndex;

use geo::{BoundingRect, Closest, ClosestPoint, Distance, Euclidean, LineString, Point};
use rstar::{AABB, Envelope, PointDistance, RTreeObject};

/// An edge geometry, held within the topology's spatial index.
#[derive(Clone, Debug)]
pub struct IndexedEdge {
    pub key: EdgeKey,
    pub geometry: LineString,
    envelope: AABB<Point>,
}

impl IndexedEdge {
    pub fn new(edge: &TopologyEdge) -> Self {
        let envelope = match edge.geometry.bounding_rect() {
            Some(rect) => AABB::from_corners(rect.min().into(), rect.max().into()),
            None => AABB::new_empty(),
        };

        IndexedEdge {
            key: edge.key,
            geometry: edge.geometry.clone(),
            envelope,
        }
    }
}

impl RTreeObject for IndexedEdge {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for IndexedEdge {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        match self.geometry.closest_point(point) {
            Closest::Intersection(_) => 0.0,
            Closest::SinglePoint(closest) => Euclidean.distance(closest, *point).powi(2),
            Closest::Indeterminate => f64::INFINITY,
        }
    }
}

impl Topology {
    /// The edges whose bounding box lies within the square of
    /// half-width `radius` around `point`, in both directions.
    pub fn scan_edges(&self, point: &Point, radius: f64) -> impl Iterator<Item = &TopologyEdge> {
        self.index
            .scan(point, radius)
            .filter_map(|indexed| self.edge(&indexed.key))
    }

    /// The edge whose geometry passes closest to `point`.
    pub fn nearest_edge(&self, point: &Point) -> Option<&TopologyEdge> {
        self.index
            .nearest(point)
            .and_then(|indexed| self.edge(&indexed.key))
    }
}
