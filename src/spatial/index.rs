use geo::Point;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// Bounding-box queries over indexed geometries.
pub trait SpatialIndex {
    type Item;

    /// Returns an unsorted iterator of the items whose bounding box
    /// intersects the square of half-width `radius` around `point`.
    ///
    /// ### Note
    /// This function implements a square-scan, it may yield items
    /// which are further than `radius` from the point. Callers
    /// must refine the result with an exact distance.
    fn scan<'a>(&'a self, point: &Point, radius: f64) -> impl Iterator<Item = &'a Self::Item>
    where
        Self::Item: 'a;

    /// The single item closest to `point`, should one exist.
    fn nearest(&self, point: &Point) -> Option<&Self::Item>;
}

impl<T> SpatialIndex for RTree<T>
where
    T: RTreeObject<Envelope = AABB<Point>> + PointDistance,
{
    type Item = T;

    #[inline]
    fn scan<'a>(&'a self, point: &Point, radius: f64) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        let bbox = AABB::from_corners(
            Point::new(point.x() - radius, point.y() - radius),
            Point::new(point.x() + radius, point.y() + radius),
        );

        self.locate_in_envelope_intersecting(&bbox)
    }

    #[inline]
    fn nearest(&self, point: &Point) -> Option<&T> {
        self.nearest_neighbor(point)
    }
}
