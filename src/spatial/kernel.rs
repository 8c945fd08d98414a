use geo::{
    BooleanOps, Buffer, Centroid, Contains, Distance, Euclidean, Length, LineInterpolatePoint,
    LineLocatePoint, LineString, MultiPolygon, Point, Polygon, Simplify,
};

/// The position of a point once projected onto a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// The closest position upon the polyline.
    pub position: Point,

    /// How far along the polyline the position lies, from its start.
    pub offset: f64,

    /// The perpendicular distance between the projected point and the polyline.
    pub distance: f64,
}

/// The planar geometry operations the builder and matcher depend upon.
///
/// The algorithms are written against this trait so that the geometry
/// backend may be swapped. [`Planar`] binds the operations to the `geo` crate.
pub trait GeometryKernel {
    /// Thickens the polyline into the region within `distance` of it.
    fn buffer(&self, line: &LineString, distance: f64) -> MultiPolygon;

    /// The union of two regions.
    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> MultiPolygon;

    /// Simplifies a polyline, retaining its endpoints.
    fn simplify(&self, line: &LineString, tolerance: f64) -> LineString;

    /// Simplifies a polygon's exterior and interior rings.
    fn simplify_polygon(&self, polygon: &Polygon, tolerance: f64) -> Polygon;

    fn distance(&self, a: Point, b: Point) -> f64;

    /// The total length of the polyline.
    fn length(&self, line: &LineString) -> f64;

    /// Projects `point` onto the closest position of `line`.
    fn project(&self, line: &LineString, point: &Point) -> Option<Projection>;

    /// The position `offset` units along `line`, clamped to its ends.
    fn interpolate(&self, line: &LineString, offset: f64) -> Option<Point>;

    fn contains(&self, polygon: &Polygon, point: &Point) -> bool;

    fn centroid(&self, polygon: &Polygon) -> Option<Point>;
}

/// A [`GeometryKernel`] over planar coordinates, backed by `geo`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Planar;

impl GeometryKernel for Planar {
    fn buffer(&self, line: &LineString, distance: f64) -> MultiPolygon {
        line.buffer(distance)
    }

    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> MultiPolygon {
        a.union(b)
    }

    fn simplify(&self, line: &LineString, tolerance: f64) -> LineString {
        line.simplify(tolerance)
    }

    fn simplify_polygon(&self, polygon: &Polygon, tolerance: f64) -> Polygon {
        polygon.simplify(tolerance)
    }

    #[inline]
    fn distance(&self, a: Point, b: Point) -> f64 {
        Euclidean.distance(a, b)
    }

    fn length(&self, line: &LineString) -> f64 {
        Euclidean.length(line)
    }

    fn project(&self, line: &LineString, point: &Point) -> Option<Projection> {
        let length = self.length(line);
        let fraction = line.line_locate_point(point)?;
        let position = line.line_interpolate_point(fraction)?;

        Some(Projection {
            position,
            offset: fraction * length,
            distance: self.distance(position, *point),
        })
    }

    fn interpolate(&self, line: &LineString, offset: f64) -> Option<Point> {
        let length = self.length(line);
        if length <= f64::EPSILON {
            return line.points().next();
        }

        line.line_interpolate_point((offset / length).clamp(0.0, 1.0))
    }

    fn contains(&self, polygon: &Polygon, point: &Point) -> bool {
        polygon.contains(point)
    }

    fn centroid(&self, polygon: &Polygon) -> Option<Point> {
        polygon.centroid()
    }
}
