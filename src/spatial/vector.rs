use geo::{Coord, LineString};

/// A planar direction or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// The displacement from `from` to `to`.
    #[inline]
    pub fn between(from: Coord, to: Coord) -> Self {
        Vector {
            x: to.x - from.x,
            y: to.y - from.y,
        }
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        (self.x * other.x) + (self.y * other.y)
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Normalises the vector. Returns `None` for a zero-length vector,
    /// which has no direction.
    pub fn unit(self) -> Option<Vector> {
        let norm = self.norm();
        if norm <= f64::EPSILON || !norm.is_finite() {
            return None;
        }

        Some(Vector {
            x: self.x / norm,
            y: self.y / norm,
        })
    }
}

/// The unit direction of the segment of `line` which contains the
/// position `offset` units along it.
///
/// Zero-length segments are skipped, so a line which doubles back on a
/// repeated coordinate still yields the direction of travel. Offsets
/// past either end resolve to the first or last segment.
pub fn heading(line: &LineString, offset: f64) -> Option<Vector> {
    let mut travelled = 0.0;
    let mut last = None;

    for segment in line.lines() {
        let direction = Vector::between(segment.start, segment.end);
        let length = direction.norm();
        if length <= f64::EPSILON {
            continue;
        }

        last = direction.unit();
        travelled += length;
        if travelled >= offset {
            return last;
        }
    }

    last
}
