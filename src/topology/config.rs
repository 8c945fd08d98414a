use crate::topology::BuildError;

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};

/// The default corridor width, in the unit of the traces.
pub const DEFAULT_THICKNESS: f64 = 20.0;

/// Holes whose perimeter is shorter than this are filled.
pub const DEFAULT_MIN_INNER_PERIMETER: f64 = 150.0;

/// Two edges meeting at a node bend sharply once the angle between
/// their directions exceeds 45 degrees.
pub const DEFAULT_TURN_THRESHOLD: f64 = FRAC_PI_4;

pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = 0.1;
pub const DEFAULT_MAX_AREA_FACTOR: f64 = 1.0;
pub const DEFAULT_TIDY_TOLERANCE: f64 = 0.25;
pub const DEFAULT_MAX_STEINER_VERTICES: usize = 250_000;

/// Parameters of a [`TopologyBuilder`](crate::topology::TopologyBuilder).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// The width of the corridor each trace is thickened into. Traces
    /// closer than this to one another are considered the same path.
    pub thickness: f64,

    /// The perimeter below which a hole enclosed by traces is filled in.
    pub min_inner_perimeter: f64,

    /// The angle, in radians, above which a node joining two edges
    /// is kept as a turn rather than spliced out.
    pub turn_threshold: f64,

    /// The simplification tolerance of the region boundary and the final
    /// edge geometries, as a fraction of the [thickness](#structfield.thickness).
    pub simplify_tolerance: f64,

    /// The largest triangle area permitted, as a multiple of the squared thickness.
    pub max_area_factor: f64,

    /// How close, as a fraction of its circumradius, a triangle's
    /// circumcenter must lie to a neighbouring cell's vertex for the
    /// two to be merged.
    pub tidy_tolerance: f64,

    /// The most vertices the triangulation may add during refinement.
    pub max_steiner_vertices: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            thickness: DEFAULT_THICKNESS,
            min_inner_perimeter: DEFAULT_MIN_INNER_PERIMETER,
            turn_threshold: DEFAULT_TURN_THRESHOLD,
            simplify_tolerance: DEFAULT_SIMPLIFY_TOLERANCE,
            max_area_factor: DEFAULT_MAX_AREA_FACTOR,
            tidy_tolerance: DEFAULT_TIDY_TOLERANCE,
            max_steiner_vertices: DEFAULT_MAX_STEINER_VERTICES,
        }
    }
}

impl BuildConfig {
    pub fn with_thickness(self, thickness: f64) -> Self {
        Self { thickness, ..self }
    }

    pub fn with_min_inner_perimeter(self, min_inner_perimeter: f64) -> Self {
        Self {
            min_inner_perimeter,
            ..self
        }
    }

    pub fn with_turn_threshold(self, turn_threshold: f64) -> Self {
        Self {
            turn_threshold,
            ..self
        }
    }

    pub fn with_simplify_tolerance(self, simplify_tolerance: f64) -> Self {
        Self {
            simplify_tolerance,
            ..self
        }
    }

    pub fn with_max_area_factor(self, max_area_factor: f64) -> Self {
        Self {
            max_area_factor,
            ..self
        }
    }

    pub fn with_tidy_tolerance(self, tidy_tolerance: f64) -> Self {
        Self {
            tidy_tolerance,
            ..self
        }
    }

    pub fn with_max_steiner_vertices(self, max_steiner_vertices: usize) -> Self {
        Self {
            max_steiner_vertices,
            ..self
        }
    }

    /// The largest area of any single triangle of the mesh.
    #[inline]
    pub fn max_area(&self) -> f64 {
        self.thickness * self.thickness * self.max_area_factor
    }

    /// The absolute tolerance used to simplify geometry.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.thickness * self.simplify_tolerance
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if !(self.thickness.is_finite() && self.thickness > 0.0) {
            return Err(BuildError::InvalidConfig("thickness must be positive"));
        }

        if !(self.min_inner_perimeter.is_finite() && self.min_inner_perimeter >= 0.0) {
            return Err(BuildError::InvalidConfig(
                "minimum inner perimeter must not be negative",
            ));
        }

        if !(self.turn_threshold > 0.0 && self.turn_threshold <= PI) {
            return Err(BuildError::InvalidConfig(
                "turn threshold must lie within (0, pi]",
            ));
        }

        if !(self.simplify_tolerance.is_finite() && self.simplify_tolerance >= 0.0) {
            return Err(BuildError::InvalidConfig(
                "simplify tolerance must not be negative",
            ));
        }

        if !(self.max_area_factor.is_finite() && self.max_area_factor > 0.0) {
            return Err(BuildError::InvalidConfig("max area factor must be positive"));
        }

        if !(self.tidy_tolerance.is_finite() && self.tidy_tolerance >= 0.0) {
            return Err(BuildError::InvalidConfig(
                "tidy tolerance must not be negative",
            ));
        }

        Ok(())
    }
}
