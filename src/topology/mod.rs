//! Infers the topology of a network from the traces travelled over it.
//!
//! The traces are thickened into a single region, which is triangulated
//! and partitioned into cells. The skeleton running through the cells
//! becomes the topology, once its straight runs have been simplified.

#[doc(hidden)]
pub mod cell;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod region;
#[doc(hidden)]
pub mod skeleton;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use cell::{Cell, DualGraph, Partition, Shared};
#[doc(inline)]
pub use config::BuildConfig;
#[doc(inline)]
pub use error::BuildError;
#[doc(inline)]
pub use skeleton::{Skeleton, SkeletonEdge};

use crate::graph::Topology;
use crate::mesh::{ConstrainedTriangulator, Triangulator};
use crate::spatial::{GeometryKernel, Planar};

use geo::{LineString, MultiPolygon, Point};
use log::{info, warn};
use measure_time::info_time;

/// The most rounds of hub collapse and tidying applied to a partition.
const MAX_TIDY_ROUNDS: usize = 8;

/// Builds a [`Topology`] from a set of traces.
///
/// ```rust,ignore
/// let topology = TopologyBuilder::new(BuildConfig::default())
///     .build(&traces, &[])?;
/// ```
pub struct TopologyBuilder<K = Planar, T = ConstrainedTriangulator>
where
    K: GeometryKernel,
    T: Triangulator,
{
    pub config: BuildConfig,

    kernel: K,
    triangulator: T,
}

impl TopologyBuilder {
    pub fn new(config: BuildConfig) -> Self {
        TopologyBuilder {
            triangulator: ConstrainedTriangulator::default()
                .with_max_additional_vertices(config.max_steiner_vertices),
            kernel: Planar,
            config,
        }
    }
}

impl<K, T> TopologyBuilder<K, T>
where
    K: GeometryKernel,
    T: Triangulator,
{
    /// Creates a builder from an alternative geometry backend and triangulator.
    pub fn with_backend(config: BuildConfig, kernel: K, triangulator: T) -> Self {
        TopologyBuilder {
            config,
            kernel,
            triangulator,
        }
    }

    /// Thickens the traces into the region the network occupies.
    pub fn region(&self, traces: &[LineString]) -> Result<MultiPolygon, BuildError> {
        self.config.validate()?;
        region::validate(&self.kernel, traces)?;
        region::thicken(&self.kernel, traces, &self.config)
    }

    /// Builds the topology of the network described by `traces`.
    ///
    /// Each of the `anchors` is joined to the nearest point of the
    /// network by a terminal edge.
    pub fn build(&self, traces: &[LineString], anchors: &[Point]) -> Result<Topology, BuildError> {
        info_time!("build topology");

        let region = self.region(traces)?;
        let forced = region::endpoints(traces)
            .into_iter()
            .filter(|coord| {
                let inside = region
                    .iter()
                    .any(|polygon| self.kernel.contains(polygon, &Point(*coord)));

                if !inside {
                    warn!("Trace endpoint {coord:?} lies outside the simplified region");
                }

                inside
            })
            .collect::<Vec<_>>();

        let mesh = self
            .triangulator
            .triangulate(&region, &forced, self.config.max_area())?;

        info!(
            "Triangulated region into {} triangles over {} vertices",
            mesh.triangles.len(),
            mesh.vertices.len()
        );

        let mut partition = Partition::new(&mesh);
        partition.prune();

        for _ in 0..MAX_TIDY_ROUNDS {
            let collapsed = partition.collapse_hubs();
            let tidied = partition.tidy(&self.kernel, self.config.tidy_tolerance);

            if collapsed + tidied == 0 {
                break;
            }
        }

        let mut skeleton = Skeleton::extract(&self.kernel, &partition);
        skeleton.anchor(anchors);
        skeleton.simplify(&self.kernel, self.config.turn_threshold, self.config.thickness);

        Ok(skeleton.into_topology(&self.kernel, self.config.tolerance()))
    }
}
