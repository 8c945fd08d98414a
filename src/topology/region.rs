use crate::spatial::GeometryKernel;
use crate::topology::{BuildConfig, BuildError};

use geo::{Coord, LineString, MultiPolygon, Polygon};
use log::{debug, info};
use measure_time::debug_time;

/// Rejects traces which cannot be buffered: those with fewer than
/// two points, or whose points all coincide.
pub fn validate<K: GeometryKernel>(kernel: &K, traces: &[LineString]) -> Result<(), BuildError> {
    if traces.is_empty() {
        return Err(BuildError::NoTraces);
    }

    for (index, trace) in traces.iter().enumerate() {
        let finite = trace.coords().all(|coord| coord.x.is_finite() && coord.y.is_finite());
        if trace.0.len() < 2 || !finite || kernel.length(trace) <= f64::EPSILON {
            return Err(BuildError::DegenerateTrace(index));
        }
    }

    Ok(())
}

/// The first and last point of every trace.
pub fn endpoints(traces: &[LineString]) -> Vec<Coord> {
    traces
        .iter()
        .flat_map(|trace| [trace.0.first(), trace.0.last()])
        .flatten()
        .copied()
        .collect()
}

/// Thickens every trace into a corridor of the configured width,
/// returning their union.
///
/// Traces which never come near one another produce disjoint polygons,
/// so the region may have more than one. Small holes enclosed by the
/// corridors are filled and the rings simplified.
pub fn thicken<K: GeometryKernel>(
    kernel: &K,
    traces: &[LineString],
    config: &BuildConfig,
) -> Result<MultiPolygon, BuildError> {
    debug_time!("thicken traces");

    let radius = config.thickness / 2.0;
    let region = traces
        .iter()
        .map(|trace| kernel.buffer(trace, radius))
        .fold(MultiPolygon::new(vec![]), |region, buffer| {
            kernel.union(&region, &buffer)
        });

    let region = region
        .into_iter()
        .map(|polygon| fill_holes(kernel, polygon, config.min_inner_perimeter))
        .map(|polygon| kernel.simplify_polygon(&polygon, config.tolerance()))
        .filter_map(discard_degenerate)
        .collect::<Vec<_>>();

    if region.is_empty() {
        return Err(BuildError::EmptyRegion);
    }

    let holes = region.iter().map(|polygon| polygon.interiors().len()).sum::<usize>();
    info!(
        "Thickened {} traces into {} polygon(s) with {holes} hole(s)",
        traces.len(),
        region.len()
    );

    Ok(MultiPolygon::new(region))
}

fn fill_holes<K: GeometryKernel>(kernel: &K, polygon: Polygon, min_perimeter: f64) -> Polygon {
    let (exterior, interiors) = polygon.into_inner();
    let before = interiors.len();

    let interiors = interiors
        .into_iter()
        .filter(|ring| kernel.length(ring) >= min_perimeter)
        .collect::<Vec<_>>();

    if interiors.len() < before {
        debug!("Filled {} hole(s)", before - interiors.len());
    }

    Polygon::new(exterior, interiors)
}

/// Drops rings which simplification reduced below a triangle.
fn discard_degenerate(polygon: Polygon) -> Option<Polygon> {
    if polygon.exterior().0.len() < 4 {
        return None;
    }

    let (exterior, interiors) = polygon.into_inner();
    let interiors = interiors
        .into_iter()
        .filter(|ring| ring.0.len() >= 4)
        .collect();

    Some(Polygon::new(exterior, interiors))
}
