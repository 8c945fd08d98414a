use crate::spatial::vector::heading;
use crate::spatial::{GeometryKernel, Vector};
use crate::transition::{MatchConfig, MatchError};

use geo::{LineString, Point};
use log::{debug, trace};
use rand::Rng;

/// A point taken from a trace to be matched, with its direction of travel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub position: Point,
    pub direction: Vector,

    /// How far along the trace the sample was taken.
    pub offset: f64,
}

/// Takes sparse samples along a trace.
///
/// Samples are spaced by the configured increment, and the first and last
/// points of the trace are always sampled. Around a corner of the trace the
/// direction of travel is ambiguous, so samples falling within `scope` of a
/// corner are moved along the trace, within a window that grows with each
/// attempt. Once the attempts are exhausted the sample is accepted at the far
/// edge of the window.
pub struct Sampler<'a, K>
where
    K: GeometryKernel,
{
    kernel: &'a K,
    config: &'a MatchConfig,
}

impl<'a, K> Sampler<'a, K>
where
    K: GeometryKernel,
{
    pub fn new(kernel: &'a K, config: &'a MatchConfig) -> Self {
        Sampler { kernel, config }
    }

    /// The interior vertices retained when the trace is simplified.
    pub fn corners(&self, trace: &LineString) -> Vec<Point> {
        let simplified = self.kernel.simplify(trace, self.config.corner_tolerance);
        let count = simplified.0.len();

        simplified
            .0
            .into_iter()
            .skip(1)
            .take(count.saturating_sub(2))
            .map(Point)
            .collect()
    }

    fn near_corner(&self, position: Point, corners: &[Point]) -> bool {
        corners
            .iter()
            .any(|corner| self.kernel.distance(position, *corner) < self.config.scope)
    }

    /// The direction of travel through `offset`, taken across a
    /// short span either side of it.
    fn direction(&self, trace: &LineString, offset: f64, length: f64) -> Option<Vector> {
        let span = self.config.increment / 4.0;
        let behind = self.kernel.interpolate(trace, (offset - span).max(0.0))?;
        let ahead = self.kernel.interpolate(trace, (offset + span).min(length))?;

        Vector::between(behind.0, ahead.0)
            .unit()
            .or_else(|| heading(trace, offset))
    }

    fn sample(&self, trace: &LineString, offset: f64, length: f64) -> Option<Sample> {
        Some(Sample {
            position: self.kernel.interpolate(trace, offset)?,
            direction: self.direction(trace, offset, length)?,
            offset,
        })
    }

    /// Finds an offset near `offset` whose position is clear of every corner.
    ///
    /// Moved offsets are kept at least half an increment beyond `floor`,
    /// the offset of the previous sample.
    fn relocate<R: Rng>(
        &self,
        trace: &LineString,
        offset: f64,
        floor: f64,
        corners: &[Point],
        rng: &mut R,
    ) -> f64 {
        let step = (self.config.increment * self.config.jitter_factor).max(f64::EPSILON);
        let reach = step.max(2.0 * self.config.scope);

        let mut window = step;
        let mut chosen = offset;

        for attempt in 0..self.config.max_retries {
            let clear = self
                .kernel
                .interpolate(trace, chosen)
                .is_some_and(|position| !self.near_corner(position, corners));

            if clear {
                if attempt > 0 {
                    trace!("Moved sample from {offset:.1} to {chosen:.1} after {attempt} attempts");
                }

                return chosen;
            }

            window = (window + step).min(reach);
            let low = (offset - window).max(floor + self.config.increment / 2.0);
            let high = offset + window;

            chosen = if low < high {
                rng.random_range(low..high)
            } else {
                high
            };
        }

        debug!("Accepting sample at {:.1} beside a corner", offset + window);
        offset + window
    }

    /// Samples `trace`, drawing any moves around corners from `rng`.
    pub fn samples<R: Rng>(
        &self,
        trace: &LineString,
        rng: &mut R,
    ) -> Result<Vec<Sample>, MatchError> {
        let length = self.kernel.length(trace);
        if trace.0.len() < 2 || !length.is_finite() || length <= f64::EPSILON {
            return Err(MatchError::DegenerateTrace);
        }

        let corners = self.corners(trace);
        let mut samples = Vec::new();

        let first = self
            .sample(trace, 0.0, length)
            .ok_or(MatchError::DegenerateTrace)?;
        samples.push(first);

        let mut previous = 0.0;
        loop {
            let offset = self.relocate(
                trace,
                previous + self.config.increment,
                previous,
                &corners,
                rng,
            );
            if offset >= length {
                break;
            }

            if let Some(sample) = self.sample(trace, offset, length) {
                samples.push(sample);
            }

            previous = offset;
        }

        let last = self
            .sample(trace, length, length)
            .ok_or(MatchError::DegenerateTrace)?;
        if samples.last().is_none_or(|sample| sample.offset < length) {
            samples.push(last);
        }

        debug!(
            "Sampled {} points along a trace of length {length:.1} with {} corners",
            samples.len(),
            corners.len()
        );

        Ok(samples)
    }
}
