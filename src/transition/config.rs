use crate::transition::MatchError;

use serde::{Deserialize, Serialize};

/// The spacing between samples taken along a trace.
pub const DEFAULT_INCREMENT: f64 = 50.0;

/// The radius within which candidate edges are searched for.
pub const DEFAULT_SCOPE: f64 = 50.0;

/// The standard deviation of measurement error.
pub const DEFAULT_SIGMA_Z: f64 = 4.07;

pub const DEFAULT_BETA: f64 = 3.0;
pub const DEFAULT_SWITCH_BIAS: f64 = 0.001;
pub const DEFAULT_CORNER_TOLERANCE: f64 = 10.0;
pub const DEFAULT_MAX_RETRIES: usize = 20;
pub const DEFAULT_JITTER_FACTOR: f64 = 0.25;
pub const DEFAULT_BOUNCE_FACTOR: f64 = 4.0;

/// Parameters of a [`Matcher`](crate::transition::Matcher).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// The distance along the trace between consecutive samples.
    pub increment: f64,

    /// How far from a sample an edge may lie and remain a candidate.
    /// Samples within this distance of a corner of the trace are moved.
    pub scope: f64,

    /// The standard deviation of the distance between a measurement
    /// and its true position.
    pub sigma_z: f64,

    /// Scales the transition cost. Larger values tolerate a greater
    /// difference between route and straight-line distance.
    pub beta: f64,

    /// The cost added for each edge switched onto between two samples.
    pub switch_bias: f64,

    /// The simplification tolerance used to find the corners of a trace.
    pub corner_tolerance: f64,

    /// The attempts made to move a sample off a corner before it is
    /// accepted regardless.
    pub max_retries: usize,

    /// The initial half-width of the window a sample is moved within,
    /// as a fraction of the increment.
    pub jitter_factor: f64,

    /// Pairs of an edge and its reverse shorter than this multiple of the
    /// increment are dropped from matches, as the measurement jittered
    /// across them and back.
    pub bounce_factor: f64,

    /// Seeds the random moves of samples away from corners.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            increment: DEFAULT_INCREMENT,
            scope: DEFAULT_SCOPE,
            sigma_z: DEFAULT_SIGMA_Z,
            beta: DEFAULT_BETA,
            switch_bias: DEFAULT_SWITCH_BIAS,
            corner_tolerance: DEFAULT_CORNER_TOLERANCE,
            max_retries: DEFAULT_MAX_RETRIES,
            jitter_factor: DEFAULT_JITTER_FACTOR,
            bounce_factor: DEFAULT_BOUNCE_FACTOR,
            seed: 0,
        }
    }
}

impl MatchConfig {
    pub fn with_increment(self, increment: f64) -> Self {
        Self { increment, ..self }
    }

    pub fn with_scope(self, scope: f64) -> Self {
        Self { scope, ..self }
    }

    pub fn with_sigma_z(self, sigma_z: f64) -> Self {
        Self { sigma_z, ..self }
    }

    pub fn with_beta(self, beta: f64) -> Self {
        Self { beta, ..self }
    }

    pub fn with_switch_bias(self, switch_bias: f64) -> Self {
        Self {
            switch_bias,
            ..self
        }
    }

    pub fn with_corner_tolerance(self, corner_tolerance: f64) -> Self {
        Self {
            corner_tolerance,
            ..self
        }
    }

    pub fn with_max_retries(self, max_retries: usize) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    pub fn with_jitter_factor(self, jitter_factor: f64) -> Self {
        Self {
            jitter_factor,
            ..self
        }
    }

    pub fn with_bounce_factor(self, bounce_factor: f64) -> Self {
        Self {
            bounce_factor,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// The length below which an edge bounced across is dropped.
    #[inline]
    pub fn bounce_length(&self) -> f64 {
        self.increment * self.bounce_factor
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let positive = [
            (self.increment, "increment must be positive"),
            (self.scope, "scope must be positive"),
            (self.sigma_z, "sigma must be positive"),
            (self.beta, "beta must be positive"),
        ];

        for (value, reason) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MatchError::InvalidConfig(reason));
            }
        }

        let non_negative = [
            (self.switch_bias, "switch bias must not be negative"),
            (self.corner_tolerance, "corner tolerance must not be negative"),
            (self.jitter_factor, "jitter factor must not be negative"),
            (self.bounce_factor, "bounce factor must not be negative"),
        ];

        for (value, reason) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MatchError::InvalidConfig(reason));
            }
        }

        Ok(())
    }
}
