pub mod emission {
    use crate::transition::*;
    use geo::{Distance, Euclidean};

    /// Calculates the emission cost of a candidate relative
    /// to the sample it was found for.
    ///
    /// ## Calculation
    ///
    /// The negative log-likelihood of the distance between the two under
    /// a zero-mean Gaussian measurement error, dropping the constant term.
    ///
    /// ```math
    /// emission(d) = d² / (2 · σz²)
    /// ```
    #[derive(Clone, Copy, Debug)]
    pub struct GaussianEmission {
        pub sigma_z: f64,
    }

    impl Default for GaussianEmission {
        fn default() -> Self {
            Self {
                sigma_z: DEFAULT_SIGMA_Z,
            }
        }
    }

    impl<'a> Strategy<EmissionContext<'a>> for GaussianEmission {
        type Cost = f64;

        fn calculate(&self, context: EmissionContext<'a>) -> Option<Self::Cost> {
            let distance =
                Euclidean.distance(*context.source_position, *context.candidate_position);

            Some(distance.powi(2) / (2.0 * self.sigma_z.powi(2)))
        }
    }
}

pub mod transition {
    use crate::transition::*;

    /// Calculates the transition cost between two candidates.
    ///
    /// # Calculation
    ///
    /// Travel which stays upon one edge, or crosses directly onto the
    /// next, costs the distance travelled. Travel along a longer route
    /// costs the deviation of the route from the straight line between
    /// the two samples, so that routes which wander are discouraged.
    ///
    /// ```math
    /// along(u, v)    = |offset(v) - offset(u)| / β
    /// adjacent(u, v) = (remaining(u) + offset(v)) / β + bias
    /// routed(u, v)   = |remaining(u) + route + offset(v) - distance(u, v)| / β + bias · (hops + 1)
    /// ```
    ///
    /// The bias is charged for each edge switched onto. Entering from the
    /// source costs the offset into the first edge, and leaving to the
    /// target costs the remainder of the last.
    #[derive(Clone, Copy, Debug)]
    pub struct RouteDeviation {
        pub beta: f64,
        pub switch_bias: f64,
    }

    impl Default for RouteDeviation {
        fn default() -> Self {
            Self {
                beta: DEFAULT_BETA,
                switch_bias: DEFAULT_SWITCH_BIAS,
            }
        }
    }

    impl<'a> Strategy<TransitionContext<'a>> for RouteDeviation {
        type Cost = f64;

        fn calculate(&self, context: TransitionContext<'a>) -> Option<Self::Cost> {
            let travelled = context.route_length()?;

            let cost = match context.movement {
                Movement::Enter | Movement::Exit | Movement::Along => travelled / self.beta,
                Movement::Adjacent => travelled / self.beta + self.switch_bias,
                Movement::Routed {
                    hops, straightline, ..
                } => {
                    (travelled - straightline).abs() / self.beta
                        + self.switch_bias * (hops + 1) as f64
                }
                Movement::Unreachable => return None,
            };

            Some(cost)
        }
    }
}

pub mod costing {
    use super::{GaussianEmission, RouteDeviation};
    use crate::transition::*;

    pub struct CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        emission: E,
        transition: T,
    }

    impl<E, T> CostingStrategies<E, T>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        pub fn new(emission: E, transition: T) -> Self {
            Self {
                emission,
                transition,
            }
        }

        #[inline]
        pub fn emission(&self, context: EmissionContext) -> f64 {
            self.emission.cost(context)
        }

        #[inline]
        pub fn transition(&self, context: TransitionContext) -> f64 {
            self.transition.cost(context)
        }
    }

    impl CostingStrategies<GaussianEmission, RouteDeviation> {
        /// The default strategies, parameterised by `config`.
        pub fn from_config(config: &MatchConfig) -> Self {
            CostingStrategies::new(
                GaussianEmission {
                    sigma_z: config.sigma_z,
                },
                RouteDeviation {
                    beta: config.beta,
                    switch_bias: config.switch_bias,
                },
            )
        }
    }

    impl Default for CostingStrategies<GaussianEmission, RouteDeviation> {
        fn default() -> Self {
            CostingStrategies::new(GaussianEmission::default(), RouteDeviation::default())
        }
    }
}

#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;
