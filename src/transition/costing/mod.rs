//! You may override individual costing strategies
//! in order to apply custom functionality to the
//! matcher. See the [`Strategy`] trait.
//!
//! ## Structure
//! Strategies are joined onto the aggregate [`CostingStrategies`]
//! structure, which is then supplied to the [`Matcher`](crate::transition::Matcher).
//!
//! ```rust,ignore
//! use tracenet::transition::{CostingStrategies, MatchConfig, Matcher};
//!
//! let config = MatchConfig::default();
//! let costing = CostingStrategies::from_config(&config);
//!
//! let matcher = Matcher::with_costing(&topology, config, costing);
//! ```
//!
//! ### Creating your own strategy
//!
//! Implement [`Strategy`] for your structure, with the context of the
//! cost you need to override. [`EmissionStrategy`] and [`TransitionStrategy`]
//! are derived for all which implement the strategy for their context.
//!
//! ```rust
//! use tracenet::transition::{Movement, Strategy, TransitionContext};
//!
//! struct Shortest;
//!
//! impl<'a> Strategy<TransitionContext<'a>> for Shortest {
//!     type Cost = f64;
//!
//!     fn calculate(&self, context: TransitionContext<'a>) -> Option<Self::Cost> {
//!         context.route_length()
//!     }
//! }
//! ```
//!
//! ### Using Context
//!
//! - [`TransitionContext`]
//!     The candidates being travelled between, and the [`Movement`]
//!     which joins them.
//!
//! - [`EmissionContext`]
//!     The position of a candidate, and the sample it was found for.
//!
//! ### Default Strategies:
//! - [`RouteDeviation`]: Transition Cost
//! - [`GaussianEmission`]: Emission Cost
//!
#[doc(hidden)]
pub mod default;
#[doc(hidden)]
pub mod emission;
#[doc(hidden)]
pub mod transition;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use default::*;
#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use transition::*;
#[doc(inline)]
pub use util::*;
