//! Evaluation engine.
//!
//! - `Rule`: the per-resource-type check
//! - `fanout`: concurrent per-region evaluation with a join barrier
//! - `RuleRunner`: resolves regions and drives a rule to completion

pub mod fanout;
pub mod runner;
pub mod traits;

pub use fanout::{FanOutOutcome, fan_out, for_each_region};
pub use runner::RuleRunner;
pub use traits::Rule;
