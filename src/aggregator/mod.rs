//! Aggregation layer.
//!
//! - `RegionScope`: task-local findings and source trace for one region
//! - `FindingCollector`: the merged, caller-owned finding sequence

pub mod collector;
pub mod scope;

pub use collector::FindingCollector;
pub use scope::RegionScope;
