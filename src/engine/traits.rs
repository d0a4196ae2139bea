//! Rule trait for the evaluation layer.

use crate::aggregator::RegionScope;
use crate::cache::SourceCache;
use crate::rules::RuleMetadata;

/// One compliance check over cached inventory for one resource type.
///
/// The engine fans `evaluate_region` out over every region the resolver
/// returns for `service()`. Implementations read from the cache through
/// the scope (so lookups land in the source trace) and record findings
/// into it. They never fetch, never mutate the cache, and never return an
/// error: collection failures are reported as `Status::Unknown` findings.
pub trait Rule: Send + Sync {
    fn metadata(&self) -> &'static RuleMetadata;

    /// Service whose region list drives the fan-out.
    fn service(&self) -> &'static str;

    /// Evaluate one region. Must not suspend mid-evaluation.
    fn evaluate_region(&self, cache: &SourceCache, scope: &mut RegionScope);

    fn id(&self) -> &'static str {
        self.metadata().id
    }
}
