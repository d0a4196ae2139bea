//! Per-region recording scope.

use crate::cache::{CacheEntry, CacheKey, SourceCache, SourceTrace};
use crate::rules::{Finding, Status};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

/// Everything one region task produces: its findings, in production order,
/// and the cache paths it consulted.
///
/// Each task owns its scope exclusively, so recording needs no locking. The
/// fan-out coordinator merges scopes once every task has finished.
#[derive(Debug)]
pub struct RegionScope {
    region: String,
    findings: Vec<Finding>,
    trace: SourceTrace,
}

impl RegionScope {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            findings: Vec::new(),
            trace: SourceTrace::new(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Record a region-level finding.
    pub fn record(&mut self, status: Status, message: impl Into<String>) {
        self.push(status, message.into(), None);
    }

    /// Record a finding about one resource.
    pub fn record_resource(
        &mut self,
        status: Status,
        message: impl Into<String>,
        resource: impl Into<String>,
    ) {
        self.push(status, message.into(), Some(resource.into()));
    }

    fn push(&mut self, status: Status, message: String, resource: Option<String>) {
        trace!(region = %self.region, status = %status, resource = ?resource, "Recording finding");
        self.findings
            .push(Finding::new(status, message, self.region.clone(), resource));
    }

    /// Look up a path and note it in the source trace.
    pub fn consult<'c>(&mut self, cache: &'c SourceCache, key: &CacheKey) -> CacheEntry<&'c Value> {
        let entry = cache.lookup(key);
        self.trace.record(key, entry.clone().cloned());
        entry
    }

    /// Typed variant of [`consult`](Self::consult).
    pub fn consult_as<T: DeserializeOwned>(
        &mut self,
        cache: &SourceCache,
        key: &CacheKey,
    ) -> CacheEntry<T> {
        self.trace.record(key, cache.lookup(key).cloned());
        cache.lookup_as(key)
    }

    /// Drop everything recorded so far, keeping the source trace.
    pub(crate) fn discard_findings(&mut self) {
        self.findings.clear();
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn trace(&self) -> &SourceTrace {
        &self.trace
    }

    pub fn into_parts(self) -> (Vec<Finding>, SourceTrace) {
        (self.findings, self.trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_sets_region() {
        let mut scope = RegionScope::new("us-east-1");
        scope.record(Status::Ok, "No Notebook Instances found");
        scope.record_resource(Status::Fail, "KMS key not found", "arn:r1");

        let findings = scope.findings();
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.region == "us-east-1"));
        assert!(findings[0].is_region_level());
        assert_eq!(findings[1].resource.as_deref(), Some("arn:r1"));
    }

    #[test]
    fn test_consult_records_trace() {
        let cache = SourceCache::from_value(json!({
            "sagemaker": {"listNotebookInstances": {"us-east-1": {"data": []}}}
        }))
        .unwrap();
        let mut scope = RegionScope::new("us-east-1");

        let hit = CacheKey::new("sagemaker", "listNotebookInstances", "us-east-1");
        let miss = CacheKey::new("sagemaker", "listNotebookInstances", "us-west-2");
        assert!(scope.consult(&cache, &hit).data().is_some());
        assert!(scope.consult(&cache, &miss).is_absent());

        assert_eq!(scope.trace().get(&hit), Some(&CacheEntry::Data(json!([]))));
        assert_eq!(scope.trace().get(&miss), Some(&CacheEntry::Absent));
    }

    #[test]
    fn test_consult_as_traces_raw_payload() {
        let cache = SourceCache::from_value(json!({
            "s": {"op": {"r": {"data": "scalar"}}}
        }))
        .unwrap();
        let mut scope = RegionScope::new("r");
        let key = CacheKey::new("s", "op", "r");

        let entry: CacheEntry<Vec<String>> = scope.consult_as(&cache, &key);
        assert!(entry.is_error());
        assert_eq!(scope.trace().get(&key), Some(&CacheEntry::Data(json!("scalar"))));
    }

    #[test]
    fn test_into_parts() {
        let mut scope = RegionScope::new("eu-west-1");
        scope.record(Status::Unknown, "Unable to query");
        let (findings, trace) = scope.into_parts();
        assert_eq!(findings.len(), 1);
        assert!(trace.is_empty());
    }
}
