//! Finding collector for aggregating rule results.

use crate::rules::{Finding, Status, Summary};
use std::collections::HashMap;

/// Ordered, caller-owned sequence of findings for one rule invocation.
///
/// Appends never fail. Findings keep the order in which they were added;
/// the region and status indexes point back into that sequence.
#[derive(Debug, Default)]
pub struct FindingCollector {
    findings: Vec<Finding>,
    by_region: HashMap<String, Vec<usize>>,
    by_status: HashMap<Status, Vec<usize>>,
}

impl FindingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finding built from its parts.
    pub fn record(
        &mut self,
        status: Status,
        message: impl Into<String>,
        region: impl Into<String>,
        resource: Option<String>,
    ) {
        self.add(Finding::new(status, message, region, resource));
    }

    pub fn add(&mut self, finding: Finding) {
        let index = self.findings.len();
        self.by_region
            .entry(finding.region.clone())
            .or_default()
            .push(index);
        self.by_status.entry(finding.status).or_default().push(index);
        self.findings.push(finding);
    }

    pub fn add_all(&mut self, findings: impl IntoIterator<Item = Finding>) {
        for finding in findings {
            self.add(finding);
        }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings for one region, in the order they were recorded.
    pub fn by_region(&self, region: &str) -> Vec<&Finding> {
        self.lookup(self.by_region.get(region))
    }

    pub fn by_status(&self, status: Status) -> Vec<&Finding> {
        self.lookup(self.by_status.get(&status))
    }

    fn lookup(&self, indexes: Option<&Vec<usize>>) -> Vec<&Finding> {
        indexes
            .map(|idx| idx.iter().map(|&i| &self.findings[i]).collect())
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.findings.len()
    }

    /// Number of regions that produced at least one finding.
    pub fn regions_count(&self) -> usize {
        self.by_region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| f.status.is_failure())
    }

    /// Most severe status present, ranked `Fail`, `Warn`, `Unknown`, `Ok`.
    /// `None` when nothing was recorded.
    pub fn worst(&self) -> Option<Status> {
        self.by_status.keys().copied().max_by_key(|&status| severity(status))
    }

    pub fn summary(&self) -> Summary {
        Summary::from_findings(&self.findings)
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

fn severity(status: Status) -> u8 {
    match status {
        Status::Ok => 0,
        Status::Unknown => 1,
        Status::Warn => 2,
        Status::Fail => 3,
    }
}
