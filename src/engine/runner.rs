//! Rule entry point.

use super::fanout::{block_on, fan_out};
use super::traits::Rule;
use crate::cache::{SourceCache, SourceTrace};
use crate::config::RunSettings;
use crate::error::{AuditError, Result};
use crate::regions::{DefaultRegions, RegionResolver};
use crate::rules::RuleOutput;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Runs rules against one shared, read-only cache snapshot.
#[derive(Clone)]
pub struct RuleRunner {
    cache: Arc<SourceCache>,
    resolver: Arc<dyn RegionResolver>,
}

impl RuleRunner {
    pub fn new(cache: Arc<SourceCache>) -> Self {
        Self {
            cache,
            resolver: Arc::new(DefaultRegions::new()),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn RegionResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Evaluate one rule across every region of its service.
    ///
    /// Completes only after every region task has finished. There is no
    /// error channel: collection failures are already `Unknown` findings.
    pub async fn run(&self, rule: Arc<dyn Rule>, settings: &RunSettings) -> RuleOutput {
        let regions = self
            .resolver
            .regions(settings.restricted_partition_mode)
            .for_service(rule.service())
            .to_vec();
        debug!(
            rule = rule.id(),
            service = rule.service(),
            regions = regions.len(),
            restricted = settings.restricted_partition_mode,
            "Running rule"
        );

        let cache = Arc::clone(&self.cache);
        let body_rule = Arc::clone(&rule);
        let outcome = fan_out(&regions, move |scope| {
            body_rule.evaluate_region(&cache, scope);
        })
        .await;

        let output = RuleOutput {
            rule: rule.id(),
            findings: outcome.findings.into_findings(),
            source: outcome.source,
        };
        info!(
            rule = output.rule,
            findings = output.findings.len(),
            consulted = output.source.len(),
            "Rule finished"
        );
        output
    }

    /// Evaluate rules one after another, each with its own fan-out.
    pub async fn run_all(&self, rules: &[Arc<dyn Rule>], settings: &RunSettings) -> Vec<RuleOutput> {
        let mut outputs = Vec::with_capacity(rules.len());
        for rule in rules {
            outputs.push(self.run(Arc::clone(rule), settings).await);
        }
        outputs
    }

    /// Blocking form of [`run_all`](Self::run_all) for synchronous callers.
    pub fn run_blocking(
        &self,
        rules: &[Arc<dyn Rule>],
        settings: &RunSettings,
    ) -> Result<Vec<RuleOutput>> {
        block_on(self.run_all(rules, settings))
    }

    /// Callback form of [`run`](Self::run): `on_complete` fires exactly
    /// once, after every region has finished, whether or not the caller is
    /// already inside an async runtime. The error argument is only set when
    /// no runtime could be started, in which case the output carries no
    /// findings.
    pub fn run_with_callback<C>(&self, rule: Arc<dyn Rule>, settings: &RunSettings, on_complete: C)
    where
        C: FnOnce(Option<AuditError>, RuleOutput),
    {
        match block_on(self.run(Arc::clone(&rule), settings)) {
            Ok(output) => on_complete(None, output),
            Err(e) => {
                error!(rule = rule.id(), error = %e, "Could not complete rule run");
                let output = RuleOutput {
                    rule: rule.id(),
                    findings: Vec::new(),
                    source: SourceTrace::new(),
                };
                on_complete(Some(e), output);
            }
        }
    }
}
