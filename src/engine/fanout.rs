//! Region fan-out coordinator.
//!
//! One task per region, joined at a single barrier. Each task records into
//! its own `RegionScope`; the join loop is the only writer of the merged
//! finding sequence.

use crate::aggregator::{FindingCollector, RegionScope};
use crate::cache::SourceTrace;
use crate::error::{AuditError, Result};
use crate::rules::Status;
use std::any::Any;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

/// Merged result of a fan-out once every region task has finished.
#[derive(Debug, Default)]
pub struct FanOutOutcome {
    pub findings: FindingCollector,
    pub source: SourceTrace,
    /// Number of region tasks that reached the barrier.
    pub regions_completed: usize,
}

/// Evaluate `body` once per region, concurrently, and wait for all of them.
///
/// Concurrency is bounded only by the length of `regions`. Within a region,
/// findings keep the order the body recorded them; across regions the
/// merged order follows task completion. A body that panics does not escape:
/// whatever it recorded is discarded and replaced by one `Unknown`
/// region-level finding, and the barrier still completes.
pub async fn fan_out<F>(regions: &[String], body: F) -> FanOutOutcome
where
    F: Fn(&mut RegionScope) + Send + Sync + 'static,
{
    let body = Arc::new(body);
    let mut tasks = JoinSet::new();

    for region in regions {
        let body = Arc::clone(&body);
        let region = region.clone();
        tasks.spawn(async move { evaluate_region(region, &*body) });
    }

    let mut outcome = FanOutOutcome::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(scope) => {
                trace!(region = scope.region(), findings = scope.findings().len(), "Region finished");
                let (findings, source) = scope.into_parts();
                outcome.findings.add_all(findings);
                outcome.source.merge(source);
                outcome.regions_completed += 1;
            }
            Err(e) => {
                // Region bodies run under catch_unwind, so only runtime
                // shutdown lands here.
                error!(error = %e, "Region task did not complete");
            }
        }
    }

    debug!(
        regions = regions.len(),
        completed = outcome.regions_completed,
        findings = outcome.findings.total(),
        "Fan-out complete"
    );
    outcome
}

/// Blocking form of [`fan_out`]: runs the fan-out on a dedicated runtime and
/// hands the merged outcome to `on_complete` exactly once, including for an
/// empty region list.
pub fn for_each_region<F, C>(regions: &[String], body: F, on_complete: C) -> Result<()>
where
    F: Fn(&mut RegionScope) + Send + Sync + 'static,
    C: FnOnce(FanOutOutcome),
{
    let outcome = block_on(fan_out(regions, body))?;
    on_complete(outcome);
    Ok(())
}

/// Drive `future` to completion from synchronous code.
///
/// Outside a runtime a dedicated one is built. Inside a runtime of either
/// flavor the future runs on a scoped thread with its own runtime.
pub(crate) fn block_on<F>(future: F) -> Result<F::Output>
where
    F: Future + Send,
    F::Output: Send,
{
    if Handle::try_current().is_err() {
        return Ok(build_runtime()?.block_on(future));
    }

    debug!("Already inside an async runtime, blocking on a dedicated thread");
    thread::scope(|s| {
        s.spawn(move || build_runtime().map(|runtime| runtime.block_on(future)))
            .join()
            .unwrap_or_else(|payload| {
                Err(AuditError::BlockingThread(panic_message(payload.as_ref())))
            })
    })
}

fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AuditError::Runtime)
}

fn evaluate_region<F>(region: String, body: &F) -> RegionScope
where
    F: Fn(&mut RegionScope),
{
    let mut scope = RegionScope::new(region);
    let result = catch_unwind(AssertUnwindSafe(|| body(&mut scope)));

    if let Err(payload) = result {
        let reason = panic_message(payload.as_ref());
        error!(region = scope.region(), reason = %reason, "Rule body panicked");
        scope.discard_findings();
        scope.record(
            Status::Unknown,
            format!("Rule evaluation aborted: {}", reason),
        );
    }
    scope
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
