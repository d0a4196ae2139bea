mod notebook;

pub use notebook::{DirectInternetAccess, NotebookInstance};

use crate::aggregator::RegionScope;
use crate::cache::{CacheEntry, CacheKey, SourceCache};
use crate::engine::Rule;
use crate::rules::types::{RuleMetadata, Status};
use serde_json::Value;
use tracing::{debug, warn};

const SERVICE: &str = "sagemaker";
const LIST_NOTEBOOK_INSTANCES: &str = "listNotebookInstances";
const DESCRIBE_NOTEBOOK_INSTANCE: &str = "describeNotebookInstance";

/// Placeholder resource id for records carrying neither ARN nor name.
const UNIDENTIFIED_INSTANCE: &str = "unidentified-notebook-instance";

static NOTEBOOK_DIRECT_INTERNET_ACCESS: RuleMetadata = RuleMetadata {
    id: "sagemaker-notebook-direct-internet-access",
    title: "Notebook Direct Internet Access",
    category: "SageMaker",
    description: "Ensure Notebook Instance is not publicly available.",
    more_info: "SageMaker notebooks should not be exposed to the Internet. Public availability \
                can be configured via the DirectInternetAccess attribute.",
    recommended_action: "Disable DirectInternetAccess for each SageMaker notebook.",
    link: "https://docs.aws.amazon.com/sagemaker/latest/dg/appendix-additional-considerations.html#appendix-notebook-and-internet-access",
    apis: &[
        "SageMaker:listNotebookInstances",
        "SageMaker:describeNotebookInstance",
    ],
};

/// Flags notebook instances without a KMS key or with direct internet
/// access enabled. Every instance yields exactly two findings.
#[derive(Debug, Default)]
pub struct NotebookDirectInternetAccess;

impl Rule for NotebookDirectInternetAccess {
    fn metadata(&self) -> &'static RuleMetadata {
        &NOTEBOOK_DIRECT_INTERNET_ACCESS
    }

    fn service(&self) -> &'static str {
        SERVICE
    }

    fn evaluate_region(&self, cache: &SourceCache, scope: &mut RegionScope) {
        let region = scope.region().to_string();
        let list_key = CacheKey::new(SERVICE, LIST_NOTEBOOK_INSTANCES, region.as_str());

        // `null` data means the call succeeded without returning a list.
        let records = match scope.consult_as::<Option<Vec<Value>>>(cache, &list_key) {
            CacheEntry::Absent => return,
            CacheEntry::Error(err) => {
                warn!(region = %region, error = %err, "Notebook instance listing failed");
                scope.record(
                    Status::Unknown,
                    format!("Unable to query for Notebook Instances: {}", err),
                );
                return;
            }
            CacheEntry::Data(records) => records.unwrap_or_default(),
        };

        if records.is_empty() {
            scope.record(Status::Ok, "No Notebook Instances found");
            return;
        }

        debug!(region = %region, count = records.len(), "Evaluating notebook instances");
        for record in &records {
            let instance = NotebookInstance::from_record(record);
            if let Some(name) = instance.notebook_instance_name.as_deref() {
                let describe_key = CacheKey::new(SERVICE, DESCRIBE_NOTEBOOK_INSTANCE, region.as_str())
                    .with_resource(name);
                scope.consult(cache, &describe_key);
            }

            let resource = instance.resource_id().unwrap_or(UNIDENTIFIED_INSTANCE);

            if instance.has_kms_key() {
                scope.record_resource(Status::Ok, "KMS key found for Notebook Instance", resource);
            } else {
                scope.record_resource(Status::Fail, "KMS key not found for Notebook Instance", resource);
            }

            if instance.is_internet_exposed() {
                scope.record_resource(Status::Fail, "Direct Internet access is enabled", resource);
            } else {
                scope.record_resource(Status::Ok, "Direct Internet access is not enabled", resource);
            }
        }
    }
}
