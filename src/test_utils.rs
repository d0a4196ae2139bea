#[cfg(test)]
pub mod fixtures {
    use crate::cache::{CacheEntry, CacheError, CacheKey, SourceCache, SourceTrace};
    use crate::rules::{Finding, RuleOutput, RunReport, Status};
    use serde_json::{Map, Value, json};

    /// Cache holding `sagemaker.listNotebookInstances` with the given
    /// per-region nodes.
    pub fn notebook_cache(regions: Value) -> SourceCache {
        SourceCache::from_value(json!({
            "sagemaker": {"listNotebookInstances": regions}
        }))
        .unwrap()
    }

    /// A `ListNotebookInstances` record in `us-east-1`.
    pub fn instance(name: &str, kms_key: Option<&str>, internet_access: Option<&str>) -> Value {
        let mut record = Map::new();
        record.insert("NotebookInstanceName".to_string(), json!(name));
        record.insert(
            "NotebookInstanceArn".to_string(),
            json!(format!(
                "arn:aws:sagemaker:us-east-1:111122223333:notebook-instance/{}",
                name
            )),
        );
        if let Some(key) = kms_key {
            record.insert("KmsKeyId".to_string(), json!(key));
        }
        if let Some(access) = internet_access {
            record.insert("DirectInternetAccess".to_string(), json!(access));
        }
        Value::Object(record)
    }

    /// A report with one failing, one passing and one indeterminate finding.
    pub fn sample_report() -> RunReport {
        let arn = "arn:aws:sagemaker:us-east-1:111122223333:notebook-instance/r1";
        let mut source = SourceTrace::new();
        source.record(
            &CacheKey::new("sagemaker", "listNotebookInstances", "us-east-1"),
            CacheEntry::Data(json!([instance("r1", None, Some("Disabled"))])),
        );
        source.record(
            &CacheKey::new("sagemaker", "listNotebookInstances", "eu-west-1"),
            CacheEntry::Error(CacheError::new("AccessDenied")),
        );

        RunReport::new(vec![RuleOutput {
            rule: "sagemaker-notebook-direct-internet-access",
            findings: vec![
                Finding::new(
                    Status::Fail,
                    "KMS key not found for Notebook Instance",
                    "us-east-1",
                    Some(arn.to_string()),
                ),
                Finding::new(
                    Status::Ok,
                    "Direct Internet access is not enabled",
                    "us-east-1",
                    Some(arn.to_string()),
                ),
                Finding::new(
                    Status::Unknown,
                    "Unable to query for Notebook Instances: AccessDenied",
                    "eu-west-1",
                    None,
                ),
            ],
            source,
        }])
    }
}
