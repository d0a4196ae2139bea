//! SageMaker notebook instance records as returned by
//! `ListNotebookInstances`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Value of the `DirectInternetAccess` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectInternetAccess {
    Enabled,
    Disabled,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotebookInstance {
    #[serde(default)]
    pub notebook_instance_name: Option<String>,
    #[serde(default)]
    pub notebook_instance_arn: Option<String>,
    #[serde(default)]
    pub kms_key_id: Option<String>,
    #[serde(default)]
    pub direct_internet_access: Option<DirectInternetAccess>,
}

impl NotebookInstance {
    /// Build an instance from one listing record.
    ///
    /// Records that do not decode cleanly (a numeric key id, a boolean
    /// access flag, a `null` element) are read field by field instead, so
    /// one odd record never hides the others. A truthy non-string
    /// `KmsKeyId` counts as a key.
    pub fn from_record(record: &Value) -> Self {
        match Self::deserialize(record) {
            Ok(instance) => instance,
            Err(e) => {
                debug!(error = %e, "Reading notebook instance record field by field");
                Self::from_fields(record)
            }
        }
    }

    fn from_fields(record: &Value) -> Self {
        let text = |name: &str| record.get(name).and_then(Value::as_str).map(str::to_string);
        let kms_key_id = record.get("KmsKeyId").filter(|v| is_truthy(v)).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        let direct_internet_access = match record.get("DirectInternetAccess") {
            Some(Value::String(s)) if s == "Enabled" => Some(DirectInternetAccess::Enabled),
            Some(Value::String(s)) if s == "Disabled" => Some(DirectInternetAccess::Disabled),
            Some(Value::Null) | None => None,
            Some(_) => Some(DirectInternetAccess::Unrecognized),
        };

        Self {
            notebook_instance_name: text("NotebookInstanceName"),
            notebook_instance_arn: text("NotebookInstanceArn"),
            kms_key_id,
            direct_internet_access,
        }
    }

    /// Identifier used on findings: the ARN, or the name when the ARN is
    /// missing.
    pub fn resource_id(&self) -> Option<&str> {
        self.notebook_instance_arn
            .as_deref()
            .or(self.notebook_instance_name.as_deref())
    }

    /// An empty key id counts as no key.
    pub fn has_kms_key(&self) -> bool {
        self.kms_key_id.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn is_internet_exposed(&self) -> bool {
        self.direct_internet_access == Some(DirectInternetAccess::Enabled)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
