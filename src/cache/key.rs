use serde::{Deserialize, Serialize};
use std::fmt;

/// Exact path of one cached provider response:
/// `service / operation / region [/ resource]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub service: String,
    pub operation: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl CacheKey {
    pub fn new(
        service: impl Into<String>,
        operation: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            operation: operation.into(),
            region: region.into(),
            resource: None,
        }
    }

    /// Narrow the key to a single resource under the region.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Path segments in lookup order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.service.as_str()),
            Some(self.operation.as_str()),
            Some(self.region.as_str()),
            self.resource.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.service, self.operation, self.region)?;
        if let Some(ref resource) = self.resource {
            write!(f, ":{}", resource)?;
        }
        Ok(())
    }
}
