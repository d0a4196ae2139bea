//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure for posture-audit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings handed to every rule invocation.
    pub settings: RunSettings,
    /// Per-service region lists replacing the built-in ones.
    pub regions: HashMap<String, Vec<String>>,
}

/// Settings passed to a rule run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Evaluate the restricted (GovCloud) partition instead of the
    /// commercial one.
    #[serde(alias = "govcloud")]
    pub restricted_partition_mode: bool,
}

impl RunSettings {
    pub fn with_restricted_partition(mut self, enabled: bool) -> Self {
        self.restricted_partition_mode = enabled;
        self
    }
}
