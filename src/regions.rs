//! Region set resolution.
//!
//! The engine only consumes the ordered region list for the service a rule
//! reads; where the lists come from is up to the resolver.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

const STANDARD_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ca-central-1",
    "sa-east-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "ap-east-1",
    "ap-south-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "me-south-1",
];

const GOVCLOUD_REGIONS: &[&str] = &["us-gov-west-1", "us-gov-east-1"];

/// Services with a built-in region list.
const KNOWN_SERVICES: &[&str] = &["sagemaker"];

/// Ordered regions per service for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionSet {
    services: HashMap<String, Vec<String>>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, service: impl Into<String>, regions: Vec<String>) -> Self {
        self.services.insert(service.into(), regions);
        self
    }

    /// Regions for a service, in resolver order. Unknown services have none.
    pub fn for_service(&self, service: &str) -> &[String] {
        self.services
            .get(service)
            .map(|r| r.as_slice())
            .unwrap_or(&[])
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(|k| k.as_str())
    }
}

/// Produces the region set applicable to the current run.
pub trait RegionResolver: Send + Sync {
    /// `restricted_partition_mode` selects the restricted (GovCloud)
    /// partition instead of the standard commercial one.
    fn regions(&self, restricted_partition_mode: bool) -> RegionSet;
}

/// Built-in region lists, optionally overridden per service.
#[derive(Debug, Clone, Default)]
pub struct DefaultRegions {
    overrides: HashMap<String, Vec<String>>,
}

impl DefaultRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list for the given services regardless of partition.
    /// Lists naming regions from the other partition are used as given and
    /// logged at warn level.
    pub fn with_overrides(mut self, overrides: HashMap<String, Vec<String>>) -> Self {
        self.overrides.extend(overrides);
        self
    }
}

impl RegionResolver for DefaultRegions {
    fn regions(&self, restricted_partition_mode: bool) -> RegionSet {
        let base = if restricted_partition_mode {
            GOVCLOUD_REGIONS
        } else {
            STANDARD_REGIONS
        };

        let mut set = RegionSet::new();
        for service in KNOWN_SERVICES {
            set = set.with_service(*service, base.iter().map(|r| r.to_string()).collect());
        }
        for (service, regions) in &self.overrides {
            let foreign = outside_partition(regions, restricted_partition_mode);
            if !foreign.is_empty() {
                warn!(
                    service = %service,
                    restricted = restricted_partition_mode,
                    regions = ?foreign,
                    "Region override lists regions outside the selected partition"
                );
            }
            set = set.with_service(service.clone(), regions.clone());
        }
        set
    }
}

/// Regions in `regions` that belong to the other partition.
fn outside_partition(regions: &[String], restricted_partition_mode: bool) -> Vec<&str> {
    regions
        .iter()
        .map(|r| r.as_str())
        .filter(|r| r.starts_with("us-gov-") != restricted_partition_mode)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_partition() {
        let set = DefaultRegions::new().regions(false);
        let regions = set.for_service("sagemaker");
        assert_eq!(regions.first().map(|s| s.as_str()), Some("us-east-1"));
        assert!(regions.iter().any(|r| r == "eu-west-1"));
        assert!(!regions.iter().any(|r| r.starts_with("us-gov-")));
    }

    #[test]
    fn test_restricted_partition() {
        let set = DefaultRegions::new().regions(true);
        let regions = set.for_service("sagemaker");
        assert!(!regions.is_empty());
        assert!(regions.iter().all(|r| r.starts_with("us-gov-")));
    }

    #[test]
    fn test_unknown_service_is_empty() {
        let set = DefaultRegions::new().regions(false);
        assert!(set.for_service("lightsail").is_empty());
    }

    #[test]
    fn test_overrides_replace_list() {
        let overrides = HashMap::from([(
            "sagemaker".to_string(),
            vec!["us-east-1".to_string(), "eu-west-1".to_string()],
        )]);
        let resolver = DefaultRegions::new().with_overrides(overrides);

        for restricted in [false, true] {
            assert_eq!(
                resolver.regions(restricted).for_service("sagemaker"),
                ["us-east-1".to_string(), "eu-west-1".to_string()]
            );
        }
    }

    #[test]
    fn test_overrides_add_service() {
        let overrides = HashMap::from([("ec2".to_string(), vec!["us-east-1".to_string()])]);
        let set = DefaultRegions::new().with_overrides(overrides).regions(false);
        assert_eq!(set.for_service("ec2").len(), 1);
        assert!(!set.for_service("sagemaker").is_empty());
    }

    #[test]
    fn test_outside_partition() {
        let regions = vec![
            "us-east-1".to_string(),
            "us-gov-west-1".to_string(),
            "eu-west-1".to_string(),
        ];
        assert_eq!(outside_partition(&regions, true), vec!["us-east-1", "eu-west-1"]);
        assert_eq!(outside_partition(&regions, false), vec!["us-gov-west-1"]);

        let gov = vec!["us-gov-east-1".to_string()];
        assert!(outside_partition(&gov, true).is_empty());
    }

    #[test]
    fn test_restricted_override_still_applies() {
        let overrides = HashMap::from([("sagemaker".to_string(), vec!["us-east-1".to_string()])]);
        let set = DefaultRegions::new().with_overrides(overrides).regions(true);
        assert_eq!(set.for_service("sagemaker"), ["us-east-1".to_string()]);
    }

    #[test]
    fn test_region_set_preserves_order() {
        let set = RegionSet::new().with_service(
            "sagemaker",
            vec!["b".to_string(), "a".to_string(), "c".to_string()],
        );
        assert_eq!(set.for_service("sagemaker"), ["b", "a", "c"]);
    }
}
