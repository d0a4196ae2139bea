use super::entry::CacheEntry;
use super::key::CacheKey;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Record of every cache path a rule consulted and what it found there,
/// keyed by the display form of the path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SourceTrace {
    consulted: BTreeMap<String, CacheEntry<Value>>,
}

impl SourceTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &CacheKey, entry: CacheEntry<Value>) {
        self.consulted.insert(key.to_string(), entry);
    }

    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry<Value>> {
        self.consulted.get(&key.to_string())
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.consulted.contains_key(&key.to_string())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.consulted.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.consulted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consulted.is_empty()
    }

    pub fn merge(&mut self, other: SourceTrace) {
        self.consulted.extend(other.consulted);
    }
}
