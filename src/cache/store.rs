//! In-memory view of a collector snapshot.

use super::entry::{CacheEntry, CacheError};
use super::key::CacheKey;
use crate::error::{AuditError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

static NULL: Value = Value::Null;

/// Read-only store of provider responses gathered by an external collector.
///
/// The snapshot is a nested JSON object
/// `{service: {operation: {region: node}}}` where `node` is either an entry
/// (`{"data": ..}` or `{"err": ..}`) or, for per-resource operations, an
/// object keyed by resource identifier whose values are entries.
#[derive(Debug, Clone, Default)]
pub struct SourceCache {
    root: Map<String, Value>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(AuditError::InvalidCache(format!(
                "top level must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(content: &str, origin: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| AuditError::CacheParseError {
                path: origin.to_string(),
                source: e,
            })?;
        Self::from_value(value)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AuditError::CacheNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| AuditError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let cache = Self::from_json_str(&content, &path.display().to_string())?;
        debug!(path = %path.display(), services = cache.root.len(), "Loaded cache snapshot");
        Ok(cache)
    }

    /// Look up one exact path. Never fetches and never fails.
    ///
    /// A missing segment anywhere along the path yields `Absent`. A node
    /// holding a set `err` (see `is_set`) yields `Error`. A node that exists but holds
    /// neither `data` nor a set `err` is reported as `Data(null)`, which list
    /// consumers treat as "collected, nothing returned".
    pub fn lookup(&self, key: &CacheKey) -> CacheEntry<&Value> {
        let mut segments = key.segments();
        let Some(first) = segments.next() else {
            return CacheEntry::Absent;
        };
        let Some(mut node) = self.root.get(first) else {
            trace!(key = %key, "Cache miss");
            return CacheEntry::Absent;
        };
        for segment in segments {
            match node.get(segment) {
                Some(next) => node = next,
                None => {
                    trace!(key = %key, missing = segment, "Cache miss");
                    return CacheEntry::Absent;
                }
            }
        }

        let Value::Object(entry) = node else {
            return CacheEntry::Absent;
        };
        match entry.get("err") {
            Some(err) if is_set(err) => CacheEntry::Error(CacheError::from_value(err)),
            _ => CacheEntry::Data(entry.get("data").unwrap_or(&NULL)),
        }
    }

    /// Look up a path and decode its payload.
    ///
    /// A payload that does not decode into `T` is surfaced as a
    /// `CacheError` flagged as malformed so callers handle it exactly like a
    /// collection failure.
    pub fn lookup_as<T: DeserializeOwned>(&self, key: &CacheKey) -> CacheEntry<T> {
        match self.lookup(key) {
            CacheEntry::Absent => CacheEntry::Absent,
            CacheEntry::Error(err) => CacheEntry::Error(err),
            CacheEntry::Data(value) => match T::deserialize(value) {
                Ok(data) => CacheEntry::Data(data),
                Err(e) => {
                    debug!(key = %key, error = %e, "Cached payload has unexpected shape");
                    CacheEntry::Error(CacheError::malformed(&e))
                }
            },
        }
    }

    /// Store an entry, creating intermediate segments. Storing `Absent`
    /// removes the path. Collectors and tests use this; rules only ever
    /// receive `&SourceCache`.
    pub fn insert(&mut self, key: &CacheKey, entry: CacheEntry<Value>) {
        let segments: Vec<&str> = key.segments().collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut map = &mut self.root;
        for segment in parents {
            let slot = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Value::Object(next) = slot else {
                return;
            };
            map = next;
        }

        match entry {
            CacheEntry::Absent => {
                map.remove(*last);
            }
            CacheEntry::Data(data) => {
                let mut node = Map::new();
                node.insert("data".to_string(), data);
                map.insert(last.to_string(), Value::Object(node));
            }
            CacheEntry::Error(err) => {
                let mut node = Map::new();
                node.insert(
                    "err".to_string(),
                    serde_json::to_value(&err).unwrap_or_else(|_| Value::String(err.to_string())),
                );
                map.insert(last.to_string(), Value::Object(node));
            }
        }
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// `err` counts only when it carries something: `null`, `false`, `0` and
/// `""` are treated as no error.
fn is_set(err: &Value) -> bool {
    match err {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
