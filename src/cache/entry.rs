use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// State of one cache path. Exactly one variant holds.
///
/// `Absent` means the collector never stored anything at the path (not
/// collected, or not applicable). It is distinct from `Data` holding an
/// empty list and from `Error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheEntry<T> {
    Absent,
    Data(T),
    #[serde(rename = "err")]
    Error(CacheError),
}

impl<T> CacheEntry<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, CacheEntry::Absent)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CacheEntry::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            CacheEntry::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> CacheEntry<&T> {
        match self {
            CacheEntry::Absent => CacheEntry::Absent,
            CacheEntry::Data(data) => CacheEntry::Data(data),
            CacheEntry::Error(err) => CacheEntry::Error(err.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheEntry<U> {
        match self {
            CacheEntry::Absent => CacheEntry::Absent,
            CacheEntry::Data(data) => CacheEntry::Data(f(data)),
            CacheEntry::Error(err) => CacheEntry::Error(err),
        }
    }

    /// Short label used in logs.
    pub fn state(&self) -> &'static str {
        match self {
            CacheEntry::Absent => "absent",
            CacheEntry::Data(_) => "data",
            CacheEntry::Error(_) => "error",
        }
    }
}

impl<T: Clone> CacheEntry<&T> {
    pub fn cloned(self) -> CacheEntry<T> {
        self.map(Clone::clone)
    }
}

/// A fetch failure recorded by the collector.
///
/// Collectors store either a bare string (`"AccessDenied"`) or an object
/// carrying `code` and/or `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CacheError {
    pub const MALFORMED_PAYLOAD: &'static str = "MalformedPayload";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Payload was present but did not have the shape the rule expects.
    pub fn malformed(source: &serde_json::Error) -> Self {
        Self::new(format!("unexpected payload shape: {}", source))
            .with_code(Self::MALFORMED_PAYLOAD)
    }

    pub fn is_malformed(&self) -> bool {
        self.code.as_deref() == Some(Self::MALFORMED_PAYLOAD)
    }

    /// Interpret whatever the collector stored under `err`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::new(s.clone()),
            Value::Object(map) => {
                let field = |name: &str| {
                    map.get(name)
                        .and_then(Value::as_str)
                        .map(|s| s.to_string())
                };
                let code = field("code").or_else(|| field("name"));
                let message = field("message");
                if code.is_none() && message.is_none() {
                    Self::new(value.to_string())
                } else {
                    Self { code, message }
                }
            }
            other => Self::new(other.to_string()),
        }
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.code) {
            (Some(message), _) => write!(f, "{}", message),
            (None, Some(code)) => write!(f, "{}", code),
            (None, None) => write!(f, "Unknown error"),
        }
    }
}
