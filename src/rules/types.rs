use crate::cache::SourceTrace;
use serde::{Deserialize, Serialize};

/// Outcome of a single check.
///
/// The wire codes (`Ok = 0`, `Fail = 1`, `Warn = 2`, `Unknown = 3`) are kept
/// for consumers that expect them, but they do not form a ranking: `Ok` is
/// better than every other status, `Fail` and `Warn` are definitive negative
/// outcomes, and `Unknown` means the rule could not decide. Use the
/// predicates instead of comparing codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Fail,
    Warn,
    Unknown,
}

impl Status {
    pub fn code(&self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::Fail => 1,
            Status::Warn => 2,
            Status::Unknown => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Status::Ok),
            1 => Some(Status::Fail),
            2 => Some(Status::Warn),
            3 => Some(Status::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Fail => "fail",
            Status::Warn => "warn",
            Status::Unknown => "unknown",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }

    /// True for definitive negative outcomes (`Fail` and `Warn`).
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Fail | Status::Warn)
    }

    /// True when the rule could not reach a verdict.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Status::Unknown)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// One reported outcome of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub status: Status,
    pub message: String,
    pub region: String,
    /// `None` for region-level findings such as "no resources found".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl Finding {
    pub fn new(
        status: Status,
        message: impl Into<String>,
        region: impl Into<String>,
        resource: Option<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            region: region.into(),
            resource,
        }
    }

    pub fn is_region_level(&self) -> bool {
        self.resource.is_none()
    }
}

/// Static declaration of a rule, consumed by registries and collectors.
#[derive(Debug, Clone, Serialize)]
pub struct RuleMetadata {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub more_info: &'static str,
    pub recommended_action: &'static str,
    pub link: &'static str,
    /// `Service:operation` pairs the rule reads from the cache. Not enforced
    /// by the engine; the collector uses it to decide what to fetch.
    pub apis: &'static [&'static str],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub ok: usize,
    pub fail: usize,
    pub warn: usize,
    pub unknown: usize,
    pub passed: bool,
}

impl Summary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let (ok, fail, warn, unknown) =
            findings
                .iter()
                .fold((0, 0, 0, 0), |(o, f, w, u), finding| match finding.status {
                    Status::Ok => (o + 1, f, w, u),
                    Status::Fail => (o, f + 1, w, u),
                    Status::Warn => (o, f, w + 1, u),
                    Status::Unknown => (o, f, w, u + 1),
                });

        Self {
            ok,
            fail,
            warn,
            unknown,
            passed: fail == 0 && warn == 0,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.fail + self.warn + self.unknown
    }

    pub fn merge(&mut self, other: &Summary) {
        self.ok += other.ok;
        self.fail += other.fail;
        self.warn += other.warn;
        self.unknown += other.unknown;
        self.passed = self.fail == 0 && self.warn == 0;
    }
}

/// Everything one rule invocation hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutput {
    pub rule: &'static str,
    pub findings: Vec<Finding>,
    /// Cache paths consulted while evaluating, with what each lookup found.
    pub source: SourceTrace,
}

impl RuleOutput {
    pub fn summary(&self) -> Summary {
        Summary::from_findings(&self.findings)
    }

    pub fn findings_for_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| f.region == region)
    }
}

/// Result of running every rule against one cache snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub version: String,
    pub scanned_at: String,
    pub summary: Summary,
    pub rules: Vec<RuleOutput>,
}

impl RunReport {
    pub fn new(rules: Vec<RuleOutput>) -> Self {
        let mut summary = Summary {
            passed: true,
            ..Summary::default()
        };
        for output in &rules {
            summary.merge(&output.summary());
        }

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            scanned_at: chrono::Utc::now().to_rfc3339(),
            summary,
            rules,
        }
    }
}
