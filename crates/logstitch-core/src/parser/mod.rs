//! line classifier - routes each raw line to the parser for its format

pub mod access;
pub mod application;
pub mod fields;

pub use access::{parse_access_log, AccessFields, AccessRule};
pub use application::{parse_application_log, ApplicationFields, ApplicationRule};
pub use fields::{
    extract_http_version, parse_integer, parse_timestamp, split_request_line,
    try_parse_timestamp, TimestampLayout,
};

use serde::{Deserialize, Serialize};

// Category a single physical line falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineFormat {
    Access,
    Application,
    Continuation,
    Unknown,
}

impl LineFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Application => "application",
            Self::Continuation => "continuation",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LineFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Rule trait - one per recognised line shape

pub trait LineRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn format(&self) -> LineFormat;
    fn matches(&self, line: &str) -> bool;
}

// whitespace-only lines carry nothing to stitch
struct BlankRule;

impl LineRule for BlankRule {
    fn name(&self) -> &'static str {
        "blank"
    }

    fn format(&self) -> LineFormat {
        LineFormat::Unknown
    }

    fn matches(&self, line: &str) -> bool {
        line.trim().is_empty()
    }
}

// indented stack-trace frames and wrapped text
struct ContinuationRule;

impl LineRule for ContinuationRule {
    fn name(&self) -> &'static str {
        "continuation"
    }

    fn format(&self) -> LineFormat {
        LineFormat::Continuation
    }

    fn matches(&self, line: &str) -> bool {
        line.starts_with(char::is_whitespace) && !line.trim_start().is_empty()
    }
}

/// Ordered rule set, first match wins.
pub struct FormatClassifier {
    rules: Vec<Box<dyn LineRule>>,
}

impl FormatClassifier {
    pub fn new() -> Self {
        // Order matters! continuation must run before the structured shapes
        // so an indented frame never falls through to Unknown
        let rules: Vec<Box<dyn LineRule>> = vec![
            Box::new(BlankRule),
            Box::new(ContinuationRule),
            Box::new(ApplicationRule),
            Box::new(AccessRule),
        ];

        Self { rules }
    }

    /// Build a classifier from a caller-chosen rule list, evaluated in the given order.
    /// Lines no rule claims are Unknown.
    pub fn with_rules(rules: Vec<Box<dyn LineRule>>) -> Self {
        Self { rules }
    }

    // append a rule; it runs after every rule already registered
    pub fn register(&mut self, rule: Box<dyn LineRule>) {
        self.rules.push(rule);
    }

    pub fn classify(&self, line: &str) -> LineFormat {
        for rule in &self.rules {
            if rule.matches(line) {
                tracing::trace!(rule = rule.name(), "line classified");
                return rule.format();
            }
        }
        LineFormat::Unknown
    }

    pub fn parse_access<'a>(&self, line: &'a str) -> Option<AccessFields<'a>> {
        parse_access_log(line)
    }

    pub fn parse_application<'a>(&self, line: &'a str) -> Option<ApplicationFields<'a>> {
        parse_application_log(line)
    }

    // rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for FormatClassifier {
    fn default() -> Self {
        Self::new()
    }
}
