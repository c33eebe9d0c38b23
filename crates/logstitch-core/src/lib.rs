//! Core types for the log stitching pipeline
//! this crate classifies raw log lines and assembles them into structured records.
pub mod assembler;
pub mod parser;

pub use assembler::{AssemblerStats, LineAssembler, StreamState};
pub use parser::{FormatClassifier, LineFormat};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// LOG LEVEL //

/// Severity levels an application line can carry (ordered from lowest to highest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse level label (case-insensitive)
    pub fn from_label(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" | "err" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

// SOURCE TYPE //

/// Which structural parser produced a record.
/// Continuation lines never get their own type, they extend an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Access,
    Application,
    Unknown,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Application => "application",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ATTRIBUTES //

/// Value stored in the open `attributes` map of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => f.write_str(s),
        }
    }
}

// LOG RECORD //

// one logical (possibly multi-line) log event
// access-only and application-only fields stay None for other source types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: Uuid, // unique identifier

    pub timestamp: DateTime<Utc>, // when the event happened, ingestion time if unparseable

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>, // application logs only

    pub source_type: SourceType,

    pub raw_message: String, // message (application) or full line (access/unknown), plus continuations

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,

    pub source_file: String, // stream the line came from

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>, // format specific extras

    pub ingested_at: DateTime<Utc>,
}

impl LogRecord {
    /// Bare record of the given type, stamped with the ingestion time.
    pub fn new(
        source_type: SourceType,
        raw_message: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            timestamp: now,
            level: None,
            source_type,
            raw_message: raw_message.into(),
            ip_address: None,
            user_id: None,
            http_method: None,
            http_path: None,
            http_status: None,
            source_file: source_file.into(),
            attributes: BTreeMap::new(),
            ingested_at: now,
        }
    }

    /// Minimal `unknown` record wrapping a line verbatim.
    pub fn unknown(line: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self::new(SourceType::Unknown, line, source_file)
    }

    /// Append a continuation line to the message, separated by a newline.
    pub fn append_continuation(&mut self, line: &str) {
        self.raw_message.push('\n');
        self.raw_message.push_str(line);
    }

    /// Number of physical lines folded into this record
    pub fn line_count(&self) -> usize {
        self.raw_message.split('\n').count()
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}
