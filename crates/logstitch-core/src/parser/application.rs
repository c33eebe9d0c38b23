// Application log parser: `2025-06-28 06:12:45.107 - ERROR - message`

use super::{LineFormat, LineRule};
use regex::Regex;
use std::sync::LazyLock;

// the message part is optional so a bare `... - ERROR -` header still counts
static APPLICATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<timestamp>\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}\.\d{1,3})\s+-\s+(?P<level>ERROR|WARN|INFO|DEBUG)\s+-(?:\s+(?P<message>.*))?$",
    )
    .expect("application log pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFields<'a> {
    pub timestamp: &'a str,
    pub level: &'a str,
    pub message: &'a str,
}

/// Extract application fields, None when the line is not an application line.
pub fn parse_application_log(line: &str) -> Option<ApplicationFields<'_>> {
    let caps = APPLICATION_PATTERN.captures(line)?;
    Some(ApplicationFields {
        timestamp: caps.name("timestamp")?.as_str(),
        level: caps.name("level")?.as_str(),
        message: caps.name("message").map(|m| m.as_str()).unwrap_or(""),
    })
}

pub struct ApplicationRule;

impl LineRule for ApplicationRule {
    fn name(&self) -> &'static str {
        "application"
    }

    fn format(&self) -> LineFormat {
        LineFormat::Application
    }

    fn matches(&self, line: &str) -> bool {
        APPLICATION_PATTERN.is_match(line)
    }
}
