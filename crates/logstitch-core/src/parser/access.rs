// Access log parser (Apache/Nginx combined format)

use super::{LineFormat, LineRule};
use regex::Regex;
use std::sync::LazyLock;

// IP - USER [27/Jun/2025:20:00:02 +0700] "METHOD PATH HTTP/V" STATUS SIZE "REFERER" "USER_AGENT"
static ACCESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<ip>\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\s+-\s+(?P<user>.+?)\s+\[(?P<timestamp>\d{1,2}/[A-Za-z]{3}/\d{4}:\d{2}:\d{2}:\d{2}\s+[+-]\d{4})\]\s+"(?P<request>[^"]*)"\s+(?P<status>\d{3})\s+(?P<size>\d+|-)\s+"(?P<referer>[^"]*)"\s+"(?P<user_agent>.*)"\s*$"#,
    )
    .expect("access log pattern compiles")
});

/// Named captures of one access line, borrowed from the line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessFields<'a> {
    pub ip: &'a str,
    pub user: &'a str,
    pub timestamp: &'a str,
    pub request: &'a str,
    pub status: &'a str,
    pub size: &'a str,
    pub referer: &'a str,
    pub user_agent: &'a str,
}

/// Extract access fields, None when the line is not an access line.
pub fn parse_access_log(line: &str) -> Option<AccessFields<'_>> {
    let caps = ACCESS_PATTERN.captures(line)?;
    Some(AccessFields {
        ip: caps.name("ip")?.as_str(),
        user: caps.name("user")?.as_str(),
        timestamp: caps.name("timestamp")?.as_str(),
        request: caps.name("request")?.as_str(),
        status: caps.name("status")?.as_str(),
        size: caps.name("size")?.as_str(),
        referer: caps.name("referer")?.as_str(),
        user_agent: caps.name("user_agent")?.as_str(),
    })
}

pub struct AccessRule;

impl LineRule for AccessRule {
    fn name(&self) -> &'static str {
        "access"
    }

    fn format(&self) -> LineFormat {
        LineFormat::Access
    }

    fn matches(&self, line: &str) -> bool {
        ACCESS_PATTERN.is_match(line)
    }
}
