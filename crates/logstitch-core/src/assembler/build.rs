// Record construction from extracted fields

use crate::parser::{
    extract_http_version, parse_integer, split_request_line, AccessFields, ApplicationFields,
};
use crate::{AttributeValue, LogLevel, LogRecord, SourceType};
use chrono::{DateTime, Utc};

pub(crate) fn access_record(
    line: &str,
    fields: &AccessFields<'_>,
    timestamp: DateTime<Utc>,
    source: &str,
) -> LogRecord {
    let (method, path) = split_request_line(fields.request);
    let status = parse_integer(fields.status);

    let mut record = LogRecord::new(SourceType::Access, line, source);
    record.timestamp = timestamp;
    record.ip_address = Some(fields.ip.to_string());
    record.user_id = (fields.user != "-").then(|| fields.user.to_string());
    record.http_method = method.map(str::to_string);
    record.http_path = path.map(str::to_string);
    record.http_status = u16::try_from(status).ok();

    let attributes = [
        ("user_agent", AttributeValue::from(fields.user_agent)),
        ("referer", AttributeValue::from(fields.referer)),
        ("response_size", AttributeValue::from(parse_integer(fields.size))),
        ("http_version", AttributeValue::from(extract_http_version(fields.request))),
    ];
    for (key, value) in attributes {
        record.attributes.insert(key.to_string(), value);
    }

    record
}

pub(crate) fn application_record(
    fields: &ApplicationFields<'_>,
    timestamp: DateTime<Utc>,
    source: &str,
) -> LogRecord {
    let mut record = LogRecord::new(SourceType::Application, fields.message, source);
    record.timestamp = timestamp;
    record.level = LogLevel::from_label(fields.level);
    record
}
