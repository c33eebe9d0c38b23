//! Multi-line assembler: stitches continuation lines onto the record they belong to.
//!
//! Lines arrive one at a time as `(line, source)` pairs. Each source has its own
//! pending record, so interleaved streams never borrow each other's continuations.
//! A pending record is emitted when the next top-level line for the same source
//! arrives, or when that source is flushed.

mod build;
mod stats;

pub use stats::AssemblerStats;

use crate::parser::{FormatClassifier, LineFormat, TimestampLayout, try_parse_timestamp};
use crate::LogRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Per-source state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Buffering,
}

pub struct LineAssembler {
    classifier: FormatClassifier,
    pending: BTreeMap<String, LogRecord>,
    stats: AssemblerStats,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::with_classifier(FormatClassifier::new())
    }

    pub fn with_classifier(classifier: FormatClassifier) -> Self {
        Self {
            classifier,
            pending: BTreeMap::new(),
            stats: AssemblerStats::default(),
        }
    }

    /// Feed one raw line. Returns the records this line completed, in order.
    ///
    /// Usually zero or one. Two when the line completes the pending record and also
    /// becomes a record of its own that is never buffered: an unknown line, or a
    /// structured line whose fields could not be extracted, arriving while the source
    /// is buffering. Both are returned (pending first) so every consumed line ends up
    /// in exactly one emitted record.
    pub fn process_line(&mut self, line: &str, source: &str) -> Vec<LogRecord> {
        self.stats.lines_consumed += 1;

        match self.classifier.classify(line) {
            LineFormat::Access => {
                let record = self.classifier.parse_access(line).map(|fields| {
                    let ts = self.resolve_timestamp(fields.timestamp, TimestampLayout::Access, source);
                    build::access_record(line, &fields, ts, source)
                });
                self.start_record(record, line, source)
            }
            LineFormat::Application => {
                let record = self.classifier.parse_application(line).map(|fields| {
                    let ts = self.resolve_timestamp(
                        fields.timestamp,
                        TimestampLayout::Application,
                        source,
                    );
                    build::application_record(&fields, ts, source)
                });
                self.start_record(record, line, source)
            }
            LineFormat::Continuation => {
                if let Some(record) = self.pending.get_mut(source) {
                    record.append_continuation(line);
                    self.stats.continuations_appended += 1;
                    return Vec::new();
                }
                tracing::debug!(source, "continuation with nothing to extend");
                vec![self.unknown_record(line, source)]
            }
            LineFormat::Unknown => {
                let mut completed: Vec<LogRecord> = self.flush(source).into_iter().collect();
                completed.push(self.unknown_record(line, source));
                completed
            }
        }
    }

    /// Emit the pending record for one source, returning it to Idle.
    pub fn flush(&mut self, source: &str) -> Option<LogRecord> {
        let record = self.pending.remove(source)?;
        self.stats.records_emitted += 1;
        tracing::trace!(source, lines = record.line_count(), "flushed pending record");
        Some(record)
    }

    /// Emit every pending record, ordered by source identifier.
    pub fn flush_all(&mut self) -> Vec<LogRecord> {
        let drained = std::mem::take(&mut self.pending);
        self.stats.records_emitted += drained.len() as u64;
        drained.into_values().collect()
    }

    pub fn state(&self, source: &str) -> StreamState {
        if self.pending.contains_key(source) {
            StreamState::Buffering
        } else {
            StreamState::Idle
        }
    }

    pub fn pending(&self, source: &str) -> Option<&LogRecord> {
        self.pending.get(source)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn stats(&self) -> &AssemblerStats {
        &self.stats
    }

    // flush whatever the source was buffering, then buffer the new record
    // (or emit an unknown one when field extraction missed)
    fn start_record(
        &mut self,
        record: Option<LogRecord>,
        line: &str,
        source: &str,
    ) -> Vec<LogRecord> {
        let mut completed: Vec<LogRecord> = self.flush(source).into_iter().collect();
        match record {
            Some(record) => {
                self.pending.insert(source.to_string(), record);
            }
            None => {
                self.stats.extraction_misses += 1;
                tracing::debug!(source, "field extraction missed, emitting unknown record");
                completed.push(self.unknown_record(line, source));
            }
        }
        completed
    }

    fn unknown_record(&mut self, line: &str, source: &str) -> LogRecord {
        self.stats.unknown_records += 1;
        self.stats.records_emitted += 1;
        LogRecord::unknown(line, source)
    }

    fn resolve_timestamp(
        &mut self,
        raw: &str,
        layout: TimestampLayout,
        source: &str,
    ) -> DateTime<Utc> {
        match try_parse_timestamp(raw, layout) {
            Some(ts) => ts,
            None => {
                self.stats.timestamp_fallbacks += 1;
                tracing::debug!(source, raw, "unparseable timestamp, using ingestion time");
                Utc::now()
            }
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a whole single-source batch through a fresh assembler, flushing at the end.
pub fn assemble<'a, I>(lines: I, source: &str) -> Vec<LogRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assembler = LineAssembler::new();
    let mut records = Vec::new();
    for line in lines {
        records.extend(assembler.process_line(line, source));
    }
    records.extend(assembler.flush(source));
    records
}
