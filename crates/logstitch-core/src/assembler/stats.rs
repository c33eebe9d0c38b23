use serde::Serialize;

/// Running counters kept by a [`LineAssembler`](super::LineAssembler).
///
/// Once every source is flushed, each consumed line is accounted for exactly once:
/// `lines_consumed == records_emitted + continuations_appended`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblerStats {
    pub lines_consumed: u64,
    pub records_emitted: u64,
    pub continuations_appended: u64,
    pub unknown_records: u64,
    pub timestamp_fallbacks: u64,
    pub extraction_misses: u64,
}

impl AssemblerStats {
    /// Records still buffered; each owns one top-level line not yet emitted
    pub fn records_pending(&self) -> u64 {
        self.lines_consumed
            .saturating_sub(self.records_emitted + self.continuations_appended)
    }

    pub fn merge(&mut self, other: &AssemblerStats) {
        self.lines_consumed += other.lines_consumed;
        self.records_emitted += other.records_emitted;
        self.continuations_appended += other.continuations_appended;
        self.unknown_records += other.unknown_records;
        self.timestamp_fallbacks += other.timestamp_fallbacks;
        self.extraction_misses += other.extraction_misses;
    }
}
