// Line reading for the ingest command
// one task per source, each with its own assembler; records go to a shared channel

use crate::error::{CliError, Result};
use indicatif::ProgressBar;
use logstitch_core::{AssemblerStats, LineAssembler, LogRecord};
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub skip_blank: bool,
}

// what happened to one source once its input ended
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub stats: AssemblerStats,
    pub skipped_blank: u64,
}

pub async fn assemble_file(
    path: &Path,
    options: IngestOptions,
    sink: mpsc::Sender<LogRecord>,
    progress: Option<ProgressBar>,
) -> Result<SourceReport> {
    let name = path.display().to_string();
    let file = File::open(path).await.map_err(|source| CliError::Read {
        path: name.clone(),
        source,
    })?;

    info!(source = %name, "ingesting file");
    assemble_reader(BufReader::new(file), &name, options, sink, progress).await
}

/// Drive one reader through a fresh assembler until EOF, then flush.
pub async fn assemble_reader<R>(
    mut reader: R,
    source: &str,
    options: IngestOptions,
    sink: mpsc::Sender<LogRecord>,
    progress: Option<ProgressBar>,
) -> Result<SourceReport>
where
    R: AsyncBufRead + Unpin,
{
    let mut assembler = LineAssembler::new();
    let mut skipped_blank = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| CliError::Read {
                path: source.to_string(),
                source: e,
            })?;
        if read == 0 {
            break;
        }

        // bad bytes must not cost us the line
        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        if let Some(pb) = &progress {
            pb.inc(1);
        }

        if options.skip_blank && line.trim().is_empty() {
            skipped_blank += 1;
            continue;
        }

        for record in assembler.process_line(&line, source) {
            if sink.send(record).await.is_err() {
                warn!(source, "record sink closed, stopping early");
                return Ok(build_report(source, &assembler, skipped_blank));
            }
        }
    }

    if let Some(record) = assembler.flush(source) {
        if sink.send(record).await.is_err() {
            warn!(source, "record sink closed before final flush");
        }
    }

    let report = build_report(source, &assembler, skipped_blank);
    if let Some(pb) = progress {
        pb.finish_with_message(format!("{} records", report.stats.records_emitted));
    }
    debug!(source, stats = ?report.stats, "source finished");
    Ok(report)
}

fn build_report(source: &str, assembler: &LineAssembler, skipped_blank: u64) -> SourceReport {
    SourceReport {
        source: source.to_string(),
        stats: *assembler.stats(),
        skipped_blank,
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
