// Record printing and run summary

use crate::config::OutputFormat;
use crate::error::Result;
use crate::ingest::SourceReport;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use logstitch_core::{AssemblerStats, LogLevel, LogRecord, SourceType};
use std::io::Write;
use tokio::sync::mpsc;

const MESSAGE_WIDTH: usize = 60;

/// Consume records until every sender is gone. Returns how many were seen.
pub async fn print_records(mut rx: mpsc::Receiver<LogRecord>, format: OutputFormat) -> Result<u64> {
    let mut count = 0;
    let mut buffered = Vec::new();

    while let Some(record) = rx.recv().await {
        count += 1;
        match format {
            OutputFormat::Json => {
                let mut out = std::io::stdout().lock();
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
            }
            OutputFormat::Table => buffered.push(record),
            OutputFormat::Summary => {}
        }
    }

    if format == OutputFormat::Table && !buffered.is_empty() {
        println!("{}", render_table(&buffered));
    }

    Ok(count)
}

pub fn render_table(records: &[LogRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Time", "Type", "Level", "Source", "Status", "Message"]);

    for record in records {
        let type_colored = match record.source_type {
            SourceType::Access => record.source_type.as_str().cyan().to_string(),
            SourceType::Application => record.source_type.as_str().magenta().to_string(),
            SourceType::Unknown => record.source_type.as_str().dimmed().to_string(),
        };

        let level_colored = match record.level {
            Some(LogLevel::Error) => "error".red().to_string(),
            Some(LogLevel::Warn) => "warn".yellow().to_string(),
            Some(LogLevel::Info) => "info".green().to_string(),
            Some(LogLevel::Debug) => "debug".blue().to_string(),
            None => "-".to_string(),
        };

        let status = record
            .http_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            type_colored,
            level_colored,
            record.source_file.clone(),
            status,
            message_preview(&record.raw_message),
        ]);
    }

    table
}

// first non-empty line, truncated, with a marker for folded continuation lines
fn message_preview(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    let head = lines
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .unwrap_or("");

    let mut preview = truncate(head, MESSAGE_WIDTH);
    if lines.len() > 1 {
        preview.push_str(&format!(" (+{} lines)", lines.len() - 1));
    }
    preview
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

pub fn print_summary(reports: &[SourceReport], printed: u64) {
    let mut totals = AssemblerStats::default();
    let mut skipped = 0;

    eprintln!("\n{}", "Ingest summary".green().bold());
    eprintln!("{}", "─".repeat(50).dimmed());

    for report in reports {
        totals.merge(&report.stats);
        skipped += report.skipped_blank;

        eprintln!(
            "  {} {} lines → {} records ({} continuations, {} unknown)",
            report.source.cyan(),
            report.stats.lines_consumed,
            report.stats.records_emitted.to_string().yellow(),
            report.stats.continuations_appended,
            report.stats.unknown_records,
        );
    }

    eprintln!("{}", "─".repeat(50).dimmed());
    eprintln!("  {} {}", "Records:".dimmed(), printed.to_string().green());
    eprintln!("  {} {}", "Lines:".dimmed(), totals.lines_consumed);
    if skipped > 0 {
        eprintln!("  {} {}", "Blank lines skipped:".dimmed(), skipped);
    }
    if totals.timestamp_fallbacks > 0 {
        eprintln!(
            "  {} {}",
            "Timestamps substituted:".dimmed(),
            totals.timestamp_fallbacks.to_string().red()
        );
    }
    if totals.extraction_misses > 0 {
        eprintln!(
            "  {} {}",
            "Extraction misses:".dimmed(),
            totals.extraction_misses.to_string().red()
        );
    }
}
