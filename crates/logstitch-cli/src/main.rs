// logstitch CLI - turn raw access/application logs into structured records

mod config;
mod error;
mod ingest;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{OutputFormat, PipelineConfig};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use ingest::{IngestOptions, SourceReport};
use logstitch_core::{FormatClassifier, LineFormat};
use std::path::PathBuf;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// records in flight between the reader tasks and the printer
const RECORD_BUFFER: usize = 1024;

#[derive(Parser)]
#[command(name = "logstitch")]
#[command(version = "0.1.0")]
#[command(about = "Classify and stitch multi-line logs into structured records", long_about = None)]
struct Cli {
    /// Config file (defaults to ./logstitch.toml when present)
    #[arg(short, long, env = "LOGSTITCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble log files (or stdin) into records
    Ingest {
        /// Files to read; each one is a separate source
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Show a progress spinner per file
        #[arg(long)]
        progress: bool,

        /// Drop whitespace-only lines
        #[arg(long)]
        skip_blank: bool,

        /// Source identifier for stdin input
        #[arg(long)]
        source_name: Option<String>,
    },

    /// Show the format each line is classified as
    Classify {
        /// Lines to classify
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = config::resolve_config(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ingest {
            files,
            output,
            progress,
            skip_blank,
            source_name,
        } => {
            // flags override the config file
            if let Some(output) = output {
                config.output = output;
            }
            config.progress |= progress;
            config.skip_blank |= skip_blank;
            if let Some(name) = source_name {
                config.stdin_source = name;
            }
            run_ingest(files, &config).await?;
        }
        Commands::Classify { lines } => {
            classify_lines(&lines);
        }
    }

    Ok(())
}

async fn run_ingest(files: Vec<PathBuf>, config: &PipelineConfig) -> error::Result<()> {
    let options = IngestOptions {
        skip_blank: config.skip_blank,
    };
    let (tx, rx) = mpsc::channel(RECORD_BUFFER);
    let multi = config.progress.then(MultiProgress::new);

    let mut tasks = Vec::new();
    if files.is_empty() {
        let source = config.stdin_source.clone();
        let sink = tx.clone();
        info!(source = %source, "reading stdin");
        tasks.push(tokio::spawn(async move {
            let reader = BufReader::new(tokio::io::stdin());
            ingest::assemble_reader(reader, &source, options, sink, None).await
        }));
    } else {
        for path in files {
            let sink = tx.clone();
            let bar = multi.as_ref().map(|m| file_spinner(m, &path));
            tasks.push(tokio::spawn(async move {
                ingest::assemble_file(&path, options, sink, bar).await
            }));
        }
    }
    // printer stops once every task has dropped its sender
    drop(tx);

    let printed = output::print_records(rx, config.output).await;
    let (printed, reports) = finish_sources(tasks, printed).await?;

    output::print_summary(&reports, printed);
    Ok(())
}

// join every reader task before reporting; a failed printer cancels them first
async fn finish_sources(
    tasks: Vec<JoinHandle<error::Result<SourceReport>>>,
    printed: error::Result<u64>,
) -> error::Result<(u64, Vec<SourceReport>)> {
    let printed = match printed {
        Ok(count) => count,
        Err(err) => {
            for task in &tasks {
                task.abort();
            }
            for result in futures::future::join_all(tasks).await {
                match result {
                    Ok(Err(source_err)) => warn!(error = %source_err, "source failed"),
                    Err(join_err) if !join_err.is_cancelled() => {
                        warn!(error = %join_err, "ingest task failed")
                    }
                    _ => {}
                }
            }
            return Err(err);
        }
    };

    let mut reports = Vec::with_capacity(tasks.len());
    for result in futures::future::try_join_all(tasks).await? {
        reports.push(result?);
    }
    Ok((printed, reports))
}

fn file_spinner(multi: &MultiProgress, path: &std::path::Path) -> ProgressBar {
    let pb = multi.add(ProgressBar::new_spinner());
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {prefix:.cyan} {pos} lines ({per_sec}) {msg}")
    {
        pb.set_style(style);
    }
    pb.set_prefix(path.display().to_string());
    pb
}

fn classify_lines(lines: &[String]) {
    let classifier = FormatClassifier::new();

    for line in lines {
        let format = classifier.classify(line);
        let label = match format {
            LineFormat::Access => format.as_str().cyan(),
            LineFormat::Application => format.as_str().magenta(),
            LineFormat::Continuation => format.as_str().yellow(),
            LineFormat::Unknown => format.as_str().dimmed(),
        };
        println!("{} {:<12} | {} {}", "Format:".dimmed(), label, "Line:".dimmed(), line);
    }
}
