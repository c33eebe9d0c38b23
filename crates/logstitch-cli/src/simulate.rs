// logstitch log simulator - writes synthetic logs in every shape the classifier knows
// access lines, INFO/WARN application lines, and ERROR lines followed by a traceback

use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use clap::Parser;
use colored::Colorize;
use rand::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const IP_ADDRESSES: [&str; 8] = [
    "192.168.1.101", "10.0.0.5", "172.16.31.45", "203.0.113.19",
    "198.51.100.87", "127.0.0.1", "209.123.12.34", "64.233.160.1",
];
const REMOTE_USERS: [&str; 5] = ["-", "john", "jane", "admin_user", "api_key_user"];
const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "PATCH"];
const REQUEST_PATHS: [&str; 12] = [
    "/index.html", "/api/v1/users", "/api/v1/products", "/images/logo.png",
    "/about.html", "/contact", "/admin/dashboard", "/login", "/logout",
    "/assets/style.css", "/assets/main.js", "/data/../boot.ini",
];
const HTTP_VERSIONS: [&str; 2] = ["HTTP/1.1", "HTTP/2.0"];
const STATUS_CODES: [u16; 9] = [200, 201, 204, 400, 401, 403, 404, 500, 503];
const REFERERS: [&str; 6] = [
    "http://www.google.com", "http://www.bing.com", "http://www.yoursite.com",
    "http://localhost:3000/dashboard", "-", "https://t.co/xyz",
];
const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "python-requests/2.25.1",
    "curl/7.68.0",
];
const ERROR_MESSAGES: [&str; 4] = [
    "Database connection failed: Timeout expired",
    "NullPointerException: Attempt to invoke method 'toString' on a null object reference",
    "Failed to write to file: /var/log/app.log",
    "Uncaught TypeError: Cannot read properties of undefined (reading 'id')",
];
const FILE_NAMES: [&str; 4] = ["app.py", "database.go", "main.go", "routes.js"];
const FUNC_NAMES: [&str; 4] = ["connect_db", "process_request", "handle_payment", "render_template"];
const ERROR_TYPES: [&str; 4] = ["ValueError", "ConnectionError", "FileNotFoundError", "TypeError"];

#[derive(Parser)]
#[command(name = "logstitch-simulate")]
#[command(about = "Generate synthetic access, application and traceback logs")]
struct Args {
    /// Number of log entries (a traceback block counts as one)
    #[arg(short, long, default_value = "50000")]
    count: usize,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spread timestamps over this many hours before now
    #[arg(short, long, default_value = "168")]
    window_hours: i64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    if let Some(path) = &args.output {
        eprintln!(
            "{} {} entries into {}",
            "Generating".cyan().bold(),
            args.count.to_string().yellow(),
            path.display()
        );
    }

    let mut rng = rand::rng();
    let now = Utc::now();
    let window_secs = (args.window_hours * 3600).max(1);

    for _ in 0..args.count {
        let ts = now - Duration::seconds(rng.random_range(0..window_secs));
        let entry = generate_entry(ts, &mut rng);
        writeln!(writer, "{}", entry)?;
    }
    writer.flush()?;

    if args.output.is_some() {
        eprintln!("{} Log generation complete.", "✓".green());
    }
    Ok(())
}

fn pick<'a, T>(items: &'a [T], rng: &mut impl Rng) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

// 70% access, 25% INFO/WARN, 5% ERROR with traceback
fn generate_entry(ts: DateTime<Utc>, rng: &mut impl Rng) -> String {
    match rng.random_range(0..100) {
        0..70 => generate_access_log(ts, rng),
        70..95 => generate_app_log(ts, rng),
        _ => generate_error_log(ts, rng),
    }
}

fn generate_access_log(ts: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let offset = FixedOffset::east_opt(7 * 3600).unwrap_or_else(|| Utc.fix());
    let timestamp = ts.with_timezone(&offset).format("%d/%b/%Y:%H:%M:%S %z");
    let method = *pick(&HTTP_METHODS, rng);
    let path = *pick(&REQUEST_PATHS, rng);

    // make status code more realistic based on method and path
    let status = if method == "POST" {
        *pick(&[200, 201, 400], rng)
    } else if path.starts_with("/admin") {
        *pick(&[200, 401, 403], rng)
    } else if path.contains("..") {
        400
    } else {
        *pick(&STATUS_CODES, rng)
    };

    format!(
        r#"{} - {} [{}] "{} {} {}" {} {} "{}" "{}""#,
        pick(&IP_ADDRESSES, rng),
        pick(&REMOTE_USERS, rng),
        timestamp,
        method,
        path,
        pick(&HTTP_VERSIONS, rng),
        status,
        rng.random_range(100..30001),
        pick(&REFERERS, rng),
        pick(&USER_AGENTS, rng),
    )
}

fn generate_app_log(ts: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let warn = rng.random_ratio(1, 4);
    let message = if warn {
        match rng.random_range(0..4) {
            0 => format!("API rate limit exceeded for IP {}.", pick(&IP_ADDRESSES, rng)),
            1 => format!("Disk space is running low ({}% remaining).", rng.random_range(0..20)),
            2 => "Deprecated function 'old_function' was called.".to_string(),
            _ => format!("Failed login attempt for user '{}'.", pick(&REMOTE_USERS, rng)),
        }
    } else {
        match rng.random_range(0..4) {
            0 => format!("User '{}' logged in successfully.", pick(&REMOTE_USERS, rng)),
            1 => format!("Processing payment for order #{}.", rng.random_range(1000..100999)),
            2 => format!("Data export job '{}' started.", pick(&REMOTE_USERS, rng)),
            _ => format!("Cache cleared for key '{}'.", pick(&REMOTE_USERS, rng)),
        }
    };

    format!(
        "{} - {} - {}",
        ts.format("%Y-%m-%d %H:%M:%S%.3f"),
        if warn { "WARN" } else { "INFO" },
        message
    )
}

// header line plus an indented traceback; the banner and final exception line are not indented
fn generate_error_log(ts: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let base_error = pick(&ERROR_MESSAGES, rng);
    let func = pick(&FUNC_NAMES, rng);
    let error_type = pick(&ERROR_TYPES, rng);

    let lines = [
        format!("{} - ERROR - ", ts.format("%Y-%m-%d %H:%M:%S%.3f")),
        "Traceback (most recent call last):".to_string(),
        format!(
            r#"  File "{}", line {}, in main"#,
            pick(&FILE_NAMES, rng),
            rng.random_range(1..101)
        ),
        format!("    {}()", func),
        format!(
            r#"  File "{}", line {}, in {}"#,
            pick(&FILE_NAMES, rng),
            rng.random_range(50..250),
            func
        ),
        format!(r#"    raise {}("{}")"#, error_type, base_error),
        format!("{}: {}", error_type, base_error),
    ];
    lines.join("\n")
}
