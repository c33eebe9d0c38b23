//! Configuration for the `logstitch` front end, read from TOML

use crate::error::Result;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "logstitch.toml";

// how completed records are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json, // one JSON object per line
    Table, // comfy-table rendering after input ends
    Summary, // counts only
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub output: OutputFormat,

    // source identifier used for lines read from stdin
    pub stdin_source: String,

    // per-file progress spinners on stderr
    pub progress: bool,

    // tracing filter used when RUST_LOG is unset
    pub log_filter: String,

    // drop whitespace-only lines instead of turning them into unknown records
    pub skip_blank: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Json,
            stdin_source: "stdin".to_string(),
            progress: false,
            log_filter: "warn".to_string(),
            skip_blank: false,
        }
    }
}

// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = fs::read_to_string(path)?;
    let config: PipelineConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Explicit path wins; otherwise `logstitch.toml` if present; otherwise defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => Ok(PipelineConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
output = "table"
stdin_source = "journal"
progress = true
log_filter = "logstitch_core=debug"
skip_blank = true
"#;
        let config: PipelineConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.output, OutputFormat::Table);
        assert_eq!(config.stdin_source, "journal");
        assert!(config.progress);
        assert_eq!(config.log_filter, "logstitch_core=debug");
        assert!(config.skip_blank);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: PipelineConfig = toml::from_str(r#"output = "summary""#).unwrap();
        assert_eq!(config.output, OutputFormat::Summary);
        assert_eq!(config.stdin_source, "stdin");
        assert!(!config.progress);
        assert_eq!(config.log_filter, "warn");

        let empty: PipelineConfig = toml::from_str("").unwrap();
        assert_eq!(empty, PipelineConfig::default());
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let result: std::result::Result<PipelineConfig, _> = toml::from_str(r#"output = "xml""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("logstitch-config-{}.toml", std::process::id()));
        fs::write(&path, "progress = true\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.progress);
        assert_eq!(config.output, OutputFormat::Json);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let result = load_config("/definitely/not/here/logstitch.toml");
        assert!(matches!(result, Err(crate::error::CliError::Io(_))));
    }
}
