//! Command-line interface.
//!
//! clap-derived arguments, cross-flag validation, and the mapping from
//! verbosity flags to a log level.

use clap::Parser;
use std::path::PathBuf;

/// Salama - AI traffic fine analyzer
///
/// Analyze a traffic fine history with a DeepSeek-compatible model and
/// produce a structured safety report. When the model is unavailable,
/// an equivalent analysis is synthesized locally from the statistics.
///
/// Examples:
///   salama --input fines.json
///   salama --input fines.json --format json --output report.json
///   salama --input fines.json --offline
///   salama --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the fine history JSON file
    ///
    /// The file must contain a `fines` array of fine records.
    /// Not required when using --init-config.
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "init_config"
    )]
    pub input: Option<PathBuf>,

    /// Model to request the analysis from
    ///
    /// Can also be set via the SALAMA_MODEL env var or .salama.toml config.
    #[arg(short, long, default_value = "deepseek-chat", env = "SALAMA_MODEL")]
    pub model: String,

    /// DeepSeek-compatible chat-completions endpoint
    #[arg(
        long,
        default_value = "http://deepseek:8080/v1/chat/completions",
        env = "DEEPSEEK_API_URL"
    )]
    pub api_url: String,

    /// API key for the model endpoint
    ///
    /// Sent as a bearer token when set.
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output file path for the report
    ///
    /// Defaults to the config file's `general.output`, or salama_report.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Skip the model call and synthesize the analysis locally
    #[arg(long)]
    pub offline: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Temperature for model responses (0.0 - 1.0)
    #[arg(long, default_value = "0.7")]
    pub temperature: f32,

    /// Path to configuration file
    ///
    /// Falls back to .salama.toml in the current directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal console output (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .salama.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown report (default)
    #[default]
    Markdown,
    /// Pretty-printed JSON
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The log level implied by the verbosity flags.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // --init-config only writes a template; nothing else applies.
        if self.init_config {
            return Ok(());
        }

        // Offline runs never touch the endpoint, so its URL is not checked.
        if !self.offline
            && !self.api_url.starts_with("http://")
            && !self.api_url.starts_with("https://")
        {
            return Err("API URL must start with 'http://' or 'https://'".to_string());
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 1.0".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if let Some(ref input_path) = self.input {
            if !input_path.exists() {
                return Err(format!(
                    "Input file does not exist: {}",
                    input_path.display()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv.iter().copied()).unwrap()
    }

    #[test]
    fn test_input_required_without_init_config() {
        assert!(Args::try_parse_from(["salama"]).is_err());
        assert!(Args::try_parse_from(["salama", "--init-config"]).is_ok());
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["salama", "--init-config"]);
        assert_eq!(args.model, "deepseek-chat");
        assert_eq!(args.format, OutputFormat::Markdown);
        assert_eq!(args.temperature, 0.7);
        assert!(args.output.is_none());
        assert!(!args.offline);
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut args = parse(&["salama", "--init-config"]);
        args.init_config = false;
        args.temperature = 1.5;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut args = parse(&["salama", "--init-config", "--api-url", "deepseek:8080"]);
        args.init_config = false;
        assert!(args.validate().is_err());

        // The URL check is skipped entirely for offline runs.
        args.offline = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_verbose_and_quiet() {
        let mut args = parse(&["salama", "--init-config", "--verbose", "--quiet"]);
        args.init_config = false;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut args = parse(&["salama", "--init-config", "--timeout", "0"]);
        args.init_config = false;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level_from_flags() {
        let mut args = parse(&["salama", "--init-config"]);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
