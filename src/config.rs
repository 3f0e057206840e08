//! `.salama.toml` configuration.
//!
//! File loading, per-key defaults, and the merge with CLI arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root of the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// `[general]` section.
    #[serde(default)]
    pub general: GeneralConfig,

    /// `[model]` section.
    #[serde(default)]
    pub model: ModelConfig,

    /// `[report]` section.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Where the report is written unless --output overrides it.
    #[serde(default = "default_output")]
    pub output: String,

    /// Skip the model call and always synthesize locally.
    #[serde(default)]
    pub offline: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            offline: false,
        }
    }
}

fn default_output() -> String {
    "salama_report.md".to_string()
}

/// Upstream model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name sent in the completions request.
    #[serde(default = "default_model")]
    pub name: String,

    /// DeepSeek-compatible chat-completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Sampling temperature for the completion.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in the completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds. One request, no retries; a timeout
    /// means the analysis is synthesized locally.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_url: default_api_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_api_url() -> String {
    "http://deepseek:8080/v1/chat/completions".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout() -> u64 {
    120
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the raw model response in the Markdown report.
    #[serde(default = "default_true")]
    pub include_full_analysis: bool,

    /// Include the violation ranking table.
    #[serde(default = "default_true")]
    pub include_fine_types: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_full_analysis: true,
            include_fine_types: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `.salama.toml` from the current directory if one exists.
    ///
    /// `Ok(None)` when the file is absent; `Err` only when it exists but
    /// cannot be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let path = Path::new(".salama.toml");
        if !path.exists() {
            return Ok(None);
        }

        Self::load(path).map(Some)
    }

    /// Overlay CLI arguments onto this configuration.
    ///
    /// Model knobs always come from the CLI, which supplies their
    /// defaults; the timeout has no CLI default, so the file's value
    /// survives unless --timeout was given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        self.model.name = args.model.clone();
        self.model.api_url = args.api_url.clone();
        self.model.temperature = args.temperature;

        if let Some(timeout) = args.timeout {
            self.model.timeout_seconds = timeout;
        }

        if args.offline {
            self.general.offline = true;
        }
    }

    /// Render the default configuration as TOML for --init-config.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_else(|_| String::new())
    }
}
