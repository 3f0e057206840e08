//! Salama - AI-powered traffic fine analyzer
//!
//! A CLI tool that analyzes a traffic fine history with a
//! DeepSeek-compatible model and produces a structured safety report.
//! When the model is unreachable or its output is unusable, an
//! equivalent analysis is synthesized locally from the statistics.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (empty history, bad input, config failure, etc.)

mod analysis;
mod cli;
mod config;
mod extract;
mod fallback;
mod models;
mod report;
mod upstream;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{FineAnalysis, FineHistory, Provenance, Report, ReportMetadata};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // --init-config runs before logging is set up.
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("Salama v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Write a default .salama.toml for --init-config.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".salama.toml");

    if path.exists() {
        eprintln!("⚠️  .salama.toml already exists. Remove it before generating a new one.");
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml()).context("Failed to write .salama.toml")?;

    println!("✅ Created .salama.toml with default settings.");
    println!("   Edit it to customize the model, endpoint, and report options.");
    Ok(())
}

/// Set up the global tracing subscriber.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete analysis workflow.
async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: read the fine history
    let input_path = args.input.clone().context("--input is required")?;
    println!("📥 Reading fine history: {}", input_path.display());
    let history = read_history(&input_path)?;
    info!("Loaded {} fines", history.fines.len());

    // Step 2: run the analysis
    let result = if config.general.offline {
        println!("🔌 Offline mode: synthesizing the analysis locally...");
        analysis::run_offline(&history.fines)?
    } else {
        println!("🤖 Requesting analysis...");
        println!("   Model: {}", config.model.name);
        println!("   Endpoint: {}", config.model.api_url);
        println!("   Timeout: {}s", config.model.timeout_seconds);

        let client = upstream::DeepSeekClient::new(upstream::ClientConfig {
            api_url: config.model.api_url.clone(),
            api_key: args.api_key.clone(),
            model_name: config.model.name.clone(),
            temperature: config.model.temperature,
            max_tokens: config.model.max_tokens,
            timeout_seconds: config.model.timeout_seconds,
        });

        let spinner = make_spinner(args.quiet);
        let result = analysis::run_analysis(&history.fines, &client).await;
        spinner.finish_and_clear();
        result?
    };

    match result.provenance {
        Provenance::Live => println!(
            "\n✅ Model analysis received ({} of 5 sections recognized)",
            result.analysis.populated_count()
        ),
        Provenance::Fallback => {
            warn!("Analysis was synthesized locally");
            println!("\n⚠️  Model unavailable; the analysis was synthesized locally")
        }
    }

    // Step 3: build and write the report
    println!("\n📝 Generating report...");

    let duration = start_time.elapsed().as_secs_f64();
    let report = Report {
        metadata: ReportMetadata {
            model_used: config.model.name.clone(),
            generated_at: Utc::now(),
            duration_seconds: duration,
        },
        result,
    };

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.general.output));

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report, &config.report),
    };

    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    print_summary(&report.result, duration);
    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        output_path.display()
    );

    Ok(())
}

/// Print the console summary.
fn print_summary(result: &FineAnalysis, duration: f64) {
    let stats = &result.statistics;

    println!("\n📊 Analysis Summary:");
    println!("   Total fines: {}", stats.total_fines);
    println!("   Total amount: {}", stats.total_amount);
    println!("   Most common violation: {}", stats.most_common_fine);
    println!("   Source: {}", result.provenance);
    println!("   Duration: {:.1}s", duration);
}

/// Read and deserialize the fine history file.
///
/// Emptiness is checked later by the aggregator; this only validates
/// that the file is readable, well-formed JSON.
fn read_history(path: &Path) -> Result<FineHistory> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let history: FineHistory = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fine history from {}", path.display()))?;

    Ok(history)
}

/// Spinner shown while waiting for the model.
fn make_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Waiting for the model...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Load configuration from --config, .salama.toml, or the defaults.
///
/// An explicit --config path must parse; a broken .salama.toml in the
/// current directory only logs a warning.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded config from .salama.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Ignoring unreadable .salama.toml: {}", e);
            Ok(Config::default())
        }
    }
}
