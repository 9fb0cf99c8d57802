//! run-analytics - summary statistics for optimizer run logs
//!
//! Aggregates the per-run logs written by the "generic" and "greedy"
//! optimizer variants for every state directory, and writes an
//! `analytics.txt` summary next to them.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad config, unreadable directory, malformed log, etc.)

use anyhow::{Context, Result};
use run_analytics::analysis::{AggregatorConfig, LogAggregator};
use run_analytics::cli::{Args, OutputFormat};
use run_analytics::config::{self, Config};
use run_analytics::{report, scanner};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let (mut config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(log_level(&args, &config));

    info!("run-analytics v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    if let Err(e) = run(&args, &config) {
        error!("Analysis failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .run-analytics.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    println!("   Edit it to change the base path, variants and run count.");
    Ok(())
}

/// Quiet always wins; otherwise verbose may come from the CLI or the config file.
fn log_level(args: &Args, config: &Config) -> tracing::Level {
    if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging on stderr so stdout carries only the summary.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

/// Run the complete analysis workflow.
fn run(args: &Args, config: &Config) -> Result<()> {
    let start_time = Instant::now();

    config.validate().context("Invalid configuration")?;

    let base_path = &config.general.base_path;
    let aggregator_config = AggregatorConfig::from(&config.aggregator);
    debug!("Aggregator config: {:?}", aggregator_config);

    if args.dry_run {
        return handle_dry_run(base_path, &aggregator_config);
    }

    let aggregator = LogAggregator::new(aggregator_config);
    let result = aggregator
        .analyze(base_path)
        .with_context(|| format!("Failed to analyze {}", base_path.display()))?;

    if result.is_empty() {
        warn!("No state directories found in {}", base_path.display());
    }

    if config.report.print_console {
        match args.format {
            OutputFormat::Text => print!("{}", report::render_console(&result)),
            OutputFormat::Json => println!("{}", report::render_json(&result)?),
        }
    }

    if config.report.write_files {
        let written = report::write_analytics(&result, &config.report.output_file)?;
        debug!("Wrote {} analytics files", written.len());
    }

    info!(
        "Summarized {} variants across {} states in {:.2}s",
        result.summary_count(),
        result.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Handle --dry-run: list the run logs that would be read, exit.
fn handle_dry_run(base_path: &Path, aggregator_config: &AggregatorConfig) -> Result<()> {
    println!(
        "🔍 Dry run: scanning {} (no logs parsed)...\n",
        base_path.display()
    );

    let category_scanner = scanner::CategoryScanner::new(base_path);
    let categories = category_scanner.categories()?;

    if categories.is_empty() {
        println!("   No state directories found.");
    }

    let mut total = 0;
    for category in &categories {
        let planned = category_scanner.planned_runs(
            category,
            &aggregator_config.variants,
            aggregator_config.max_runs,
        );
        total += planned.len();

        println!("   📁 {} ({} runs)", category.name, planned.len());
        for run in &planned {
            println!("     📄 {} (run {}, {})", run.path.display(), run.run, run.variant);
        }
    }

    println!(
        "\n✅ Dry run complete. {} run logs in {} states.",
        total,
        categories.len()
    );
    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Returns the config and the file it came from, if any.
fn load_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, Some(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, Some(PathBuf::from(config::CONFIG_FILE_NAME)))),
        Ok(None) => Ok((Config::default(), None)),
        Err(e) => {
            eprintln!("Warning: failed to load config: {:#}", e);
            Ok((Config::default(), None))
        }
    }
}
