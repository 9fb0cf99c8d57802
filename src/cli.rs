//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::{Path, PathBuf};

/// run-analytics - summary statistics for optimizer run logs
///
/// Reads `<BASE_PATH>/<state>/<run>_<variant>.txt` logs, computes mean,
/// best and worst tour distance per state and variant, and writes an
/// `analytics.txt` into every state directory.
///
/// Examples:
///   run-analytics
///   run-analytics src/assets/outputs/BR --max-runs 30
///   run-analytics logs --variants generic,greedy,annealing --format json
///   run-analytics logs --dry-run
///   run-analytics --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory holding one subdirectory per state
    ///
    /// Defaults to src/assets/outputs/SA, or general.base_path from the config file.
    #[arg(value_name = "BASE_PATH", env = "RUN_ANALYTICS_BASE_PATH")]
    pub base_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .run-analytics.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Variants to summarize (comma-separated), in report order
    ///
    /// Example: --variants generic,greedy
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub variants: Option<Vec<String>>,

    /// Highest run index read for each variant
    #[arg(long, value_name = "COUNT")]
    pub max_runs: Option<usize>,

    /// File name written into each state directory
    #[arg(short, long, value_name = "NAME")]
    pub output_file: Option<String>,

    /// Console output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Print the summary without writing analytics files
    #[arg(long)]
    pub no_write: bool,

    /// List the run logs that would be read and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .run-analytics.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the console summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text, mirroring analytics.txt (default)
    #[default]
    Text,
    /// JSON dump of the full analysis
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.max_runs == Some(0) {
            return Err("Max runs must be at least 1".to_string());
        }

        if let Some(ref variants) = self.variants {
            validate_variants(variants)?;
        }

        if let Some(ref output_file) = self.output_file {
            if !is_plain_file_name(output_file) {
                return Err(format!(
                    "Output file must be a plain file name: {}",
                    output_file
                ));
            }
        }

        if let Some(ref base_path) = self.base_path {
            if base_path.exists() && !base_path.is_dir() {
                return Err(format!(
                    "Base path is not a directory: {}",
                    base_path.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Check a variant list: non-empty, no blank or repeated names, and each
/// name usable inside a run file name.
pub fn validate_variants(variants: &[String]) -> Result<(), String> {
    if variants.is_empty() {
        return Err("At least one variant is required".to_string());
    }

    for (i, variant) in variants.iter().enumerate() {
        if variant.trim().is_empty() {
            return Err("Variant names must not be empty".to_string());
        }
        if !is_plain_file_name(variant) {
            return Err(format!("Variant name must not contain a path: {}", variant));
        }
        if variants[..i].contains(variant) {
            return Err(format!("Duplicate variant: {}", variant));
        }
    }

    Ok(())
}

/// True if `name` is a single path component usable as a file name.
pub fn is_plain_file_name(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && name != "."
        && name != ".."
        && path.file_name().map(|n| n == path.as_os_str()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            base_path: None,
            config: None,
            variants: None,
            max_runs: None,
            output_file: None,
            format: OutputFormat::Text,
            no_write: false,
            dry_run: false,
            init_config: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "run-analytics",
            "logs/BR",
            "--variants",
            "generic,annealing",
            "--max-runs",
            "30",
            "--format",
            "json",
            "--no-write",
        ])
        .unwrap();

        assert_eq!(args.base_path, Some(PathBuf::from("logs/BR")));
        assert_eq!(
            args.variants,
            Some(vec!["generic".to_string(), "annealing".to_string()])
        );
        assert_eq!(args.max_runs, Some(30));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.no_write);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_max_runs() {
        let mut args = make_args();
        args.max_runs = Some(0);
        assert!(args.validate().is_err());

        args.max_runs = Some(1);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_variants() {
        let mut args = make_args();
        args.variants = Some(vec![]);
        assert!(args.validate().is_err());

        args.variants = Some(vec!["generic".to_string(), "".to_string()]);
        assert!(args.validate().is_err());

        args.variants = Some(vec!["generic".to_string(), "generic".to_string()]);
        assert!(args.validate().is_err());

        args.variants = Some(vec!["../greedy".to_string()]);
        assert!(args.validate().is_err());

        args.variants = Some(vec!["generic".to_string(), "greedy".to_string()]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_variants_messages() {
        let duplicate = validate_variants(&["greedy".to_string(), "greedy".to_string()]);
        assert_eq!(duplicate, Err("Duplicate variant: greedy".to_string()));

        let nested = validate_variants(&["runs/generic".to_string()]);
        assert!(nested.unwrap_err().contains("runs/generic"));
    }

    #[test]
    fn test_validation_output_file() {
        let mut args = make_args();
        args.output_file = Some("out/analytics.txt".to_string());
        assert!(args.validate().is_err());

        args.output_file = Some("..".to_string());
        assert!(args.validate().is_err());

        args.output_file = Some("summary.txt".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_base_path_is_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let file = temp_dir.path().join("SA");
        std::fs::write(&file, "").unwrap();

        let mut args = make_args();
        args.base_path = Some(file);
        assert!(args.validate().is_err());

        args.base_path = Some(temp_dir.path().to_path_buf());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
