//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.run-analytics.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".run-analytics.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Aggregation settings.
    #[serde(default)]
    pub aggregator: AggregatorSettings,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding one subdirectory per category.
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            verbose: false,
        }
    }
}

fn default_base_path() -> PathBuf {
    PathBuf::from("src/assets/outputs/SA")
}

/// Which run logs are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorSettings {
    /// Variant names, in report order.
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,

    /// Highest run index read per variant.
    #[serde(default = "default_max_runs")]
    pub max_runs: usize,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            variants: default_variants(),
            max_runs: default_max_runs(),
        }
    }
}

fn default_variants() -> Vec<String> {
    crate::analysis::DEFAULT_VARIANTS
        .iter()
        .map(|v| v.to_string())
        .collect()
}

fn default_max_runs() -> usize {
    crate::analysis::DEFAULT_MAX_RUNS
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// File name written into each category directory.
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Write the per-category analytics files.
    #[serde(default = "default_true")]
    pub write_files: bool,

    /// Print the summary to stdout.
    #[serde(default = "default_true")]
    pub print_console: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            write_files: true,
            print_console: true,
        }
    }
}

fn default_output_file() -> String {
    crate::report::DEFAULT_OUTPUT_FILE.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from `CONFIG_FILE_NAME` inside a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// where they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref base_path) = args.base_path {
            self.general.base_path = base_path.clone();
        }

        if let Some(ref variants) = args.variants {
            self.aggregator.variants = variants.clone();
        }
        if let Some(max_runs) = args.max_runs {
            self.aggregator.max_runs = max_runs;
        }

        if let Some(ref output_file) = args.output_file {
            self.report.output_file = output_file.clone();
        }

        // Flags always override
        if args.no_write {
            self.report.write_files = false;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check values that may have come from a config file.
    pub fn validate(&self) -> Result<()> {
        if self.aggregator.max_runs == 0 {
            anyhow::bail!("max_runs must be at least 1");
        }
        crate::cli::validate_variants(&self.aggregator.variants).map_err(anyhow::Error::msg)?;
        if !crate::cli::is_plain_file_name(&self.report.output_file) {
            anyhow::bail!(
                "Output file must be a plain file name: {}",
                self.report.output_file
            );
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
