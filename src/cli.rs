//! CLI argument parsing for stdfscope

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for parse and analyze results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "stdfscope")]
#[command(version)]
#[command(about = "Semiconductor test data decoder and yield analyzer", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    /// Load settings from a TOML file
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a file and report pass/fail totals
    Parse {
        /// Record stream to decode
        file: PathBuf,

        /// Export decoded results to a CSV file
        #[arg(long = "csv", value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Show pass/fail summary
        #[arg(long = "summary")]
        summary: bool,

        /// Output format for the summary
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Per-test statistics, Cpk, failures and outliers
    Analyze {
        /// Record stream to analyze
        file: PathBuf,

        /// Save the report to a file instead of printing it
        #[arg(long = "report", value_name = "PATH")]
        report: Option<PathBuf>,

        /// Outlier threshold in standard deviations (default: 3.0)
        #[arg(long = "sigma", value_name = "SIGMA")]
        sigma: Option<f64>,

        /// Report format
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a synthetic sample file
    Generate {
        /// Output file path
        output: PathBuf,

        /// Number of parametric test records (default: 10)
        #[arg(long = "tests", value_name = "N")]
        tests: Option<u32>,

        /// RNG seed for reproducible output
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,
    },
}
