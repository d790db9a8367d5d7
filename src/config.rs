//! stdfscope.toml configuration
//!
//! # Example stdfscope.toml
//!
//! ```toml
//! [analysis]
//! outlier_sigma = 2.5
//!
//! [generate]
//! tests = 25
//! seed = 42
//! ```
//!
//! Every section and key is optional. Command-line flags override the file.

use crate::analysis::DEFAULT_SIGMA;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Root configuration for stdfscope.toml
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub generate: GenerateConfig,
}

/// `[analysis]` section
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Outlier threshold in standard deviations
    pub outlier_sigma: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            outlier_sigma: DEFAULT_SIGMA,
        }
    }
}

/// `[generate]` section
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Number of parametric records to emit
    pub tests: u32,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            tests: 10,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stdfscope::config::Config;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::from_file("stdfscope.toml")?;
    /// println!("Outlier threshold: {}σ", config.analysis.outlier_sigma);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
        validate_sigma(config.analysis.outlier_sigma)?;
        Ok(config)
    }
}

/// Reject thresholds that cannot separate outliers
pub fn validate_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        anyhow::bail!(
            "Invalid outlier sigma: {} (must be finite and > 0)",
            sigma
        );
    }
    Ok(())
}
