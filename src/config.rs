//! Pipeline configuration management.
//!
//! This module provides unified configuration for the entire data
//! preparation pipeline, with serialization support for experiment
//! reproducibility.
//!
//! # Features
//!
//! - **Unified Configuration**: Single struct covering thresholds, paths,
//!   scaling, and output format
//! - **Serialization**: Save/load configurations to TOML or JSON
//! - **Validation**: Ensure configurations are valid before use
//! - **Reproducibility**: Version control friendly configuration files
//!
//! # Example
//!
//! ```ignore
//! use rul_dataprep::config::PipelineConfig;
//!
//! // Create configuration
//! let config = PipelineConfig::default();
//!
//! // Save to file
//! config.save_toml("experiment_config.toml")?;
//!
//! // Load from file
//! let loaded = PipelineConfig::load_toml("experiment_config.toml")?;
//!
//! // Use with pipeline
//! let pipeline = Pipeline::from_config(loaded)?;
//! ```

use crate::error::{PrepError, Result};
use crate::preprocessing::DegeneratePolicy;
use std::fs;
use std::path::{Path, PathBuf};

/// Unified pipeline configuration.
///
/// Contains all configuration parameters for a complete preparation run:
/// where to read raw logs, how to label them, how to scale them, and
/// where to write the results.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Input and output paths
    pub paths: DataPathConfig,

    /// RUL threshold configuration
    pub thresholds: ThresholdConfig,

    /// Feature scaling configuration
    pub scaling: ScalingConfig,

    /// Output field delimiter (single character, default ',')
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Experiment metadata (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExperimentMetadata>,
}

/// Input and output file locations.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DataPathConfig {
    /// Run-to-failure sensor log
    pub run_to_failure: PathBuf,

    /// Censored (evaluation) sensor log
    pub evaluation: PathBuf,

    /// Ground-truth RUL offsets for the evaluation set
    pub offsets: PathBuf,

    /// Processed run-to-failure output
    pub train_output: PathBuf,

    /// Processed evaluation output
    pub eval_output: PathBuf,
}

impl Default for DataPathConfig {
    fn default() -> Self {
        Self {
            run_to_failure: PathBuf::from("data/train_FD001.txt"),
            evaluation: PathBuf::from("data/test_FD001.txt"),
            offsets: PathBuf::from("data/RUL_FD001.txt"),
            train_output: PathBuf::from("output/train.csv"),
            eval_output: PathBuf::from("output/eval.csv"),
        }
    }
}

/// RUL threshold configuration.
///
/// `w1` is the alarm boundary for the binary label, `w0` the critical
/// boundary for the ternary label. Must satisfy `0 < w0 < w1`.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ThresholdConfig {
    /// Binary alarm threshold in cycles
    pub w1: u32,

    /// Critical threshold in cycles
    pub w0: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        // Standard choices for the turbofan benchmark
        Self { w1: 30, w0: 15 }
    }
}

/// Feature scaling configuration.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct ScalingConfig {
    /// How to treat columns that are constant on the fit set
    #[serde(default)]
    pub degenerate_policy: DegeneratePolicy,
}

/// Experiment metadata for tracking and reproducibility.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExperimentMetadata {
    /// Experiment name
    pub name: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Version or git commit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Custom tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

fn default_delimiter() -> char {
    ','
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: DataPathConfig::default(),
            thresholds: ThresholdConfig::default(),
            scaling: ScalingConfig::default(),
            delimiter: default_delimiter(),
            metadata: None,
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set experiment metadata.
    pub fn with_metadata(mut self, metadata: ExperimentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Set threshold configuration.
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set path configuration.
    pub fn with_paths(mut self, paths: DataPathConfig) -> Self {
        self.paths = paths;
        self
    }

    /// Set the output delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.thresholds.w0 == 0 {
            return Err(PrepError::config("thresholds.w0 must be > 0"));
        }
        if self.thresholds.w0 >= self.thresholds.w1 {
            return Err(PrepError::config(format!(
                "thresholds.w0 ({}) must be < thresholds.w1 ({})",
                self.thresholds.w0, self.thresholds.w1
            )));
        }
        if self.paths.train_output == self.paths.eval_output {
            return Err(PrepError::config(
                "train_output and eval_output must be distinct paths",
            ));
        }
        for (name, input) in [
            ("run_to_failure", &self.paths.run_to_failure),
            ("evaluation", &self.paths.evaluation),
            ("offsets", &self.paths.offsets),
        ] {
            for output in [&self.paths.train_output, &self.paths.eval_output] {
                if input == output {
                    return Err(PrepError::config(format!(
                        "input path '{name}' collides with an output path: {}",
                        input.display()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Save configuration to TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| PrepError::config(format!("TOML serialization failed: {e}")))?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Load configuration from TOML file. Validates after parsing.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: PipelineConfig = toml::from_str(&contents).map_err(|e| {
            PrepError::config(format!(
                "invalid TOML in '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| PrepError::config(format!("JSON serialization failed: {e}")))?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load configuration from JSON file. Validates after parsing.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: PipelineConfig = serde_json::from_str(&contents).map_err(|e| {
            PrepError::config(format!(
                "invalid JSON in '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }
}
