//! Unified Pipeline for RUL Dataset Preparation
//!
//! This module connects all components into a single deterministic run:
//! - Log reading (run-to-failure, censored, ground-truth offsets)
//! - RUL derivation (terminal and censored modes)
//! - Threshold labeling (binary and ternary)
//! - Min-max scaling (fit on run-to-failure, reuse on evaluation)
//! - Validation and atomic export
//!
//! # Architecture
//!
//! ```text
//! train log ──► LogReader ──► label_terminal ──► ThresholdClassifier
//!                                                       │
//!                                          MinMaxScaler::fit_transform
//!                                                       │ FittedScaler
//! eval log ───► LogReader ──► label_censored ──► ThresholdClassifier
//! offsets ────► OffsetTable ───────┘                    │
//!                                            FittedScaler::transform
//!                                                       │
//!                                     DatasetWriter (both, after both succeed)
//! ```
//!
//! # Ordering Guarantees
//!
//! Scaling statistics are fitted on the run-to-failure set before the
//! evaluation set is touched, and the evaluation set is transformed with
//! the returned [`FittedScaler`], never refitted. Both output files are
//! written only after both transformation chains complete, so a failure
//! anywhere leaves no partial output pair on disk.
//!
//! # Example
//!
//! ```ignore
//! use rul_dataprep::prelude::*;
//!
//! let config = PipelineConfig::load_toml("prep.toml")?;
//! let pipeline = Pipeline::from_config(config)?;
//! let output = pipeline.run()?;
//! println!("{} train rows, {} eval rows", output.train_rows, output.eval_rows);
//! ```

use crate::config::PipelineConfig;
use crate::dataset::Dataset;
use crate::error::{PrepError, Result};
use crate::export::{DatasetWriter, ExportMetadata};
use crate::labeling::{label_censored, label_terminal, LabelStats, ThresholdClassifier};
use crate::preprocessing::{FittedScaler, MinMaxScaler};
use crate::reader::LogReader;
use crate::schema::RecordSchema;
use crate::validation::DatasetValidator;
use std::path::PathBuf;

/// Output from a completed pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Rows written to the run-to-failure output
    pub train_rows: usize,

    /// Rows written to the evaluation output
    pub eval_rows: usize,

    /// Distinct units in the run-to-failure set
    pub train_units: usize,

    /// Distinct units in the evaluation set
    pub eval_units: usize,

    /// Label distribution of the run-to-failure set
    pub train_label_stats: LabelStats,

    /// Label distribution of the evaluation set
    pub eval_label_stats: LabelStats,

    /// Path of the run-to-failure output file
    pub train_path: PathBuf,

    /// Path of the evaluation output file
    pub eval_path: PathBuf,

    /// The scaler fitted during the run, for audit or reuse
    pub scaler: FittedScaler,
}

/// Main pipeline, created from a validated configuration.
pub struct Pipeline {
    config: PipelineConfig,
    schema: RecordSchema,
    classifier: ThresholdClassifier,
}

impl Pipeline {
    /// Create a pipeline from configuration with the standard turbofan
    /// schema.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        Self::with_schema(config, RecordSchema::turbofan())
    }

    /// Create a pipeline with an explicit record schema.
    pub fn with_schema(config: PipelineConfig, schema: RecordSchema) -> Result<Self> {
        config.validate()?;
        let classifier = ThresholdClassifier::new(config.thresholds.w1, config.thresholds.w0)?;
        Ok(Self {
            config,
            schema,
            classifier,
        })
    }

    /// Get the pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full preparation: read, label, scale, validate, export.
    ///
    /// Deterministic for a given configuration and input set: no
    /// randomness, no timestamps in the data path, no parallel reduction.
    pub fn run(&self) -> Result<PipelineOutput> {
        let (train, eval, scaler) = self.prepare()?;

        // Both chains succeeded; only now touch the output paths.
        let writer = DatasetWriter::new(self.config.delimiter);
        writer.write(&train, &self.config.paths.train_output)?;
        writer.write(&eval, &self.config.paths.eval_output)?;

        let w1 = self.classifier.w1();
        let w0 = self.classifier.w0();
        ExportMetadata::describe("run_to_failure", &train, &scaler, w1, w0)
            .write(ExportMetadata::sidecar_path(&self.config.paths.train_output))?;
        ExportMetadata::describe("evaluation", &eval, &scaler, w1, w0)
            .write(ExportMetadata::sidecar_path(&self.config.paths.eval_output))?;

        let train_label_stats = LabelStats::from_dataset(&train);
        let eval_label_stats = LabelStats::from_dataset(&eval);
        log::info!(
            "pipeline complete: {} train rows ({} units), {} eval rows ({} units)",
            train.len(),
            train.unit_count(),
            eval.len(),
            eval.unit_count()
        );

        Ok(PipelineOutput {
            train_rows: train.len(),
            eval_rows: eval.len(),
            train_units: train.unit_count(),
            eval_units: eval.unit_count(),
            train_label_stats,
            eval_label_stats,
            train_path: self.config.paths.train_output.clone(),
            eval_path: self.config.paths.eval_output.clone(),
            scaler,
        })
    }

    /// Run every transformation but write nothing. Returns the processed
    /// datasets and the fitted scaler.
    ///
    /// Useful for in-process consumers and for dry-run validation.
    pub fn prepare(&self) -> Result<(Dataset, Dataset, FittedScaler)> {
        let reader = LogReader::new(self.schema.clone());

        log::info!(
            "reading run-to-failure log from {}",
            self.config.paths.run_to_failure.display()
        );
        let mut train = reader.read_run_to_failure_path(&self.config.paths.run_to_failure)?;

        log::info!(
            "reading evaluation log from {}",
            self.config.paths.evaluation.display()
        );
        let mut eval = reader.read_evaluation_path(&self.config.paths.evaluation)?;

        let offsets = crate::reader::read_offset_table_path(&self.config.paths.offsets)?;
        let train_rows_read = train.len();
        let eval_rows_read = eval.len();

        // Train chain: label, classify, fit + scale.
        label_terminal(&mut train);
        self.classifier.apply(&mut train)?;
        let scaler = MinMaxScaler::new(self.config.scaling.degenerate_policy);
        let fitted = scaler.fit_transform(&mut train)?;

        // Eval chain: label against ground truth, classify, reuse the fit.
        label_censored(&mut eval, &offsets)?;
        self.classifier.apply(&mut eval)?;
        fitted.transform(&mut eval)?;

        self.check(&train, train_rows_read, &eval, eval_rows_read)?;
        Ok((train, eval, fitted))
    }

    fn check(
        &self,
        train: &Dataset,
        train_rows_read: usize,
        eval: &Dataset,
        eval_rows_read: usize,
    ) -> Result<()> {
        let validator = DatasetValidator::new(self.classifier);

        let mut train_result = validator.validate_terminal(train);
        validator.validate_row_count(train, train_rows_read, &mut train_result);
        for warning in train_result.warnings() {
            log::warn!("run-to-failure: {warning}");
        }
        if train_result.has_errors() {
            return Err(PrepError::config(format!(
                "run-to-failure dataset failed validation:\n{train_result}"
            )));
        }

        let mut eval_result = validator.validate_censored(eval);
        validator.validate_row_count(eval, eval_rows_read, &mut eval_result);
        for warning in eval_result.warnings() {
            log::warn!("evaluation: {warning}");
        }
        if eval_result.has_errors() {
            return Err(PrepError::config(format!(
                "evaluation dataset failed validation:\n{eval_result}"
            )));
        }

        Ok(())
    }
}
