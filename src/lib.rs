//! RUL Dataset Preparation
//!
//! Deterministic offline preparation of turbofan degradation logs for
//! remaining-useful-life (RUL) modeling.
//!
//! # Overview
//!
//! This library turns three raw whitespace-delimited inputs (a
//! run-to-failure sensor log, a censored evaluation log, and a
//! ground-truth offset file) into two labeled, normalized, ML-ready
//! datasets:
//!
//! - **RUL derivation**: terminal mode on the run-to-failure set, censored
//!   mode (max observed cycle + ground-truth offset) on the evaluation set
//! - **Threshold labeling**: binary alarm label and ternary health-zone
//!   label from two configurable cycle thresholds
//! - **Min-max scaling**: fitted once on the run-to-failure set and reused
//!   verbatim on the evaluation set, no refit and no clamping
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      RUL Dataset Preparation                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  schema/        - Column roles and the record layout            │
//! │  reader         - Raw log and offset-table parsing              │
//! │  labeling/      - RUL derivation and threshold labels           │
//! │  preprocessing/ - Min-max scaling with fit/apply separation     │
//! │  validation     - Post-processing sanity checks                 │
//! │  export/        - Atomic delimited-text output + metadata       │
//! │  pipeline       - End-to-end orchestration                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use rul_dataprep::prelude::*;
//!
//! let config = PipelineConfig::load_toml("prep.toml")?;
//! let output = Pipeline::from_config(config)?.run()?;
//! println!(
//!     "wrote {} train rows and {} eval rows",
//!     output.train_rows, output.eval_rows
//! );
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod labeling;
pub mod pipeline;
pub mod prelude;
pub mod preprocessing;
pub mod reader;
pub mod schema;
pub mod validation;

// Re-exports - Error handling
pub use error::{PrepError, Result};

// Re-exports - Schema
pub use schema::{ColumnDef, ColumnRole, RecordSchema};

// Re-exports - Config
pub use config::{
    DataPathConfig, ExperimentMetadata, PipelineConfig, ScalingConfig, ThresholdConfig,
};

// Re-exports - Data model
pub use dataset::{Dataset, Record};

// Re-exports - Reading
pub use reader::{read_offset_table, read_offset_table_path, LogReader, OffsetTable};

// Re-exports - Labeling
pub use labeling::{
    label_censored, label_terminal, HealthZone, LabelStats, ThresholdClassifier,
};

// Re-exports - Preprocessing
pub use preprocessing::{ColumnRange, DegeneratePolicy, FittedScaler, MinMaxScaler};

// Re-exports - Validation
pub use validation::{DatasetValidator, ValidationLevel, ValidationResult};

// Re-exports - Export
pub use export::{DatasetWriter, ExportMetadata};

// Re-exports - Pipeline
pub use pipeline::{Pipeline, PipelineOutput};
