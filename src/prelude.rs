//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for ergonomic usage
//! of the preparation library.
//!
//! # Usage
//!
//! ```ignore
//! use rul_dataprep::prelude::*;
//!
//! let config = PipelineConfig::default();
//! let pipeline = Pipeline::from_config(config)?;
//! let output = pipeline.run()?;
//! ```
//!
//! # What's Included
//!
//! ## Core Pipeline
//! - [`Pipeline`] - End-to-end preparation pipeline
//! - [`PipelineConfig`] - Pipeline configuration
//! - [`PipelineOutput`] - Run summary
//!
//! ## Reading
//! - [`LogReader`] - Schema-driven raw log parsing
//! - [`OffsetTable`] - Ground-truth offsets keyed by unit id
//!
//! ## Labeling
//! - [`label_terminal`] / [`label_censored`] - RUL derivation
//! - [`ThresholdClassifier`] - Binary and ternary labels
//! - [`HealthZone`] / [`LabelStats`] - Label semantics and distribution
//!
//! ## Scaling
//! - [`MinMaxScaler`] - Fits per-column ranges
//! - [`FittedScaler`] - Immutable statistics, reusable across datasets
//!
//! ## Export and Validation
//! - [`DatasetWriter`] / [`ExportMetadata`] - Atomic output
//! - [`DatasetValidator`] / [`ValidationResult`] - Post-processing checks

// ============================================================================
// Core Pipeline
// ============================================================================

pub use crate::config::{
    DataPathConfig, ExperimentMetadata, PipelineConfig, ScalingConfig, ThresholdConfig,
};
pub use crate::pipeline::{Pipeline, PipelineOutput};

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::error::{PrepError, Result};

// ============================================================================
// Schema and Data Model
// ============================================================================

pub use crate::dataset::{Dataset, Record};
pub use crate::schema::{ColumnDef, ColumnRole, RecordSchema};

// ============================================================================
// Reading
// ============================================================================

pub use crate::reader::{read_offset_table, read_offset_table_path, LogReader, OffsetTable};

// ============================================================================
// Labeling
// ============================================================================

pub use crate::labeling::{
    label_censored, label_terminal, HealthZone, LabelStats, ThresholdClassifier,
};

// ============================================================================
// Preprocessing
// ============================================================================

pub use crate::preprocessing::{ColumnRange, DegeneratePolicy, FittedScaler, MinMaxScaler};

// ============================================================================
// Export
// ============================================================================

pub use crate::export::{DatasetWriter, ExportMetadata};

// ============================================================================
// Validation
// ============================================================================

pub use crate::validation::{DatasetValidator, ValidationLevel, ValidationResult};
