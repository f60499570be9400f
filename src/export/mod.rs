//! Dataset Export Module
//!
//! Serializes processed datasets to delimited UTF-8 text for ML training,
//! plus a JSON metadata sidecar describing what was written.
//!
//! # Output contract
//!
//! - One header row naming every column in the fixed order from
//!   [`RecordSchema::output_header`](crate::schema::RecordSchema::output_header):
//!   unit id, raw cycle, scaled features, `cycle_norm`, `RUL`, `label1`,
//!   `label2`.
//! - One data row per record, no index column, locale-independent decimal
//!   rendering.
//!
//! # Atomicity
//!
//! Rows are written to a temporary file in the target directory and renamed
//! into place only after the full serialization succeeds. A failed run
//! never leaves a half-written dataset at the output path.
//!
//! # Example
//!
//! ```ignore
//! use rul_dataprep::export::DatasetWriter;
//!
//! let writer = DatasetWriter::default();
//! writer.write(&train, "output/train.csv")?;
//! ```

use crate::dataset::Dataset;
use crate::error::{PrepError, Result};
use crate::preprocessing::FittedScaler;
use crate::schema::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

/// Writer for processed datasets.
#[derive(Debug, Clone, Copy)]
pub struct DatasetWriter {
    delimiter: char,
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl DatasetWriter {
    /// Create a writer with the given field delimiter.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Serialize a fully processed dataset to `path`.
    ///
    /// The dataset must have been through labeling and scaling; a dataset
    /// missing derived columns is a caller bug surfaced as a `Config`
    /// error, not silently padded.
    pub fn write<P: AsRef<Path>>(&self, dataset: &Dataset, path: P) -> Result<()> {
        let path = path.as_ref();
        if !dataset.is_labeled() || !dataset.is_scaled() {
            return Err(PrepError::config(format!(
                "dataset for '{}' is missing derived columns; run labeling and scaling first",
                path.display()
            )));
        }

        let tmp_path = temp_path(path);
        let result = self.write_rows(dataset, &tmp_path);
        match result {
            Ok(()) => {
                fs::rename(&tmp_path, path).map_err(PrepError::Write)?;
                log::info!("wrote {} rows to {}", dataset.len(), path.display());
                Ok(())
            }
            Err(err) => {
                // Never leave a partial file behind
                let _ = fs::remove_file(&tmp_path);
                Err(err)
            }
        }
    }

    fn write_rows(&self, dataset: &Dataset, tmp_path: &Path) -> Result<()> {
        let file = File::create(tmp_path).map_err(PrepError::Write)?;
        let mut out = BufWriter::new(file);
        let sep = self.delimiter;

        let header = dataset.schema.output_header();
        writeln!(out, "{}", header.join(&sep.to_string())).map_err(PrepError::Write)?;

        for (i, record) in dataset.records.iter().enumerate() {
            write!(out, "{}{sep}{}", record.unit_id, record.cycle).map_err(PrepError::Write)?;
            for value in &record.features {
                write!(out, "{sep}{value}").map_err(PrepError::Write)?;
            }
            writeln!(
                out,
                "{sep}{}{sep}{}{sep}{}{sep}{}",
                dataset.cycle_norm[i],
                dataset.rul[i],
                dataset.label_binary[i],
                dataset.label_ternary[i]
            )
            .map_err(PrepError::Write)?;
        }

        out.flush().map_err(PrepError::Write)?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "dataset".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Metadata sidecar written next to each dataset.
///
/// Captures everything needed to interpret or audit the output without
/// re-running the pipeline: shape, column order, thresholds, and the exact
/// scaling ranges applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Logical name of the dataset ("run_to_failure" or "evaluation").
    pub dataset: String,

    /// Number of data rows written.
    pub rows: usize,

    /// Number of distinct units.
    pub units: usize,

    /// Output column names in written order.
    pub columns: Vec<String>,

    /// Binary alarm threshold `w1`.
    pub w1: u32,

    /// Critical threshold `w0`.
    pub w0: u32,

    /// The scaler statistics applied to this dataset.
    pub scaler: FittedScaler,

    /// Schema descriptor version.
    pub schema_version: String,

    /// Crate version that produced the output.
    pub producer_version: String,

    /// UTC creation timestamp, RFC 3339.
    pub created_at: String,
}

impl ExportMetadata {
    /// Describe a processed dataset.
    pub fn describe(
        name: impl Into<String>,
        dataset: &Dataset,
        scaler: &FittedScaler,
        w1: u32,
        w0: u32,
    ) -> Self {
        Self {
            dataset: name.into(),
            rows: dataset.len(),
            units: dataset.unit_count(),
            columns: dataset.schema.output_header(),
            w1,
            w0,
            scaler: scaler.clone(),
            schema_version: SCHEMA_VERSION.to_string(),
            producer_version: env!("CARGO_PKG_VERSION").to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Write the metadata as pretty JSON next to the dataset.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PrepError::config(format!("metadata serialization failed: {e}")))?;
        fs::write(path.as_ref(), json).map_err(PrepError::Write)?;
        Ok(())
    }

    /// Conventional sidecar path for a dataset output path:
    /// `output/train.csv` → `output/train_metadata.json`.
    pub fn sidecar_path(dataset_path: &Path) -> PathBuf {
        let stem = dataset_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        dataset_path.with_file_name(format!("{stem}_metadata.json"))
    }
}
