//! Error taxonomy for the data-preparation pipeline.
//!
//! Every failure aborts the run: the pipeline favors fail-fast correctness
//! over best-effort output, since downstream model training assumes a fully
//! consistent, fully labeled dataset. There is no partial-record skipping
//! and no silent coercion anywhere in the crate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PrepError>;

/// All errors the pipeline can surface.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A raw log or offset line failed structural parsing: wrong field
    /// count, or a field that is not a valid number.
    #[error("malformed input at line {line}: {message}")]
    MalformedInput {
        /// 1-based line number in the offending input.
        line: usize,
        /// What went wrong with the line.
        message: String,
    },

    /// An evaluation unit has no entry in the ground-truth offset table.
    #[error("no ground-truth offset for unit {unit_id}")]
    MissingOffset {
        /// The unit identifier that lacks an offset.
        unit_id: u32,
    },

    /// A feature column is constant across the fit dataset, so min-max
    /// scaling has a zero divisor. Only raised under
    /// [`DegeneratePolicy::Fail`](crate::preprocessing::DegeneratePolicy).
    #[error("column '{column}' has zero range, cannot min-max scale")]
    DegenerateColumn {
        /// Name of the constant column.
        column: String,
    },

    /// An output sink failed (disk full, permission denied, invalid path).
    #[error("write failed: {0}")]
    Write(std::io::Error),

    /// An input stream failed (missing file, read error).
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or schema, or a dataset in the wrong state
    /// for the requested operation.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PrepError {
    /// Shorthand for a malformed-input error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        PrepError::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        PrepError::Config(message.into())
    }
}
