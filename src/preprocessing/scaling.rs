//! Min-max scaler implementation.

use crate::dataset::Dataset;
use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};

/// Name of the synthetic normalized-cycle column.
pub const CYCLE_NORM_COLUMN: &str = "cycle_norm";

/// What to do when a fit column has zero range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Map every value of a constant column to 0.0.
    #[default]
    Zero,

    /// Abort the fit with a `DegenerateColumn` error.
    Fail,
}

/// Observed `(min, max)` for one scaled column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    /// Minimum observed at fit time.
    pub min: f64,

    /// Maximum observed at fit time.
    pub max: f64,
}

impl ColumnRange {
    /// True if the column was constant at fit time.
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }
}

/// Min-max scaler: computes per-column ranges on one dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxScaler {
    policy: DegeneratePolicy,
}

impl MinMaxScaler {
    /// Create a scaler with the given degenerate-column policy.
    pub fn new(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    /// Compute per-column `(min, max)` over the dataset's feature columns
    /// and its cycle column, without modifying the dataset.
    pub fn fit(&self, dataset: &Dataset) -> Result<FittedScaler> {
        if dataset.is_empty() {
            return Err(PrepError::config("cannot fit scaler on an empty dataset"));
        }

        let feature_count = dataset.schema.feature_count();
        let mut ranges = vec![
            ColumnRange {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            };
            feature_count + 1
        ];

        for record in &dataset.records {
            for (range, &value) in ranges.iter_mut().zip(&record.features) {
                if value < range.min {
                    range.min = value;
                }
                if value > range.max {
                    range.max = value;
                }
            }
            let cycle = record.cycle as f64;
            let cycle_range = &mut ranges[feature_count];
            if cycle < cycle_range.min {
                cycle_range.min = cycle;
            }
            if cycle > cycle_range.max {
                cycle_range.max = cycle;
            }
        }

        let mut columns: Vec<String> = dataset
            .schema
            .feature_names()
            .into_iter()
            .map(String::from)
            .collect();
        columns.push(CYCLE_NORM_COLUMN.to_string());

        if self.policy == DegeneratePolicy::Fail {
            for (name, range) in columns.iter().zip(&ranges) {
                if range.is_degenerate() {
                    return Err(PrepError::DegenerateColumn {
                        column: name.clone(),
                    });
                }
            }
        }

        let degenerate = ranges.iter().filter(|r| r.is_degenerate()).count();
        if degenerate > 0 {
            log::warn!("{degenerate} constant column(s) will be scaled to 0.0");
        }

        Ok(FittedScaler {
            columns,
            ranges,
            policy: self.policy,
        })
    }

    /// Fit on the dataset, then normalize it in place with the resulting
    /// statistics. Returns the fitted scaler for reuse on other datasets.
    pub fn fit_transform(&self, dataset: &mut Dataset) -> Result<FittedScaler> {
        let fitted = self.fit(dataset)?;
        fitted.transform(dataset)?;
        Ok(fitted)
    }
}

/// Per-column scaling statistics captured at fit time.
///
/// Immutable once built; applying it to another dataset never recomputes
/// statistics, which keeps both datasets in the same normalized coordinate
/// system. Serializable so the ranges can be dumped into export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedScaler {
    columns: Vec<String>,
    ranges: Vec<ColumnRange>,
    policy: DegeneratePolicy,
}

impl FittedScaler {
    /// Names of the scaled columns, feature columns first, `cycle_norm`
    /// last.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Range captured for a column, by name.
    pub fn range(&self, column: &str) -> Option<ColumnRange> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.ranges[i])
    }

    /// All captured ranges, aligned with [`columns`](Self::columns).
    pub fn ranges(&self) -> &[ColumnRange] {
        &self.ranges
    }

    /// Normalize a dataset in place using the stored ranges.
    ///
    /// Fills `cycle_norm` from the raw cycle column, then rescales it and
    /// every feature column. Values outside the fitted range map outside
    /// `[0, 1]`; they are deliberately not clamped, so replaying a fit-set
    /// row reproduces its fit-time output and evaluation rows stay on the
    /// same affine map.
    pub fn transform(&self, dataset: &mut Dataset) -> Result<()> {
        let feature_count = dataset.schema.feature_count();
        let expected: Vec<&str> = dataset.schema.feature_names();
        if self.columns.len() != feature_count + 1
            || !expected.iter().zip(&self.columns).all(|(a, b)| a == b)
        {
            return Err(PrepError::config(
                "fitted scaler columns do not match dataset schema",
            ));
        }

        dataset.cycle_norm.clear();
        dataset.cycle_norm.reserve(dataset.len());
        let cycle_range = self.ranges[feature_count];
        for record in &mut dataset.records {
            for (i, value) in record.features.iter_mut().enumerate() {
                *value = scale(*value, self.ranges[i]);
            }
            dataset
                .cycle_norm
                .push(scale(record.cycle as f64, cycle_range));
        }
        Ok(())
    }
}

#[inline]
fn scale(value: f64, range: ColumnRange) -> f64 {
    if range.is_degenerate() {
        0.0
    } else {
        (value - range.min) / (range.max - range.min)
    }
}
