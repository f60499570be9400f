//! Dataset Validation Module
//!
//! Post-processing sanity checks on labeled, scaled datasets before they
//! are written out. Catches pipeline bugs (wrong RUL derivation, leaked
//! scaling state, dropped rows) rather than bad input data; input errors
//! are rejected earlier by the reader.
//!
//! # Validation Categories
//!
//! 1. **RUL Structure**: terminal zero per unit, strictly decreasing within
//!    contiguous unit runs
//! 2. **Label Consistency**: label columns agree with thresholds applied to
//!    the RUL column
//! 3. **Scaling Ranges**: fit-set values land in [0, 1], NaN/Inf detection
//! 4. **Row Preservation**: processed row count matches the reader's count
//!
//! # Usage
//!
//! ```ignore
//! use rul_dataprep::validation::DatasetValidator;
//!
//! let validator = DatasetValidator::new(classifier);
//! let result = validator.validate_terminal(&train);
//!
//! if !result.is_valid() {
//!     for error in result.errors() {
//!         log::error!("{error}");
//!     }
//! }
//! ```

use crate::dataset::Dataset;
use crate::labeling::ThresholdClassifier;
use std::fmt;

/// Validation result for a single check.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    /// Check passed
    Valid,
    /// Check found a minor issue
    Warning(String),
    /// Check found a serious issue
    Error(String),
}

impl ValidationLevel {
    /// Check if this result indicates valid data.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationLevel::Valid)
    }

    /// Check if this result is a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationLevel::Warning(_))
    }

    /// Check if this result is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationLevel::Error(_))
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationLevel::Valid => write!(f, "Valid"),
            ValidationLevel::Warning(msg) => write!(f, "Warning: {msg}"),
            ValidationLevel::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Aggregated validation result.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// All validation results
    results: Vec<(String, ValidationLevel)>,
}

impl ValidationResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation result.
    pub fn add(&mut self, check_name: &str, level: ValidationLevel) {
        self.results.push((check_name.to_string(), level));
    }

    /// Check if all validations passed (no errors or warnings).
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, level)| level.is_valid())
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|(_, level)| level.is_error())
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.results.iter().any(|(_, level)| level.is_warning())
    }

    /// Get all warnings as formatted strings.
    pub fn warnings(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|(name, level)| match level {
                ValidationLevel::Warning(msg) => Some(format!("{name}: {msg}")),
                _ => None,
            })
            .collect()
    }

    /// Get all errors as formatted strings.
    pub fn errors(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|(name, level)| match level {
                ValidationLevel::Error(msg) => Some(format!("{name}: {msg}")),
                _ => None,
            })
            .collect()
    }

    /// Get all results.
    pub fn all_results(&self) -> &[(String, ValidationLevel)] {
        &self.results
    }

    /// Get the number of checks performed.
    pub fn check_count(&self) -> usize {
        self.results.len()
    }

    /// Get the number of passed checks.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|(_, l)| l.is_valid()).count()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.passed_count();
        let total = self.check_count();
        writeln!(f, "Validation: {passed}/{total} checks passed")?;

        for (name, level) in &self.results {
            if !level.is_valid() {
                writeln!(f, "  - {name}: {level}")?;
            }
        }

        Ok(())
    }
}

/// Validator for processed datasets.
#[derive(Debug, Clone, Copy)]
pub struct DatasetValidator {
    classifier: ThresholdClassifier,
}

impl DatasetValidator {
    /// Create a validator that checks labels against the given thresholds.
    pub fn new(classifier: ThresholdClassifier) -> Self {
        Self { classifier }
    }

    /// Validate a run-to-failure dataset after labeling and scaling.
    ///
    /// Runs every check including the terminal-zero invariant and the
    /// fit-set range check (scaled values must land in [0, 1] on the set
    /// the scaler was fitted to).
    pub fn validate_terminal(&self, dataset: &Dataset) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.validate_derived_columns(dataset, &mut result);
        if result.has_errors() {
            return result;
        }
        self.validate_terminal_zero(dataset, &mut result);
        self.validate_rul_decreasing(dataset, &mut result);
        self.validate_labels(dataset, &mut result);
        self.validate_fit_ranges(dataset, &mut result);
        result
    }

    /// Validate an evaluation dataset after labeling and scaling.
    ///
    /// Skips the terminal-zero and [0, 1] range checks: censored units
    /// need not end at RUL 0, and values outside the fit ranges are
    /// expected (no clamping).
    pub fn validate_censored(&self, dataset: &Dataset) -> ValidationResult {
        let mut result = ValidationResult::new();
        self.validate_derived_columns(dataset, &mut result);
        if result.has_errors() {
            return result;
        }
        self.validate_rul_decreasing(dataset, &mut result);
        self.validate_labels(dataset, &mut result);
        self.validate_finite(dataset, &mut result);
        result
    }

    /// Check that the reader's row count survived the pipeline.
    pub fn validate_row_count(
        &self,
        dataset: &Dataset,
        rows_read: usize,
        result: &mut ValidationResult,
    ) {
        if dataset.len() == rows_read {
            result.add("row_preservation", ValidationLevel::Valid);
        } else {
            result.add(
                "row_preservation",
                ValidationLevel::Error(format!(
                    "read {rows_read} rows but dataset holds {}",
                    dataset.len()
                )),
            );
        }
    }

    fn validate_derived_columns(&self, dataset: &Dataset, result: &mut ValidationResult) {
        if dataset.is_labeled() && dataset.is_scaled() {
            result.add("derived_columns", ValidationLevel::Valid);
        } else {
            result.add(
                "derived_columns",
                ValidationLevel::Error(format!(
                    "derived columns incomplete: {} records, {} rul, {} label1, {} label2, {} cycle_norm",
                    dataset.records.len(),
                    dataset.rul.len(),
                    dataset.label_binary.len(),
                    dataset.label_ternary.len(),
                    dataset.cycle_norm.len()
                )),
            );
        }
    }

    /// Every unit's maximum observed cycle must carry RUL 0.
    fn validate_terminal_zero(&self, dataset: &Dataset, result: &mut ValidationResult) {
        let mut max_cycle: ahash::AHashMap<u32, (u32, u32)> = ahash::AHashMap::new();
        for (record, &rul) in dataset.records.iter().zip(&dataset.rul) {
            let entry = max_cycle.entry(record.unit_id).or_insert((0, u32::MAX));
            if record.cycle > entry.0 {
                *entry = (record.cycle, rul);
            }
        }

        let bad: Vec<u32> = max_cycle
            .iter()
            .filter(|(_, &(_, rul))| rul != 0)
            .map(|(&unit, _)| unit)
            .collect();
        if bad.is_empty() {
            result.add("terminal_zero", ValidationLevel::Valid);
        } else {
            result.add(
                "terminal_zero",
                ValidationLevel::Error(format!(
                    "{} unit(s) do not reach RUL 0 at their final cycle (e.g. unit {})",
                    bad.len(),
                    bad[0]
                )),
            );
        }
    }

    /// RUL must strictly decrease across consecutive records of the same
    /// unit. Assumes unit-grouped record order, which both reading modes
    /// provide for well-formed input.
    fn validate_rul_decreasing(&self, dataset: &Dataset, result: &mut ValidationResult) {
        for i in 1..dataset.len() {
            let prev = &dataset.records[i - 1];
            let curr = &dataset.records[i];
            if prev.unit_id == curr.unit_id && dataset.rul[i] >= dataset.rul[i - 1] {
                result.add(
                    "rul_decreasing",
                    ValidationLevel::Error(format!(
                        "unit {} RUL not strictly decreasing at row {}: {} -> {}",
                        curr.unit_id,
                        i,
                        dataset.rul[i - 1],
                        dataset.rul[i]
                    )),
                );
                return;
            }
        }
        result.add("rul_decreasing", ValidationLevel::Valid);
    }

    /// Recompute both labels from RUL and compare with the stored columns.
    fn validate_labels(&self, dataset: &Dataset, result: &mut ValidationResult) {
        for (i, &rul) in dataset.rul.iter().enumerate() {
            let (binary, ternary) = self.classifier.classify(rul);
            if dataset.label_binary[i] != binary || dataset.label_ternary[i] != ternary {
                result.add(
                    "label_consistency",
                    ValidationLevel::Error(format!(
                        "row {i}: labels ({}, {}) disagree with RUL {rul} -> ({binary}, {ternary})",
                        dataset.label_binary[i], dataset.label_ternary[i]
                    )),
                );
                return;
            }
        }
        result.add("label_consistency", ValidationLevel::Valid);
    }

    /// Fit-set scaled values must land in [0, 1] and be finite.
    fn validate_fit_ranges(&self, dataset: &Dataset, result: &mut ValidationResult) {
        let mut out_of_range = 0usize;
        for record in &dataset.records {
            for &value in &record.features {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    out_of_range += 1;
                }
            }
        }
        for &value in &dataset.cycle_norm {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                out_of_range += 1;
            }
        }

        if out_of_range == 0 {
            result.add("fit_ranges", ValidationLevel::Valid);
        } else {
            result.add(
                "fit_ranges",
                ValidationLevel::Error(format!(
                    "{out_of_range} scaled value(s) outside [0, 1] on the fit set"
                )),
            );
        }
    }

    /// Evaluation values may leave [0, 1] but must stay finite.
    fn validate_finite(&self, dataset: &Dataset, result: &mut ValidationResult) {
        let mut non_finite = 0usize;
        for record in &dataset.records {
            non_finite += record.features.iter().filter(|v| !v.is_finite()).count();
        }
        non_finite += dataset.cycle_norm.iter().filter(|v| !v.is_finite()).count();

        if non_finite == 0 {
            result.add("finite_values", ValidationLevel::Valid);
        } else {
            result.add(
                "finite_values",
                ValidationLevel::Error(format!("{non_finite} NaN/Inf value(s) after scaling")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use crate::labeling::{label_censored, label_terminal};
    use crate::preprocessing::MinMaxScaler;
    use crate::reader::OffsetTable;
    use crate::schema::{ColumnDef, ColumnRole, RecordSchema};

    fn small_schema() -> RecordSchema {
        RecordSchema::new(vec![
            ColumnDef::new("id", ColumnRole::UnitId),
            ColumnDef::new("cycle", ColumnRole::Cycle),
            ColumnDef::new("f1", ColumnRole::Feature),
        ])
        .unwrap()
    }

    fn processed_terminal() -> Dataset {
        let mut ds = Dataset::new(small_schema());
        for unit_id in 1..=2u32 {
            for cycle in 1..=5u32 {
                ds.records.push(Record {
                    unit_id,
                    cycle,
                    features: vec![(unit_id * cycle) as f64],
                });
            }
        }
        label_terminal(&mut ds);
        classifier().apply(&mut ds).unwrap();
        MinMaxScaler::default().fit_transform(&mut ds).unwrap();
        ds
    }

    fn classifier() -> ThresholdClassifier {
        ThresholdClassifier::new(30, 15).unwrap()
    }

    #[test]
    fn test_valid_terminal_dataset() {
        let ds = processed_terminal();
        let result = DatasetValidator::new(classifier()).validate_terminal(&ds);
        assert!(result.is_valid(), "{result}");
        assert!(!result.has_errors());
    }

    #[test]
    fn test_detects_missing_terminal_zero() {
        let mut ds = processed_terminal();
        // Corrupt the final-cycle RUL of unit 1 (row index 4)
        ds.rul[4] = 3;
        let result = DatasetValidator::new(classifier()).validate_terminal(&ds);
        assert!(result.has_errors());
        assert!(result.errors().iter().any(|e| e.contains("terminal_zero")));
    }

    #[test]
    fn test_detects_non_decreasing_rul() {
        let mut ds = processed_terminal();
        ds.rul[1] = ds.rul[0] + 1;
        let result = DatasetValidator::new(classifier()).validate_terminal(&ds);
        assert!(result
            .errors()
            .iter()
            .any(|e| e.contains("rul_decreasing")));
    }

    #[test]
    fn test_detects_label_mismatch() {
        let mut ds = processed_terminal();
        // All RUL values here are <= 4, so label1 must be 1 everywhere
        ds.label_binary[2] = 0;
        let result = DatasetValidator::new(classifier()).validate_terminal(&ds);
        assert!(result
            .errors()
            .iter()
            .any(|e| e.contains("label_consistency")));
    }

    #[test]
    fn test_detects_out_of_range_fit_values() {
        let mut ds = processed_terminal();
        ds.records[0].features[0] = 1.5;
        let result = DatasetValidator::new(classifier()).validate_terminal(&ds);
        assert!(result.errors().iter().any(|e| e.contains("fit_ranges")));
    }

    #[test]
    fn test_censored_allows_values_outside_unit_interval() {
        let fitted = {
            let mut train = processed_terminal();
            MinMaxScaler::default().fit_transform(&mut train).unwrap()
        };

        let mut eval = Dataset::new(small_schema());
        for cycle in 1..=3u32 {
            eval.records.push(Record {
                unit_id: 1,
                cycle,
                // Values above the fit maximum, scales past 1.0
                features: vec![100.0 + cycle as f64],
            });
        }
        label_censored(&mut eval, &OffsetTable::from_pairs([(1, 20)])).unwrap();
        classifier().apply(&mut eval).unwrap();
        fitted.transform(&mut eval).unwrap();

        let result = DatasetValidator::new(classifier()).validate_censored(&eval);
        assert!(result.is_valid(), "{result}");
    }

    #[test]
    fn test_unprocessed_dataset_fails_fast() {
        let ds = Dataset::new(small_schema());
        let mut ds = ds;
        ds.records.push(Record {
            unit_id: 1,
            cycle: 1,
            features: vec![0.0],
        });
        let result = DatasetValidator::new(classifier()).validate_terminal(&ds);
        assert!(result.has_errors());
        assert_eq!(result.check_count(), 1);
    }

    #[test]
    fn test_row_count_preservation() {
        let ds = processed_terminal();
        let validator = DatasetValidator::new(classifier());
        let mut result = ValidationResult::new();
        validator.validate_row_count(&ds, ds.len(), &mut result);
        assert!(result.is_valid());

        let mut result = ValidationResult::new();
        validator.validate_row_count(&ds, ds.len() + 1, &mut result);
        assert!(result.has_errors());
    }

    #[test]
    fn test_validation_result_display() {
        let mut result = ValidationResult::new();
        result.add("check_a", ValidationLevel::Valid);
        result.add("check_b", ValidationLevel::Warning("minor".to_string()));
        result.add("check_c", ValidationLevel::Error("major".to_string()));

        let display = format!("{result}");
        assert!(display.contains("1/3"));
        assert!(display.contains("check_c"));
    }
}
