//! Threshold-based categorical labels.
//!
//! A pure function of RUL and two fixed cycle-count thresholds `w0 < w1`:
//!
//! ```text
//! label1 = 1 if RUL <= w1 else 0
//! label2 = 2 if RUL <= w0 else label1
//! ```
//!
//! Applied identically to both datasets, independently per record; no
//! cross-record state. Thresholds come from validated configuration, not
//! per-call input.

use super::HealthZone;
use crate::dataset::Dataset;
use crate::error::{PrepError, Result};

/// Classifier holding the two validated thresholds.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdClassifier {
    w1: u32,
    w0: u32,
}

impl ThresholdClassifier {
    /// Create a classifier. Requires `0 < w0 < w1`.
    pub fn new(w1: u32, w0: u32) -> Result<Self> {
        if w0 == 0 {
            return Err(PrepError::config("threshold w0 must be > 0"));
        }
        if w0 >= w1 {
            return Err(PrepError::config(format!(
                "threshold w0 ({w0}) must be < w1 ({w1})"
            )));
        }
        Ok(Self { w1, w0 })
    }

    /// Alarm threshold `w1`.
    pub fn w1(&self) -> u32 {
        self.w1
    }

    /// Critical threshold `w0`.
    pub fn w0(&self) -> u32 {
        self.w0
    }

    /// Health zone for a single RUL value.
    pub fn zone(&self, rul: u32) -> HealthZone {
        if rul <= self.w0 {
            HealthZone::Critical
        } else if rul <= self.w1 {
            HealthZone::Warning
        } else {
            HealthZone::Healthy
        }
    }

    /// `(label1, label2)` for a single RUL value.
    pub fn classify(&self, rul: u32) -> (u8, u8) {
        let zone = self.zone(rul);
        (zone.as_alarm_flag(), zone.as_class_index())
    }

    /// Fill `label_binary` and `label_ternary` for a dataset whose `rul`
    /// column is already derived.
    pub fn apply(&self, dataset: &mut Dataset) -> Result<()> {
        if dataset.rul.len() != dataset.records.len() {
            return Err(PrepError::config(
                "cannot classify a dataset without a derived RUL column",
            ));
        }

        dataset.label_binary.clear();
        dataset.label_ternary.clear();
        dataset.label_binary.reserve(dataset.len());
        dataset.label_ternary.reserve(dataset.len());
        for &rul in &dataset.rul {
            let (binary, ternary) = self.classify(rul);
            dataset.label_binary.push(binary);
            dataset.label_ternary.push(ternary);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use crate::schema::RecordSchema;

    fn classifier() -> ThresholdClassifier {
        ThresholdClassifier::new(30, 15).unwrap()
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        assert!(ThresholdClassifier::new(15, 30).is_err());
        assert!(ThresholdClassifier::new(15, 15).is_err());
        assert!(ThresholdClassifier::new(30, 0).is_err());
    }

    #[test]
    fn test_zone_boundaries() {
        let c = classifier();
        assert_eq!(c.zone(0), HealthZone::Critical);
        assert_eq!(c.zone(15), HealthZone::Critical);
        assert_eq!(c.zone(16), HealthZone::Warning);
        assert_eq!(c.zone(30), HealthZone::Warning);
        assert_eq!(c.zone(31), HealthZone::Healthy);
        assert_eq!(c.zone(u32::MAX), HealthZone::Healthy);
    }

    #[test]
    fn test_classify_matches_zone_encoding() {
        let c = classifier();
        assert_eq!(c.classify(10), (1, 2));
        assert_eq!(c.classify(20), (1, 1));
        assert_eq!(c.classify(100), (0, 0));
    }

    #[test]
    fn test_apply_fills_both_label_columns() {
        let schema = RecordSchema::turbofan();
        let n = schema.feature_count();
        let mut ds = Dataset::new(schema);
        for cycle in 1..=3 {
            ds.records.push(Record {
                unit_id: 1,
                cycle,
                features: vec![0.0; n],
            });
        }
        ds.rul = vec![40, 20, 5];

        classifier().apply(&mut ds).unwrap();
        assert_eq!(ds.label_binary, vec![0, 1, 1]);
        assert_eq!(ds.label_ternary, vec![0, 1, 2]);
    }

    #[test]
    fn test_apply_without_rul_fails() {
        let mut ds = Dataset::new(RecordSchema::turbofan());
        ds.records.push(Record {
            unit_id: 1,
            cycle: 1,
            features: vec![0.0; 24],
        });
        assert!(classifier().apply(&mut ds).is_err());
    }
}
