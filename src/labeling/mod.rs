//! Label Derivation for Remaining-Useful-Life Modeling
//!
//! This module turns raw per-cycle observations into supervised-learning
//! targets:
//!
//! - [`rul`]: the remaining-useful-life regression target, in terminal mode
//!   (run-to-failure sets) or censored mode (evaluation sets with externally
//!   supplied ground-truth offsets)
//! - [`thresholds`]: the two categorical alarm labels derived from RUL by
//!   two cycle-count thresholds
//!
//! # Label semantics
//!
//! With thresholds `w0 < w1` (defaults 15 and 30), RUL is partitioned into
//! three zones:
//!
//! ```text
//! RUL > w1          healthy    label1 = 0   label2 = 0
//! w0 < RUL <= w1    warning    label1 = 1   label2 = 1
//! RUL <= w0         critical   label1 = 1   label2 = 2
//! ```
//!
//! # Example
//!
//! ```
//! use rul_dataprep::labeling::{HealthZone, ThresholdClassifier};
//!
//! let classifier = ThresholdClassifier::new(30, 15).unwrap();
//! assert_eq!(classifier.zone(100), HealthZone::Healthy);
//! assert_eq!(classifier.zone(20), HealthZone::Warning);
//! assert_eq!(classifier.classify(10), (1, 2));
//! ```

pub mod rul;
pub mod thresholds;

pub use rul::{label_censored, label_terminal};
pub use thresholds::ThresholdClassifier;

use crate::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// Health zone of a unit at one cycle, derived from RUL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthZone {
    /// RUL above the alarm threshold `w1`.
    Healthy,

    /// RUL at or below `w1` but above the critical threshold `w0`.
    Warning,

    /// RUL at or below `w0`.
    Critical,
}

impl HealthZone {
    /// Ternary class index: 0 (healthy), 1 (warning), 2 (critical).
    ///
    /// Matches the `label2` output column.
    #[inline]
    pub fn as_class_index(&self) -> u8 {
        match self {
            HealthZone::Healthy => 0,
            HealthZone::Warning => 1,
            HealthZone::Critical => 2,
        }
    }

    /// Create from a ternary class index.
    pub fn from_class_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(HealthZone::Healthy),
            1 => Some(HealthZone::Warning),
            2 => Some(HealthZone::Critical),
            _ => None,
        }
    }

    /// Binary alarm flag: 1 unless healthy. Matches the `label1` column.
    #[inline]
    pub fn as_alarm_flag(&self) -> u8 {
        match self {
            HealthZone::Healthy => 0,
            HealthZone::Warning | HealthZone::Critical => 1,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            HealthZone::Healthy => "Healthy",
            HealthZone::Warning => "Warning",
            HealthZone::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for HealthZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Zone counts over a labeled dataset, for class-balance analysis.
#[derive(Debug, Clone, Default)]
pub struct LabelStats {
    /// Total labeled records.
    pub total: usize,

    /// Records in the healthy zone.
    pub healthy_count: usize,

    /// Records in the warning zone.
    pub warning_count: usize,

    /// Records in the critical zone.
    pub critical_count: usize,
}

impl LabelStats {
    /// Compute zone counts from a labeled dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut stats = Self {
            total: dataset.label_ternary.len(),
            ..Default::default()
        };
        for &label in &dataset.label_ternary {
            match label {
                0 => stats.healthy_count += 1,
                1 => stats.warning_count += 1,
                _ => stats.critical_count += 1,
            }
        }
        stats
    }

    /// Zone fractions `(healthy, warning, critical)`, each in `[0, 1]`.
    pub fn class_balance(&self) -> (f64, f64, f64) {
        if self.total == 0 {
            return (0.0, 0.0, 0.0);
        }
        let total = self.total as f64;
        (
            self.healthy_count as f64 / total,
            self.warning_count as f64 / total,
            self.critical_count as f64 / total,
        )
    }

    /// The most frequent zone.
    pub fn majority_zone(&self) -> HealthZone {
        if self.healthy_count >= self.warning_count && self.healthy_count >= self.critical_count {
            HealthZone::Healthy
        } else if self.warning_count >= self.critical_count {
            HealthZone::Warning
        } else {
            HealthZone::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use crate::schema::RecordSchema;

    #[test]
    fn test_zone_class_index_roundtrip() {
        for zone in [HealthZone::Healthy, HealthZone::Warning, HealthZone::Critical] {
            let idx = zone.as_class_index();
            assert_eq!(HealthZone::from_class_index(idx), Some(zone));
        }
        assert_eq!(HealthZone::from_class_index(3), None);
    }

    #[test]
    fn test_alarm_flag() {
        assert_eq!(HealthZone::Healthy.as_alarm_flag(), 0);
        assert_eq!(HealthZone::Warning.as_alarm_flag(), 1);
        assert_eq!(HealthZone::Critical.as_alarm_flag(), 1);
    }

    #[test]
    fn test_zone_display() {
        assert_eq!(format!("{}", HealthZone::Critical), "Critical");
    }

    #[test]
    fn test_label_stats_counts_and_balance() {
        let mut ds = Dataset::new(RecordSchema::turbofan());
        for i in 0..4u32 {
            ds.records.push(Record {
                unit_id: 1,
                cycle: i + 1,
                features: vec![0.0; 24],
            });
        }
        ds.label_ternary = vec![0, 1, 2, 2];
        let stats = LabelStats::from_dataset(&ds);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.healthy_count, 1);
        assert_eq!(stats.warning_count, 1);
        assert_eq!(stats.critical_count, 2);
        assert_eq!(stats.majority_zone(), HealthZone::Critical);

        let (h, w, c) = stats.class_balance();
        assert!((h - 0.25).abs() < 1e-12);
        assert!((w - 0.25).abs() < 1e-12);
        assert!((c - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_label_stats_empty() {
        let ds = Dataset::new(RecordSchema::turbofan());
        let stats = LabelStats::from_dataset(&ds);
        assert_eq!(stats.class_balance(), (0.0, 0.0, 0.0));
    }
}
