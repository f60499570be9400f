//! In-memory tabular model: records and datasets.
//!
//! A [`Dataset`] is the unit of work every pipeline stage consumes and
//! produces: an ordered collection of [`Record`]s plus derived columns that
//! stages fill in as they run. Derived columns are stored column-wise,
//! parallel to the record vector:
//!
//! - `rul`, `label_binary`, `label_ternary`: filled by the labeling stage
//! - `cycle_norm`: filled by the scaling stage (copy of raw cycle, then
//!   min-max scaled)
//!
//! Raw `cycle` values are never mutated; scaled features replace raw values
//! in place inside each record.

use crate::schema::RecordSchema;
use ahash::AHashSet;

/// One observation of one unit at one cycle.
///
/// `features` is aligned with [`RecordSchema::feature_names`]: for the
/// default turbofan layout that is `setting1..3` followed by `s1..s21`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unit identifier (positive, stable across the unit's lifetime).
    pub unit_id: u32,

    /// Operational time-step, 1-based per unit.
    pub cycle: u32,

    /// Feature values in schema order.
    pub features: Vec<f64>,
}

/// Ordered collection of records plus derived columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Layout of the raw input this dataset was read from.
    pub schema: RecordSchema,

    /// Records in dataset order.
    pub records: Vec<Record>,

    /// Remaining useful life per record. Empty until labeled.
    pub rul: Vec<u32>,

    /// Binary alarm label per record (1 if RUL <= w1). Empty until labeled.
    pub label_binary: Vec<u8>,

    /// Ternary zone label per record (2 critical / 1 warning / 0 healthy).
    /// Empty until labeled.
    pub label_ternary: Vec<u8>,

    /// Normalized copy of the cycle column. Empty until scaled.
    pub cycle_norm: Vec<f64>,
}

impl Dataset {
    /// Create an empty dataset with the given schema.
    pub fn new(schema: RecordSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            rul: Vec::new(),
            label_binary: Vec::new(),
            label_ternary: Vec::new(),
            cycle_norm: Vec::new(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True once the labeling stage has run.
    pub fn is_labeled(&self) -> bool {
        self.rul.len() == self.records.len()
            && self.label_binary.len() == self.records.len()
            && self.label_ternary.len() == self.records.len()
            && !self.records.is_empty()
    }

    /// True once the scaling stage has run.
    pub fn is_scaled(&self) -> bool {
        self.cycle_norm.len() == self.records.len() && !self.records.is_empty()
    }

    /// Number of distinct units.
    pub fn unit_count(&self) -> usize {
        let ids: AHashSet<u32> = self.records.iter().map(|r| r.unit_id).collect();
        ids.len()
    }

    /// Stable-sort records by `(unit_id, cycle)` ascending.
    ///
    /// Must only be called before any derived column is filled, since the
    /// derived vectors are positional.
    pub fn sort_by_unit_and_cycle(&mut self) {
        debug_assert!(self.rul.is_empty() && self.cycle_norm.is_empty());
        self.records
            .sort_by(|a, b| (a.unit_id, a.cycle).cmp(&(b.unit_id, b.cycle)));
    }
}
