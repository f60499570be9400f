//! Column definitions and the record schema descriptor.
//!
//! A [`RecordSchema`] is an ordered list of typed column definitions:
//! - `ColumnRole`: what a raw field means (unit id, cycle, feature, discard)
//! - `ColumnDef`: name + role for one positional field
//! - `RecordSchema`: the full raw-line layout plus derived accessors

use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};

/// The role a raw positional field plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Positive integer identifying a single unit across its lifetime.
    UnitId,

    /// Positive integer operational time-step, per unit.
    Cycle,

    /// Real-valued operating-condition setting or sensor measurement.
    /// Feature columns are the ones the scaler normalizes.
    Feature,

    /// Field present in the raw format but carrying no data. Dropped
    /// unconditionally; never parsed as a number.
    Discard,
}

/// Definition of a single raw column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name (e.g. "id", "cycle", "setting1", "s7").
    pub name: String,

    /// Role of this column.
    pub role: ColumnRole,
}

impl ColumnDef {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Ordered description of the raw log layout.
///
/// The schema drives both parsing (field count, per-field roles) and output
/// (header naming and column order). It is serializable so alternative
/// layouts can live in configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSchema {
    columns: Vec<ColumnDef>,
}

impl RecordSchema {
    /// Build a schema from an ordered column list.
    ///
    /// Requires exactly one `UnitId` column, exactly one `Cycle` column, at
    /// least one `Feature` column, and unique column names.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self> {
        let unit_ids = columns
            .iter()
            .filter(|c| c.role == ColumnRole::UnitId)
            .count();
        if unit_ids != 1 {
            return Err(PrepError::config(format!(
                "schema must have exactly one UnitId column, found {unit_ids}"
            )));
        }

        let cycles = columns
            .iter()
            .filter(|c| c.role == ColumnRole::Cycle)
            .count();
        if cycles != 1 {
            return Err(PrepError::config(format!(
                "schema must have exactly one Cycle column, found {cycles}"
            )));
        }

        if !columns.iter().any(|c| c.role == ColumnRole::Feature) {
            return Err(PrepError::config(
                "schema must have at least one Feature column",
            ));
        }

        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(PrepError::config(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Default turbofan log layout.
    ///
    /// 28 positional fields per line: unit id, cycle, three operational
    /// settings, 21 sensor readings, and two trailing blank fields produced
    /// by the raw format's trailing separators.
    pub fn turbofan() -> Self {
        let mut columns = Vec::with_capacity(28);
        columns.push(ColumnDef::new("id", ColumnRole::UnitId));
        columns.push(ColumnDef::new("cycle", ColumnRole::Cycle));
        for i in 1..=super::DEFAULT_SETTINGS {
            columns.push(ColumnDef::new(format!("setting{i}"), ColumnRole::Feature));
        }
        for i in 1..=super::DEFAULT_SENSORS {
            columns.push(ColumnDef::new(format!("s{i}"), ColumnRole::Feature));
        }
        columns.push(ColumnDef::new("blank1", ColumnRole::Discard));
        columns.push(ColumnDef::new("blank2", ColumnRole::Discard));

        // Statically well-formed layout
        Self { columns }
    }

    /// Total number of raw fields per line, discards included.
    pub fn raw_field_count(&self) -> usize {
        self.columns.len()
    }

    /// All column definitions in raw order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Names of the feature columns, in raw order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.role == ColumnRole::Feature)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Number of feature columns.
    pub fn feature_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.role == ColumnRole::Feature)
            .count()
    }

    /// Name of the unit-identifier column.
    pub fn unit_id_name(&self) -> &str {
        // Constructors guarantee the column exists
        self.columns
            .iter()
            .find(|c| c.role == ColumnRole::UnitId)
            .map(|c| c.name.as_str())
            .unwrap_or("id")
    }

    /// Name of the cycle column.
    pub fn cycle_name(&self) -> &str {
        self.columns
            .iter()
            .find(|c| c.role == ColumnRole::Cycle)
            .map(|c| c.name.as_str())
            .unwrap_or("cycle")
    }

    /// Output column order for persisted datasets:
    /// unit id, cycle, features (scaled in place), `cycle_norm`, `RUL`,
    /// `label1`, `label2`.
    pub fn output_header(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.feature_count() + 6);
        header.push(self.unit_id_name().to_string());
        header.push(self.cycle_name().to_string());
        for name in self.feature_names() {
            header.push(name.to_string());
        }
        header.push("cycle_norm".to_string());
        header.push("RUL".to_string());
        header.push("label1".to_string());
        header.push("label2".to_string());
        header
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::turbofan()
    }
}
