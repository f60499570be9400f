//! Raw log ingestion.
//!
//! Parses the three whitespace-delimited inputs into in-memory structures:
//!
//! - run-to-failure log → [`Dataset`], stable-sorted by `(unit_id, cycle)`
//! - evaluation log → [`Dataset`], left in file order
//! - ground-truth offsets → [`OffsetTable`], keyed explicitly by unit id
//!
//! # Line format
//!
//! Log lines carry exactly [`RecordSchema::raw_field_count`] single-space
//! separated fields with no header row. The raw format terminates each line
//! with trailing separators, which is why the default schema declares two
//! trailing `Discard` columns; discard fields are dropped without being
//! parsed. Blank lines (e.g. a final newline) are skipped; any content line
//! that does not match the schema aborts the run with the 1-based line
//! number in the error.
//!
//! # Offset keying
//!
//! The offset file has no unit-id column: row order defines 1-based unit
//! ids. That positional convention is confined to [`read_offset_table`]:
//! the table it builds is an explicit `unit_id -> offset` map, and every
//! later lookup goes through the key, validated for completeness before use
//! by the labeling stage.

use crate::dataset::{Dataset, Record};
use crate::error::{PrepError, Result};
use crate::schema::{ColumnRole, RecordSchema};
use ahash::AHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Schema-driven reader for raw sensor logs.
#[derive(Debug, Clone)]
pub struct LogReader {
    schema: RecordSchema,
}

impl LogReader {
    /// Create a reader for the given layout.
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }

    /// The schema this reader parses against.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Read a run-to-failure log: parse all records, then stable-sort by
    /// `(unit_id, cycle)` ascending.
    pub fn read_run_to_failure<R: BufRead>(&self, source: R) -> Result<Dataset> {
        let mut dataset = self.read_records(source)?;
        dataset.sort_by_unit_and_cycle();
        log::info!(
            "read {} run-to-failure records for {} units",
            dataset.len(),
            dataset.unit_count()
        );
        Ok(dataset)
    }

    /// Read an evaluation log, preserving file order.
    pub fn read_evaluation<R: BufRead>(&self, source: R) -> Result<Dataset> {
        let dataset = self.read_records(source)?;
        log::info!(
            "read {} evaluation records for {} units",
            dataset.len(),
            dataset.unit_count()
        );
        Ok(dataset)
    }

    /// Read a run-to-failure log from a file path.
    pub fn read_run_to_failure_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let file = File::open(path.as_ref())?;
        self.read_run_to_failure(BufReader::new(file))
    }

    /// Read an evaluation log from a file path.
    pub fn read_evaluation_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let file = File::open(path.as_ref())?;
        self.read_evaluation(BufReader::new(file))
    }

    fn read_records<R: BufRead>(&self, source: R) -> Result<Dataset> {
        let expected = self.schema.raw_field_count();
        let mut dataset = Dataset::new(self.schema.clone());

        for (idx, line) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(' ').collect();
            if fields.len() != expected {
                return Err(PrepError::malformed(
                    line_no,
                    format!("expected {expected} fields, got {}", fields.len()),
                ));
            }

            dataset
                .records
                .push(self.parse_record(&fields, line_no)?);
        }

        Ok(dataset)
    }

    fn parse_record(&self, fields: &[&str], line_no: usize) -> Result<Record> {
        let mut unit_id = 0u32;
        let mut cycle = 0u32;
        let mut features = Vec::with_capacity(self.schema.feature_count());

        for (col, &raw) in self.schema.columns().iter().zip(fields) {
            match col.role {
                ColumnRole::UnitId => {
                    unit_id = parse_positive_u32(raw, &col.name, line_no)?;
                }
                ColumnRole::Cycle => {
                    cycle = parse_positive_u32(raw, &col.name, line_no)?;
                }
                ColumnRole::Feature => {
                    let value: f64 = raw.parse().map_err(|_| {
                        PrepError::malformed(
                            line_no,
                            format!("column '{}': '{raw}' is not a number", col.name),
                        )
                    })?;
                    features.push(value);
                }
                ColumnRole::Discard => {}
            }
        }

        Ok(Record {
            unit_id,
            cycle,
            features,
        })
    }
}

fn parse_positive_u32(raw: &str, column: &str, line_no: usize) -> Result<u32> {
    let value: u32 = raw.parse().map_err(|_| {
        PrepError::malformed(
            line_no,
            format!("column '{column}': '{raw}' is not a positive integer"),
        )
    })?;
    if value == 0 {
        return Err(PrepError::malformed(
            line_no,
            format!("column '{column}' must be >= 1"),
        ));
    }
    Ok(value)
}

/// Ground-truth offsets for censored units, keyed by unit id.
///
/// The offset is the number of cycles a unit survived beyond its last
/// observed cycle in the evaluation log.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    offsets: AHashMap<u32, u32>,
}

impl OffsetTable {
    /// Build a table from explicit `(unit_id, offset)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            offsets: pairs.into_iter().collect(),
        }
    }

    /// Offset for a unit, if present.
    pub fn get(&self, unit_id: u32) -> Option<u32> {
        self.offsets.get(&unit_id).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Verify every unit in the dataset has an offset entry.
    pub fn validate_covers(&self, dataset: &Dataset) -> Result<()> {
        for record in &dataset.records {
            if !self.offsets.contains_key(&record.unit_id) {
                return Err(PrepError::MissingOffset {
                    unit_id: record.unit_id,
                });
            }
        }
        Ok(())
    }
}

/// Read a ground-truth offset file.
///
/// Each line carries two single-space separated fields: the offset value and
/// one discard field (the raw format's trailing separator). Row order
/// assigns unit ids 1, 2, 3, and so on: the only place positional identity
/// exists. Offsets outside `0..=u32::MAX` are rejected as malformed, since
/// an offset is a survival count in cycles and must narrow losslessly into
/// the cycle domain.
pub fn read_offset_table<R: BufRead>(source: R) -> Result<OffsetTable> {
    let mut offsets = AHashMap::new();
    let mut next_unit_id = 1u32;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() != 2 {
            return Err(PrepError::malformed(
                line_no,
                format!("expected 2 fields, got {}", fields.len()),
            ));
        }

        let value: i64 = fields[0].parse().map_err(|_| {
            PrepError::malformed(line_no, format!("'{}' is not an integer offset", fields[0]))
        })?;
        if value < 0 {
            return Err(PrepError::malformed(
                line_no,
                format!("offset {value} is negative"),
            ));
        }
        let value = u32::try_from(value).map_err(|_| {
            PrepError::malformed(
                line_no,
                format!("offset {value} exceeds the supported maximum of {}", u32::MAX),
            )
        })?;

        offsets.insert(next_unit_id, value);
        next_unit_id += 1;
    }

    log::info!("read {} ground-truth offsets", offsets.len());
    Ok(OffsetTable { offsets })
}

/// Read a ground-truth offset file from a path.
pub fn read_offset_table_path<P: AsRef<Path>>(path: P) -> Result<OffsetTable> {
    let file = File::open(path.as_ref())?;
    read_offset_table(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// A log line in the default turbofan layout: 26 values, two trailing
    /// separators for the discard columns.
    fn log_line(unit: u32, cycle: u32, fill: f64) -> String {
        let mut fields = vec![unit.to_string(), cycle.to_string()];
        for _ in 0..24 {
            fields.push(format!("{fill}"));
        }
        format!("{}  \n", fields.join(" "))
    }

    fn reader() -> LogReader {
        LogReader::new(RecordSchema::turbofan())
    }

    #[test]
    fn test_read_single_record() {
        let input = log_line(1, 1, 0.5);
        let ds = reader().read_evaluation(Cursor::new(input)).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].unit_id, 1);
        assert_eq!(ds.records[0].cycle, 1);
        assert_eq!(ds.records[0].features.len(), 24);
        assert!((ds.records[0].features[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_run_to_failure_is_sorted() {
        let mut input = String::new();
        input.push_str(&log_line(2, 1, 0.0));
        input.push_str(&log_line(1, 2, 0.0));
        input.push_str(&log_line(1, 1, 0.0));
        let ds = reader().read_run_to_failure(Cursor::new(input)).unwrap();
        let order: Vec<(u32, u32)> = ds.records.iter().map(|r| (r.unit_id, r.cycle)).collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_evaluation_preserves_order() {
        let mut input = String::new();
        input.push_str(&log_line(2, 1, 0.0));
        input.push_str(&log_line(1, 1, 0.0));
        let ds = reader().read_evaluation(Cursor::new(input)).unwrap();
        assert_eq!(ds.records[0].unit_id, 2);
        assert_eq!(ds.records[1].unit_id, 1);
    }

    #[test]
    fn test_wrong_field_count_names_line() {
        let input = format!("{}1 2 3\n", log_line(1, 1, 0.0));
        let err = reader().read_evaluation(Cursor::new(input)).unwrap_err();
        match err {
            PrepError::MalformedInput { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("28"));
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_feature_fails() {
        let input = log_line(1, 1, 0.0).replace("0 ", "abc ");
        let err = reader().read_evaluation(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, PrepError::MalformedInput { .. }));
    }

    #[test]
    fn test_zero_unit_id_rejected() {
        let input = log_line(1, 1, 0.0).replacen('1', "0", 1);
        let err = reader().read_evaluation(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, PrepError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let input = format!("{}\n   \n", log_line(1, 1, 0.0));
        let ds = reader().read_evaluation(Cursor::new(input)).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_offset_table_row_order_assigns_unit_ids() {
        let input = "112 \n98 \n69 \n";
        let table = read_offset_table(Cursor::new(input)).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some(112));
        assert_eq!(table.get(2), Some(98));
        assert_eq!(table.get(3), Some(69));
        assert_eq!(table.get(4), None);
    }

    #[test]
    fn test_negative_offset_rejected() {
        let input = "112 \n-5 \n";
        let err = read_offset_table(Cursor::new(input)).unwrap_err();
        match err {
            PrepError::MalformedInput { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("negative"));
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_offset_rejected_not_wrapped() {
        // u32::MAX + 1 must fail loudly, never narrow to 0
        let input = "4294967296 \n";
        let err = read_offset_table(Cursor::new(input)).unwrap_err();
        match err {
            PrepError::MalformedInput { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("4294967296"));
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }

        // The maximum representable offset is still accepted
        let input = format!("{} \n", u32::MAX);
        let table = read_offset_table(Cursor::new(input)).unwrap();
        assert_eq!(table.get(1), Some(u32::MAX));
    }

    #[test]
    fn test_offset_table_coverage_check() {
        let table = OffsetTable::from_pairs([(1, 10)]);
        let mut ds = Dataset::new(RecordSchema::turbofan());
        ds.records.push(Record {
            unit_id: 2,
            cycle: 1,
            features: vec![0.0; 24],
        });
        let err = table.validate_covers(&ds).unwrap_err();
        assert!(matches!(err, PrepError::MissingOffset { unit_id: 2 }));
    }
}
