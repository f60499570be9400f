//! Remaining-useful-life derivation.
//!
//! Two operating modes, both filling `dataset.rul` in record order and
//! neither mutating `cycle`:
//!
//! - **Terminal mode** ([`label_terminal`]): the last recorded cycle of each
//!   unit is its failure cycle, so `RUL = unit_max_cycle - cycle`. RUL
//!   reaches exactly 0 at every unit's final cycle.
//! - **Censored mode** ([`label_censored`]): units are observed only up to a
//!   censoring cycle; a ground-truth offset supplies the cycles survived
//!   beyond it, so `RUL = (unit_max_cycle + offset) - cycle`.
//!
//! Per-unit maxima are collected into a hash map first, then applied in a
//! second pass over the records, so output order is input order regardless
//! of grouping; determinism does not depend on map iteration.

use crate::dataset::Dataset;
use crate::error::{PrepError, Result};
use crate::reader::OffsetTable;
use ahash::AHashMap;

/// Derive RUL in terminal mode: the unit's maximum observed cycle is its
/// end-of-life.
///
/// A unit with a single record gets `RUL = 0` for that record.
pub fn label_terminal(dataset: &mut Dataset) {
    let max_cycles = unit_max_cycles(dataset);

    dataset.rul.clear();
    dataset.rul.reserve(dataset.len());
    for record in &dataset.records {
        // Map is total over observed units
        let max = max_cycles[&record.unit_id];
        dataset.rul.push(max - record.cycle);
    }

    log::debug!(
        "terminal RUL derived for {} records across {} units",
        dataset.len(),
        max_cycles.len()
    );
}

/// Derive RUL in censored mode: end-of-life is the unit's maximum observed
/// cycle plus its ground-truth offset.
///
/// Fails with [`PrepError::MissingOffset`](crate::PrepError::MissingOffset)
/// if any unit in the dataset lacks an offset entry, and with a
/// configuration error if `max + offset - cycle` does not fit the u32
/// cycle domain. The dataset is left unmodified on either failure. A unit
/// with a single record gets `RUL = offset` for that record.
pub fn label_censored(dataset: &mut Dataset, offsets: &OffsetTable) -> Result<()> {
    offsets.validate_covers(dataset)?;
    let max_cycles = unit_max_cycles(dataset);

    // End-of-life is computed in u64: max cycle and offset are both u32,
    // so their sum must not wrap before the subtraction.
    let mut rul = Vec::with_capacity(dataset.len());
    for record in &dataset.records {
        let max = max_cycles[&record.unit_id];
        // Coverage validated above
        let offset = offsets.get(record.unit_id).unwrap_or(0);
        let value = max as u64 + offset as u64 - record.cycle as u64;
        let value = u32::try_from(value).map_err(|_| {
            PrepError::config(format!(
                "unit {}: derived RUL {value} exceeds the supported cycle range",
                record.unit_id
            ))
        })?;
        rul.push(value);
    }
    dataset.rul = rul;

    log::debug!(
        "censored RUL derived for {} records across {} units",
        dataset.len(),
        max_cycles.len()
    );
    Ok(())
}

fn unit_max_cycles(dataset: &Dataset) -> AHashMap<u32, u32> {
    let mut max_cycles: AHashMap<u32, u32> = AHashMap::new();
    for record in &dataset.records {
        let entry = max_cycles.entry(record.unit_id).or_insert(0);
        if record.cycle > *entry {
            *entry = record.cycle;
        }
    }
    max_cycles
}
