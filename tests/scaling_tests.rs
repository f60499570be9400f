//! Scaling behavior through the public API, with a focus on the
//! fit-once / apply-twice contract.

use rul_dataprep::dataset::{Dataset, Record};
use rul_dataprep::preprocessing::{DegeneratePolicy, MinMaxScaler};
use rul_dataprep::schema::{ColumnDef, ColumnRole, RecordSchema};
use rul_dataprep::PrepError;

fn schema() -> RecordSchema {
    RecordSchema::new(vec![
        ColumnDef::new("id", ColumnRole::UnitId),
        ColumnDef::new("cycle", ColumnRole::Cycle),
        ColumnDef::new("s1", ColumnRole::Feature),
        ColumnDef::new("s2", ColumnRole::Feature),
    ])
    .unwrap()
}

fn dataset(rows: &[(u32, u32, f64, f64)]) -> Dataset {
    let mut ds = Dataset::new(schema());
    for &(unit_id, cycle, s1, s2) in rows {
        ds.records.push(Record {
            unit_id,
            cycle,
            features: vec![s1, s2],
        });
    }
    ds
}

#[test]
fn test_fit_set_lands_in_unit_interval_with_extremes_attained() {
    let mut train = dataset(&[
        (1, 1, 640.0, 0.02),
        (1, 2, 642.5, 0.05),
        (1, 3, 645.0, 0.03),
    ]);
    MinMaxScaler::default().fit_transform(&mut train).unwrap();

    for col in 0..2 {
        let values: Vec<f64> = train.records.iter().map(|r| r.features[col]).collect();
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(values.iter().any(|&v| v == 0.0));
        assert!(values.iter().any(|&v| v == 1.0));
    }
}

#[test]
fn test_eval_reuses_fit_ranges_without_refit_or_clamp() {
    let mut train = dataset(&[(1, 1, 0.0, 10.0), (1, 2, 100.0, 20.0)]);
    let fitted = MinMaxScaler::default().fit_transform(&mut train).unwrap();

    // Below the min and above the max of the fit set
    let mut eval = dataset(&[(2, 1, -50.0, 25.0)]);
    fitted.transform(&mut eval).unwrap();
    assert_eq!(eval.records[0].features[0], -0.5);
    assert_eq!(eval.records[0].features[1], 1.5);
}

#[test]
fn test_cycle_norm_filled_from_raw_cycle() {
    let mut train = dataset(&[(1, 1, 0.0, 0.0), (1, 2, 1.0, 1.0), (1, 5, 2.0, 2.0)]);
    MinMaxScaler::default().fit_transform(&mut train).unwrap();

    // Raw cycle survives untouched next to its normalized copy
    assert_eq!(train.records[2].cycle, 5);
    assert_eq!(train.cycle_norm, vec![0.0, 0.25, 1.0]);
}

#[test]
fn test_degenerate_column_zero_policy() {
    let mut train = dataset(&[(1, 1, 7.0, 1.0), (1, 2, 7.0, 2.0)]);
    let fitted = MinMaxScaler::new(DegeneratePolicy::Zero)
        .fit_transform(&mut train)
        .unwrap();

    assert!(fitted.range("s1").unwrap().is_degenerate());
    assert!(train.records.iter().all(|r| r.features[0] == 0.0));

    // Degenerate mapping applies on transform too
    let mut eval = dataset(&[(2, 1, 99.0, 1.5)]);
    fitted.transform(&mut eval).unwrap();
    assert_eq!(eval.records[0].features[0], 0.0);
}

#[test]
fn test_degenerate_column_fail_policy() {
    let train = dataset(&[(1, 1, 7.0, 1.0), (1, 2, 7.0, 2.0)]);
    let err = MinMaxScaler::new(DegeneratePolicy::Fail)
        .fit(&train)
        .unwrap_err();
    assert!(matches!(err, PrepError::DegenerateColumn { column } if column == "s1"));
}

#[test]
fn test_fitted_scaler_is_immutable_across_applications() {
    let mut train = dataset(&[(1, 1, 0.0, 0.0), (1, 2, 10.0, 10.0)]);
    let fitted = MinMaxScaler::default().fit_transform(&mut train).unwrap();
    let ranges_before: Vec<_> = fitted.ranges().to_vec();

    let mut eval = dataset(&[(2, 1, 500.0, -500.0)]);
    fitted.transform(&mut eval).unwrap();
    assert_eq!(fitted.ranges(), &ranges_before[..]);
}

#[test]
fn test_transform_requires_matching_schema() {
    let mut train = dataset(&[(1, 1, 0.0, 0.0), (1, 2, 1.0, 1.0)]);
    let fitted = MinMaxScaler::default().fit_transform(&mut train).unwrap();

    let other_schema = RecordSchema::new(vec![
        ColumnDef::new("id", ColumnRole::UnitId),
        ColumnDef::new("cycle", ColumnRole::Cycle),
        ColumnDef::new("temperature", ColumnRole::Feature),
        ColumnDef::new("pressure", ColumnRole::Feature),
    ])
    .unwrap();
    let mut other = Dataset::new(other_schema);
    other.records.push(Record {
        unit_id: 1,
        cycle: 1,
        features: vec![0.5, 0.5],
    });
    assert!(fitted.transform(&mut other).is_err());
}
