//! Feature normalization with strict fit/apply separation.
//!
//! Min-max scaling statistics are computed once, on the run-to-failure set,
//! and reused unmodified on the evaluation set. The fit step returns an
//! explicit [`FittedScaler`] value that the caller passes to the transform
//! step: there is no ambient or global scaler state, so the fit-then-transform
//! dependency is visible in the type system and the evaluation set can
//! never be normalized against statistics it leaked into.
//!
//! # Scaled columns
//!
//! Every schema feature column plus `cycle_norm` (a copy of the raw cycle
//! taken before scaling, so both raw and normalized cycle survive into the
//! output). `unit_id`, raw `cycle`, `RUL`, and the label columns are never
//! touched.
//!
//! # Degenerate columns
//!
//! A column that is constant across the fit set has zero range, and
//! `(v - min) / (max - min)` is undefined. The policy is explicit:
//! [`DegeneratePolicy::Zero`] (default) maps every value of such a column
//! to 0.0 deterministically; [`DegeneratePolicy::Fail`] aborts the fit.
//!
//! # Example
//!
//! ```ignore
//! use rul_dataprep::preprocessing::MinMaxScaler;
//!
//! let scaler = MinMaxScaler::default();
//! let fitted = scaler.fit_transform(&mut train)?;
//! fitted.transform(&mut evaluation)?; // same min/max basis, no refit
//! ```

mod scaling;

pub use scaling::{ColumnRange, DegeneratePolicy, FittedScaler, MinMaxScaler};
