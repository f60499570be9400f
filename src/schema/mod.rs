//! Record Schema Module
//!
//! Provides an explicit, typed description of the raw log layout so that a
//! format change is a data change, not a code change. The reader consumes a
//! [`RecordSchema`] instead of hard-coded column positions: which field is
//! the unit identifier, which is the cycle counter, which are features, and
//! which trailing fields are discarded is all declared here.
//!
//! # Example
//!
//! ```
//! use rul_dataprep::schema::RecordSchema;
//!
//! // Default turbofan log layout: 26 semantic fields + 2 trailing blanks
//! let schema = RecordSchema::turbofan();
//! assert_eq!(schema.raw_field_count(), 28);
//! assert_eq!(schema.feature_count(), 24); // 3 settings + 21 sensors
//! assert_eq!(schema.feature_names()[0], "setting1");
//! ```

mod columns;

pub use columns::{ColumnDef, ColumnRole, RecordSchema};

/// Current schema version, written into export metadata.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of operating-condition settings in the default turbofan layout.
pub const DEFAULT_SETTINGS: usize = 3;

/// Number of sensor measurements in the default turbofan layout.
pub const DEFAULT_SENSORS: usize = 21;
