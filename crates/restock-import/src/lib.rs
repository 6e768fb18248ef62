//! CSV + photo-folder bulk import into the inventory backend.
//!
//! The pipeline is strictly sequential: one row at a time, one photo at a
//! time, one request in flight. Idempotency comes from the store itself
//! (upsert by business key, existence checks before photo inserts and
//! uploads); nothing is kept locally between runs.

pub mod error;
pub mod importer;
pub mod photos;
pub mod report;
pub mod row;

pub use error::{ImportError, RowError};
pub use importer::{ImportOptions, Importer};
pub use report::{ImportReport, RowOutcome, RowStatus};
pub use row::{normalize_row, parse_money, read_rows, ItemRow, RawRow, SourceRow};
