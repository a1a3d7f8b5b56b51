//! Dataset handle and the built-in fallback table.
//!
//! Reading the CSV lives in `io::ingest`; this module owns what a loaded
//! dataset looks like once it exists.

pub mod dataset;
pub mod fallback;

pub use dataset::{Dataset, DatasetSource, LoadOutcome, RowIssue};
pub use fallback::{FALLBACK_COUNTRIES, fallback_dataset};
