//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - view exports to CSV (`export`)
//! - view JSON output (`json`)

pub mod export;
pub mod ingest;
pub mod json;

pub use export::*;
pub use ingest::*;
pub use json::*;
