//! Domain types used throughout the dashboards.
//!
//! This module defines:
//!
//! - the closed MBTI code/axis/pole enums and their static membership table
//! - per-country rows (`CountryProportions`) and derived results (`AxisResult`, `RankedEntry`)
//! - resolved runtime settings (`DashboardConfig`)

pub mod types;

pub use types::*;
