//! `mbti-atlas` library crate.
//!
//! The binary (`mbti`) is a thin wrapper around this library so that:
//!
//! - the analysis is testable without spawning processes or a terminal
//! - the CLI and the dashboard share one pipeline

pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod landmarks;
pub mod logging;
pub mod palette;
pub mod plot;
pub mod report;
pub mod snapshot;
pub mod tui;
