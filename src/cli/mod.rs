//! Command-line parsing for the `mbti` dashboard.
//!
//! Argument parsing stays here; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use crate::logging::LogFormat;

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "mbti",
    version,
    about = "Country MBTI distributions and axis preferences in the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Dataset CSV (falls back to $MBTI_DATA_PATH, then ./countriesMBTI_16types.csv).
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Default country for the axis page (falls back to $MBTI_PREFERRED_COUNTRY).
    #[arg(long = "preferred-country", value_name = "NAME", global = true)]
    pub preferred_country: Option<String>,

    /// Adjust log verbosity (-v info, -vv debug, -q errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the ranked 16-type distribution for one country.
    Distribution(DistributionArgs),
    /// Print the four axis splits and their summary for one country.
    Axes(AxesArgs),
    /// List the countries in the dataset.
    Countries(CountriesArgs),
    /// List the fixed Seoul landmarks.
    Landmarks,
    /// Write a Markdown snapshot of both pages for one country.
    Snapshot(SnapshotArgs),
    /// Launch the interactive dashboard.
    Tui(TuiArgs),
}

/// How to choose the country for single-country commands.
#[derive(Debug, Args, Clone, Default)]
pub struct CountryArgs {
    /// Country name (exact match, as listed by `mbti countries`).
    #[arg(short = 'c', long = "country", conflicts_with = "pick")]
    pub country: Option<String>,

    /// Choose the country from a numbered list on stdin.
    #[arg(long)]
    pub pick: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub select: CountryArgs,

    /// Skip the ASCII bar plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width in columns (the plot is truncated to this width).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height in rows.
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Print the view as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Also write the ranked distribution to this CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Also write the view as JSON to this file.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AxesArgs {
    #[command(flatten)]
    pub select: CountryArgs,

    /// Print the view as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Also write the axis table to this CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Also write the view (with summary) as JSON to this file.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CountriesArgs {
    /// Print every row's raw proportions.
    #[arg(long)]
    pub show_data: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SnapshotArgs {
    #[arg(short = 'c', long = "country")]
    pub country: Option<String>,

    /// Output directory.
    #[arg(long, value_name = "DIR", default_value = crate::snapshot::DEFAULT_SNAPSHOT_DIR)]
    pub out_dir: PathBuf,
}

#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    /// Country selected at startup.
    #[arg(short = 'c', long = "country")]
    pub country: Option<String>,
}
