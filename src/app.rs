//! Top-level application orchestration.
//!
//! `src/main.rs` only maps the result to an exit code; this module:
//! - parses CLI arguments and sets up logging
//! - resolves configuration (flags, environment, `.env`)
//! - loads the dataset once
//! - prints reports/plots or launches the dashboard
//! - writes optional exports

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::cli::{AxesArgs, Cli, Command, CountriesArgs, CountryArgs, DistributionArgs, SnapshotArgs, TuiArgs};
use crate::domain::{DEFAULT_DATA_FILE, DEFAULT_PREFERRED_COUNTRY, DashboardConfig};
use crate::error::AppError;
use crate::logging::{LogConfig, init_logging};

pub mod pipeline;

use pipeline::{Page, Session};

/// Environment variable naming the dataset CSV.
pub const DATA_PATH_ENV: &str = "MBTI_DATA_PATH";
/// Environment variable naming the preferred axis-page country.
pub const PREFERRED_COUNTRY_ENV: &str = "MBTI_PREFERRED_COUNTRY";
/// Standard `tracing` filter variable.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Entry point for the `mbti` binary.
pub fn run() -> Result<(), AppError> {
    // `mbti` and `mbti -c Japan` behave like `mbti tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    // Loaded before logging so `RUST_LOG` in `.env` is honored.
    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();
    let env = |key: &str| std::env::var(key).ok();

    let is_tui = matches!(cli.command, Command::Tui(_));
    let mut log_config = log_config_from_cli(&cli, env);
    if is_tui {
        log_config = log_config.for_tui();
    }
    init_logging(&log_config)
        .map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))?;

    let config = config_from_args(&cli, env);

    match cli.command {
        Command::Distribution(args) => handle_distribution(config, args),
        Command::Axes(args) => handle_axes(config, args),
        Command::Countries(args) => handle_countries(config, args),
        Command::Landmarks => {
            print!("{}", crate::report::format_landmarks());
            Ok(())
        }
        Command::Snapshot(args) => handle_snapshot(config, args),
        Command::Tui(args) => handle_tui(config, args),
    }
}

/// Resolve runtime settings: CLI flag, then environment, then built-in default.
pub fn config_from_args(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> DashboardConfig {
    let non_empty = |v: String| {
        let v = v.trim().to_string();
        (!v.is_empty()).then_some(v)
    };

    let data_path = cli
        .data
        .clone()
        .or_else(|| env(DATA_PATH_ENV).and_then(non_empty).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let preferred_country = cli
        .preferred_country
        .clone()
        .or_else(|| env(PREFERRED_COUNTRY_ENV).and_then(non_empty))
        .unwrap_or_else(|| DEFAULT_PREFERRED_COUNTRY.to_string());

    DashboardConfig {
        data_path,
        preferred_country,
    }
}

/// Explicit `-v`/`-q` flags win over `RUST_LOG`.
fn log_config_from_cli(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> LogConfig {
    let env_directives = if cli.verbosity.is_present() {
        None
    } else {
        env(LOG_FILTER_ENV).filter(|v| !v.trim().is_empty())
    };
    LogConfig {
        level: cli.verbosity.tracing_level_filter(),
        env_directives,
        format: cli.log_format,
        with_ansi: std::io::stderr().is_terminal(),
        log_file: cli.log_file.clone(),
    }
}

/// Load the dataset and surface the fallback notice on stderr.
fn open_session(config: DashboardConfig) -> Session {
    let session = Session::open(config);
    if let Some(warning) = crate::report::format_load_warning(&session.outcome) {
        eprintln!("{warning}");
    }
    session
}

fn select_country(session: &Session, select: &CountryArgs, page: Page) -> Result<String, AppError> {
    if select.pick {
        return crate::cli::picker::prompt_for_country(session.dataset());
    }
    session.resolve_country(select.country.as_deref(), page)
}

fn handle_distribution(config: DashboardConfig, args: DistributionArgs) -> Result<(), AppError> {
    let session = open_session(config);
    let country = select_country(&session, &args.select, Page::Distribution)?;
    let view = session.distribution(&country)?;

    if args.json {
        println!("{}", crate::io::to_json_string(&view)?);
    } else {
        println!("{}", crate::report::format_source_line(session.dataset()));
        println!("{}", crate::report::format_distribution(&view));
        if !args.no_plot {
            let plot = crate::plot::render_bar_plot(&view, args.height);
            println!("{}", crate::plot::clip_width(&plot, args.width));
        }
    }

    if let Some(path) = &args.export {
        crate::io::write_distribution_csv(path, &view)?;
        info!(path = %path.display(), "wrote distribution export");
    }
    if let Some(path) = &args.export_json {
        crate::io::write_json(path, &view)?;
        info!(path = %path.display(), "wrote distribution JSON");
    }
    Ok(())
}

fn handle_axes(config: DashboardConfig, args: AxesArgs) -> Result<(), AppError> {
    let session = open_session(config);
    let country = select_country(&session, &args.select, Page::Axes)?;
    let view = session.axes(&country)?;

    if args.json {
        println!("{}", crate::io::to_json_string(&view)?);
    } else {
        println!("{}", crate::report::format_source_line(session.dataset()));
        println!("{}", crate::report::format_axes(&view));
    }

    if let Some(path) = &args.export {
        crate::io::write_axes_csv(path, &view)?;
        info!(path = %path.display(), "wrote axes export");
    }
    if let Some(path) = &args.export_json {
        crate::io::write_json(path, &view)?;
        info!(path = %path.display(), "wrote axes JSON");
    }
    Ok(())
}

fn handle_countries(config: DashboardConfig, args: CountriesArgs) -> Result<(), AppError> {
    let session = open_session(config);
    println!("{}", crate::report::format_source_line(session.dataset()));
    if args.show_data {
        print!("{}", crate::report::format_dataset_table(session.dataset()));
    } else {
        print!(
            "{}",
            crate::report::format_countries(session.dataset(), &session.config.preferred_country)
        );
    }
    Ok(())
}

fn handle_snapshot(config: DashboardConfig, args: SnapshotArgs) -> Result<(), AppError> {
    let session = open_session(config);
    let country = session.resolve_country(args.country.as_deref(), Page::Axes)?;
    let path = crate::snapshot::write_snapshot(
        session.dataset(),
        &country,
        &session.palette,
        &args.out_dir,
    )?;
    println!("Snapshot written: {}", path.display());
    Ok(())
}

fn handle_tui(config: DashboardConfig, args: TuiArgs) -> Result<(), AppError> {
    // The warning is shown in the dashboard's status line instead of stderr.
    let session = Session::open(config);
    crate::tui::run(session, args)
}

/// Rewrite argv so `mbti` defaults to `mbti tui`.
///
/// Rules:
/// - `mbti`                       -> `mbti tui`
/// - `mbti -c Japan ...`          -> `mbti tui -c Japan ...`
/// - `mbti --help/--version/-h`   -> unchanged (show top-level help/version)
/// - `mbti --data x.csv countries` -> unchanged (global flags before a subcommand)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // Global flags may come before the subcommand, so look past argv[1].
    if argv[1..].iter().any(|arg| is_subcommand(arg)) {
        return argv;
    }

    // A leading flag is treated as a dashboard flag.
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

fn is_subcommand(arg: &str) -> bool {
    matches!(
        arg,
        "distribution" | "axes" | "countries" | "landmarks" | "snapshot" | "tui"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_dashboard() {
        assert_eq!(rewrite_args(args(&["mbti"])), args(&["mbti", "tui"]));
        assert_eq!(
            rewrite_args(args(&["mbti", "-c", "Japan"])),
            args(&["mbti", "tui", "-c", "Japan"])
        );
        assert_eq!(rewrite_args(args(&["mbti", "--help"])), args(&["mbti", "--help"]));
        assert_eq!(rewrite_args(args(&["mbti", "axes"])), args(&["mbti", "axes"]));
    }

    #[test]
    fn global_flags_before_subcommand_are_not_rewritten() {
        for argv in [
            args(&["mbti", "--data", "x.csv", "countries"]),
            args(&["mbti", "-v", "axes", "-c", "Japan"]),
            args(&["mbti", "--log-format", "json", "distribution"]),
        ] {
            let rewritten = rewrite_args(argv.clone());
            assert_eq!(rewritten, argv);
            assert!(Cli::try_parse_from(&rewritten).is_ok(), "{rewritten:?}");
        }

        let cli = Cli::parse_from(rewrite_args(args(&["mbti", "--data", "x.csv", "countries"])));
        assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
        assert!(matches!(cli.command, Command::Countries(_)));

        // Flags without a subcommand still open the dashboard.
        assert_eq!(
            rewrite_args(args(&["mbti", "--data", "x.csv"])),
            args(&["mbti", "tui", "--data", "x.csv"])
        );
    }

    #[test]
    fn log_filter_env_applies_unless_verbosity_flag_given() {
        let env = |k: &str| (k == LOG_FILTER_ENV).then(|| "mbti_atlas=debug".to_string());

        let cli = Cli::parse_from(["mbti", "countries"]);
        let config = log_config_from_cli(&cli, env);
        assert_eq!(config.env_directives.as_deref(), Some("mbti_atlas=debug"));

        let cli = Cli::parse_from(["mbti", "-q", "countries"]);
        assert!(log_config_from_cli(&cli, env).env_directives.is_none());

        let cli = Cli::parse_from(["mbti", "countries"]);
        assert!(log_config_from_cli(&cli, |_| Some(" ".to_string())).env_directives.is_none());
    }

    #[test]
    fn config_prefers_flags_then_env_then_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            (DATA_PATH_ENV, "env.csv"),
            (PREFERRED_COUNTRY_ENV, "Japan"),
        ]);
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let cli = Cli::parse_from(["mbti", "countries"]);
        let config = config_from_args(&cli, lookup);
        assert_eq!(config.data_path, PathBuf::from("env.csv"));
        assert_eq!(config.preferred_country, "Japan");

        let cli = Cli::parse_from(["mbti", "countries", "--data", "flag.csv"]);
        let config = config_from_args(&cli, lookup);
        assert_eq!(config.data_path, PathBuf::from("flag.csv"));

        let config = config_from_args(&cli, |_| Some("  ".to_string()));
        assert_eq!(config.preferred_country, DEFAULT_PREFERRED_COUNTRY);

        let cli = Cli::parse_from(["mbti", "countries"]);
        let config = config_from_args(&cli, |_| None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn tui_flags_parse_after_rewrite() {
        let cli = Cli::parse_from(rewrite_args(args(&["mbti", "-c", "Japan"])));
        match cli.command {
            Command::Tui(a) => assert_eq!(a.country.as_deref(), Some("Japan")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
