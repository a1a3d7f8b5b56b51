//! Logging setup on top of `tracing` and `tracing-subscriber`.
//!
//! Levels used across the crate:
//!
//! - `warn`: fallback to the built-in table, skipped rows
//! - `info`: dataset load summary, written exports and snapshots
//! - `debug`: country selection, ignored columns, per-row issues
//!
//! The interactive dashboard owns the terminal, so it only logs when a log file
//! is configured.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Multi-field human-readable output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// One JSON object per event.
    Json,
}

/// How and where to log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// `RUST_LOG` directives; when set they replace `level`.
    pub env_directives: Option<String>,
    pub format: LogFormat,
    pub with_ansi: bool,
    /// Write to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            env_directives: None,
            format: LogFormat::default(),
            with_ansi: true,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Stderr output would interleave with the dashboard, so without a log file
    /// nothing is logged.
    #[must_use]
    pub fn for_tui(mut self) -> Self {
        if self.log_file.is_none() {
            self.level = LevelFilter::OFF;
            self.env_directives = None;
        }
        self
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if config.level == LevelFilter::OFF && config.env_directives.is_none() {
        return Ok(());
    }
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_with_writer(config, SharedFileWriter::new(file), false);
    } else {
        init_with_writer(config, io::stderr, config.with_ansi);
    }
    Ok(())
}

fn init_with_writer<W>(config: &LogConfig, writer: W, ansi: bool)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config.level, config.env_directives.as_deref());

    // `try_init` so a second call (tests, embedding) is a no-op instead of a panic.
    let _ = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer).with_target(true))
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
    };
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl io::Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Dependencies stay at `warn`; this crate logs at `level`.
fn build_env_filter(level: LevelFilter, directives: Option<&str>) -> EnvFilter {
    let fallback = || {
        let level = level.to_string().to_lowercase();
        let deps = if level == "off" { "off" } else { "warn" };
        EnvFilter::new(format!("{deps},mbti_atlas={level}"))
    };
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(fallback)
}
