//! Markdown snapshot bundle for one country.
//!
//! A snapshot captures both pages for the selected country (ranked table,
//! axis table, narrative) together with the dataset provenance, so a view can
//! be shared or compared later without re-running the tool.

use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::data::Dataset;
use crate::error::AppError;
use crate::palette::GradientPalette;
use crate::report::{AxisView, BarView, axis_view, bar_view, format_percent};

/// Default output directory, relative to the working directory.
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Write `mbti_<country>_<timestamp>.md` under `dir` and return its path.
pub fn write_snapshot(
    dataset: &Dataset,
    country: &str,
    palette: &GradientPalette,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    let row = dataset.country(country)?;
    let bars = bar_view(row, palette);
    let axes = axis_view(row);

    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create snapshot dir: {e}")))?;

    let now = Local::now();
    let stem = format!("mbti_{}_{}", slug(country), now.format("%Y%m%d_%H%M%S"));
    let (path, mut file) = create_unique(dir, &stem)
        .map_err(|e| AppError::new(4, format!("Failed to create snapshot: {e}")))?;

    let mut doc = String::new();
    doc.push_str(&format!("# mbti snapshot: {country}\n"));
    doc.push_str(&format!("- generated: {}\n", now.to_rfc3339()));
    doc.push_str(&format!("- source: {}\n", dataset.source()));
    doc.push_str(&format!("- countries: {}\n", dataset.len()));
    if dataset.is_fallback() {
        doc.push_str("- note: built-in sample data (illustrative values)\n");
    }
    doc.push_str(&render_bars(&bars));
    doc.push_str(&render_axes(&axes));

    file.write_all(doc.as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write snapshot: {e}")))?;
    info!(path = %path.display(), country, "wrote snapshot");
    Ok(path)
}

/// Open `<stem>.md`, or `<stem>_2.md`, `<stem>_3.md`, ... when taken.
///
/// Timestamps have one-second resolution, so two snapshots in the same second
/// would otherwise overwrite each other.
fn create_unique(dir: &Path, stem: &str) -> io::Result<(PathBuf, File)> {
    let mut n = 1u32;
    loop {
        let name = if n == 1 {
            format!("{stem}.md")
        } else {
            format!("{stem}_{n}.md")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && n < 1000 => n += 1,
            Err(e) => return Err(e),
        }
    }
}

fn render_bars(view: &BarView) -> String {
    let mut out = String::new();
    out.push_str("\n## Type distribution\n");
    out.push_str("| rank | type | share | color |\n");
    out.push_str("| - | - | - | - |\n");
    for bar in &view.bars {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            bar.rank, bar.label, bar.percent_text, bar.color
        ));
    }
    out
}

fn render_axes(view: &AxisView) -> String {
    let mut out = String::new();
    out.push_str("\n## Axis preferences\n");
    out.push_str("| axis | pole | share | pole | share |\n");
    out.push_str("| - | - | - | - | - |\n");
    for donut in &view.donuts {
        let [a, b] = &donut.poles;
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            donut.title,
            a.pole.display_name(),
            format_percent(a.value, 2),
            b.pole.display_name(),
            format_percent(b.value, 2)
        ));
    }

    out.push_str("\n## Summary\n");
    for line in &view.narrative {
        out.push_str(&format!("- {line}\n"));
    }
    out
}

/// File-name-safe form of a country name.
fn slug(name: &str) -> String {
    let mut out = String::new();
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "country".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback_dataset;
    use crate::error::DataError;

    #[test]
    fn slug_is_file_safe() {
        assert_eq!(slug("South Korea"), "south-korea");
        assert_eq!(slug("  Côte d'Ivoire "), "côte-d-ivoire");
        assert_eq!(slug("///"), "country");
    }

    #[test]
    fn snapshot_contains_both_pages() {
        let ds = fallback_dataset();
        let dir = tempfile::tempdir().unwrap();

        let path = write_snapshot(&ds, "South Korea", &GradientPalette::reds(), dir.path()).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("mbti_south-korea_"));

        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.starts_with("# mbti snapshot: South Korea\n"));
        assert!(doc.contains("- source: built-in sample data\n"));
        assert!(doc.contains("| 1 | ESFJ | 15.00% | #FF0000 |"), "{doc}");
        assert!(doc.contains("## Axis preferences"));
        assert_eq!(doc.matches("\n- Energy axis").count(), 1);
    }

    #[test]
    fn same_second_snapshots_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let (first, _) = create_unique(dir.path(), "mbti_japan_20260101_000000").unwrap();
        let (second, _) = create_unique(dir.path(), "mbti_japan_20260101_000000").unwrap();
        assert_eq!(first.file_name().unwrap(), "mbti_japan_20260101_000000.md");
        assert_eq!(second.file_name().unwrap(), "mbti_japan_20260101_000000_2.md");

        let ds = fallback_dataset();
        let palette = GradientPalette::reds();
        let a = write_snapshot(&ds, "Japan", &palette, dir.path()).unwrap();
        let b = write_snapshot(&ds, "Japan", &palette, dir.path()).unwrap();
        assert_ne!(a, b);
        assert!(std::fs::read_to_string(&a).unwrap().starts_with("# mbti snapshot: Japan\n"));
        assert!(std::fs::read_to_string(&b).unwrap().starts_with("# mbti snapshot: Japan\n"));
    }

    #[test]
    fn unknown_country_is_rejected() {
        let ds = fallback_dataset();
        let dir = tempfile::tempdir().unwrap();
        let err = write_snapshot(&ds, "Atlantis", &GradientPalette::reds(), dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.message(),
            DataError::UnknownCountry { country: "Atlantis".to_string() }.to_string()
        );
    }
}
