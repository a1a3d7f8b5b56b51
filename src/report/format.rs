//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized

use crate::data::{Dataset, LoadOutcome};
use crate::domain::MbtiType;
use crate::landmarks::{LANDMARKS, MAP_CENTER};

use super::{AxisView, BarView, format_percent};

/// One-line provenance summary, e.g. `Source: data.csv (12 countries)`.
pub fn format_source_line(dataset: &Dataset) -> String {
    let mut line = format!(
        "Source: {} ({} countries)",
        dataset.source(),
        dataset.len()
    );
    let skipped = dataset.row_issues().len();
    if skipped > 0 {
        line.push_str(&format!(" | skipped rows: {skipped}"));
    }
    line
}

/// Warning block printed to stderr when the fallback table is in use.
pub fn format_load_warning(outcome: &LoadOutcome) -> Option<String> {
    outcome.warning().map(|w| format!("warning: {w}"))
}

/// Ranked distribution table.
pub fn format_distribution(view: &BarView) -> String {
    let mut out = String::new();

    out.push_str("=== mbti - Type distribution ===\n");
    out.push_str(&format!("Country: {}\n\n", view.country));

    out.push_str(format!("{:>4} {:<6} {:>8} {:<8}", "rank", "type", "share", "color").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<6} {:-<8} {:-<8}", "", "", "", "").trim_end());
    out.push('\n');

    for bar in &view.bars {
        let marker = if bar.rank == 1 { " *" } else { "" };
        out.push_str(
            format!(
                "{:>4} {:<6} {:>8} {:<8}{marker}",
                bar.rank,
                bar.label.code(),
                bar.percent_text,
                bar.color.to_string(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Axis table plus narrative.
pub fn format_axes(view: &AxisView) -> String {
    let mut out = String::new();

    out.push_str("=== mbti - Axis preferences ===\n");
    out.push_str(&format!("Country: {}\n\n", view.country));

    out.push_str(
        format!(
            "{:<22} {:<16} {:>8} {:<16} {:>8}",
            "axis", "pole", "share", "pole", "share"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<22} {:-<16} {:-<8} {:-<16} {:-<8}", "", "", "", "", "").trim_end());
    out.push('\n');

    for donut in &view.donuts {
        let [a, b] = &donut.poles;
        out.push_str(
            format!(
                "{:<22} {:<16} {:>8} {:<16} {:>8}",
                donut.title,
                a.pole.display_name(),
                format_percent(a.value, 2),
                b.pole.display_name(),
                format_percent(b.value, 2),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push_str("\nSummary:\n");
    for line in &view.narrative {
        out.push_str(&format!("- {line}\n"));
    }

    out
}

/// Sorted country list, marking the default selections.
pub fn format_countries(dataset: &Dataset, preferred: &str) -> String {
    let default = dataset.default_country();
    let axis_default = dataset.default_country_preferring(preferred);

    let mut out = String::new();
    for (idx, name) in dataset.countries().iter().enumerate() {
        let mut tags = Vec::new();
        if Some(name.as_str()) == default {
            tags.push("distribution default");
        }
        if Some(name.as_str()) == axis_default {
            tags.push("axes default");
        }
        if tags.is_empty() {
            out.push_str(&format!("{:>3}) {name}\n", idx + 1));
        } else {
            out.push_str(&format!("{:>3}) {name} [{}]\n", idx + 1, tags.join(", ")));
        }
    }
    out
}

/// Full table of raw proportions, rows in source order.
pub fn format_dataset_table(dataset: &Dataset) -> String {
    let name_width = dataset
        .rows()
        .iter()
        .map(|r| r.country.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(7, 24);

    let mut out = String::new();
    let mut header = format!("{:<name_width$}", "Country");
    for code in MbtiType::ALL {
        header.push_str(&format!(" {:>6}", code.code()));
    }
    out.push_str(&header);
    out.push('\n');

    for row in dataset.rows() {
        let mut line = format!("{:<name_width$}", truncate(&row.country, name_width));
        for (_, value) in row.entries() {
            line.push_str(&format!(" {value:>6.4}"));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// The fixed landmark list.
pub fn format_landmarks() -> String {
    let mut out = String::new();
    out.push_str("=== Seoul: top 10 landmarks for international visitors ===\n");
    out.push_str(&format!(
        "Map center: {:.4}, {:.4}\n\n",
        MAP_CENTER.0, MAP_CENTER.1
    ));
    for (idx, l) in LANDMARKS.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {:<30} {:>9.6} {:>10.6}  {}\n",
            idx + 1,
            l.name,
            l.lat,
            l.lon,
            l.description
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
