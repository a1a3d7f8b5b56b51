//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - the rank-1 bar: `#`
//! - every other bar: `=`
//! - one column group per bar, 4 characters wide, labelled with its type code

use crate::report::BarView;

const BAR_WIDTH: usize = 4;

/// Render a vertical bar plot of a ranked distribution.
pub fn render_bar_plot(view: &BarView, height: usize) -> String {
    let height = height.max(2);
    let max = view.max_value();

    let bar_heights: Vec<usize> = view
        .bars
        .iter()
        .map(|b| scaled_height(b.value, max, height))
        .collect();

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | max={:.2}% | rows={height}\n",
        view.country,
        max * 100.0
    ));

    for level in (1..=height).rev() {
        let cells: Vec<String> = view
            .bars
            .iter()
            .zip(&bar_heights)
            .map(|(bar, &h)| {
                let ch = if h < level {
                    ' '
                } else if bar.rank == 1 {
                    '#'
                } else {
                    '='
                };
                std::iter::repeat_n(ch, BAR_WIDTH).collect()
            })
            .collect();
        out.push_str(cells.join(" ").trim_end());
        out.push('\n');
    }

    let axis_len = (view.bars.len() * (BAR_WIDTH + 1)).saturating_sub(1);
    out.push_str(&"-".repeat(axis_len));
    out.push('\n');

    let labels: Vec<String> = view
        .bars
        .iter()
        .map(|b| format!("{:<BAR_WIDTH$}", b.label.code()))
        .collect();
    out.push_str(labels.join(" ").trim_end());
    out.push('\n');

    out
}

/// Cut every line of `plot` to at most `width` characters.
pub fn clip_width(plot: &str, width: usize) -> String {
    let mut out = String::with_capacity(plot.len());
    for line in plot.lines() {
        out.extend(line.chars().take(width.max(1)));
        out.push('\n');
    }
    out
}

fn scaled_height(value: f64, max: f64, height: usize) -> usize {
    if !(max.is_finite() && max > 0.0 && value.is_finite()) {
        return 0;
    }
    let u = (value / max).clamp(0.0, 1.0);
    (u * height as f64).round() as usize
}
