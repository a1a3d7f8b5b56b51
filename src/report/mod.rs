//! Presentation views and terminal formatting.
//!
//! The view structs are the boundary between the analysis code and every
//! renderer (CLI text, ASCII plot, TUI, JSON/CSV exports). They carry values,
//! labels, colors and pre-formatted text, never drawing instructions.

use serde::Serialize;

use crate::analysis::{NarrativeLine, bar_colors, narrate, rank};
use crate::domain::{AXIS_COUNT, Axis, CountryProportions, MbtiType, Pole, Rgb};
use crate::palette::{GradientPalette, pole_color};

pub mod format;

pub use format::*;

/// One bar of the ranked distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDatum {
    pub rank: usize,
    pub label: MbtiType,
    pub value: f64,
    pub color: Rgb,
    /// Value as a percentage with two decimals, e.g. `12.34%`.
    pub percent_text: String,
}

/// Ranked bar chart for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    pub country: String,
    pub title: String,
    pub bars: Vec<BarDatum>,
}

impl BarView {
    pub fn top(&self) -> Option<&BarDatum> {
        self.bars.first()
    }

    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

/// One slice of a donut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoleSlice {
    pub pole: Pole,
    pub trait_name: &'static str,
    pub value: f64,
    pub color: Rgb,
}

/// Donut chart for one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutView {
    pub axis: Axis,
    pub title: String,
    pub poles: [PoleSlice; 2],
}

impl DonutView {
    /// Share of each pole within the donut (falls back to 50/50 for an empty axis).
    pub fn shares(&self) -> [f64; 2] {
        let total = self.poles[0].value + self.poles[1].value;
        if total > 0.0 && total.is_finite() {
            [self.poles[0].value / total, self.poles[1].value / total]
        } else {
            [0.5, 0.5]
        }
    }
}

/// Four donuts plus narrative for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisView {
    pub country: String,
    pub title: String,
    pub donuts: [DonutView; AXIS_COUNT],
    pub narrative: [NarrativeLine; AXIS_COUNT],
}

/// Build the ranked distribution view.
pub fn bar_view(row: &CountryProportions, palette: &GradientPalette) -> BarView {
    let ranked = rank(row);
    let colors = bar_colors(ranked.len(), palette);

    let bars = ranked
        .iter()
        .zip(colors)
        .map(|(entry, color)| BarDatum {
            rank: entry.rank,
            label: entry.code,
            value: entry.value,
            color,
            percent_text: format_percent(entry.value, 2),
        })
        .collect();

    BarView {
        country: row.country.clone(),
        title: format!("MBTI type distribution: {}", row.country),
        bars,
    }
}

/// Build the four-donut axis view with its narrative.
pub fn axis_view(row: &CountryProportions) -> AxisView {
    let axes = crate::analysis::aggregate(row);
    let narrative = narrate(&axes);

    let donuts = axes.map(|result| {
        let slice = |pole: Pole, value: f64| PoleSlice {
            pole,
            trait_name: pole.trait_name(),
            value,
            color: pole_color(pole),
        };
        DonutView {
            axis: result.axis,
            title: result.axis.title(),
            poles: [
                slice(result.first_pole(), result.first),
                slice(result.second_pole(), result.second),
            ],
        }
    });

    AxisView {
        country: row.country.clone(),
        title: format!("MBTI axis preferences: {}", row.country),
        donuts,
        narrative,
    }
}

/// Format a fraction as a percentage, e.g. `0.1234` -> `12.34%`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TYPE_COUNT;
    use crate::palette::HIGHLIGHT;

    fn istj_only() -> CountryProportions {
        let mut values = [0.0; TYPE_COUNT];
        values[MbtiType::Istj.index()] = 1.0;
        CountryProportions::new("A", values)
    }

    #[test]
    fn bar_view_ranks_and_colors() {
        let view = bar_view(&istj_only(), &GradientPalette::reds());
        assert_eq!(view.bars.len(), TYPE_COUNT);
        let top = view.top().unwrap();
        assert_eq!(top.label, MbtiType::Istj);
        assert_eq!(top.value, 1.0);
        assert_eq!(top.color, HIGHLIGHT);
        assert_eq!(top.percent_text, "100.00%");

        let rest: Vec<MbtiType> = view.bars[1..].iter().map(|b| b.label).collect();
        let expected: Vec<MbtiType> = MbtiType::ALL
            .into_iter()
            .filter(|t| *t != MbtiType::Istj)
            .collect();
        assert_eq!(rest, expected);
        assert!(view.bars[1..].iter().all(|b| b.value == 0.0 && b.percent_text == "0.00%"));
    }

    #[test]
    fn axis_view_uses_pole_colors() {
        let view = axis_view(&istj_only());
        let ei = &view.donuts[0];
        assert_eq!(ei.title, "Energy (E vs I)");
        assert_eq!(ei.poles[0].pole, Pole::E);
        assert_eq!(ei.poles[0].value, 0.0);
        assert_eq!(ei.poles[1].value, 1.0);
        assert_eq!(ei.poles[1].color, pole_color(Pole::I));
        assert_eq!(ei.shares(), [0.0, 1.0]);
        assert!(view.narrative[0].text.contains("Introversion (I) is stronger by about 100.0%p."));
    }

    #[test]
    fn format_percent_rounds() {
        assert_eq!(format_percent(0.123456, 2), "12.35%");
        assert_eq!(format_percent(0.5, 0), "50%");
    }
}
