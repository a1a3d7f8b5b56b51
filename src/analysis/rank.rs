//! Ranking and bar coloring.

use std::cmp::Ordering;

use crate::domain::{CountryProportions, MbtiType, RankedEntry, Rgb, TYPE_COUNT};
use crate::palette::{GradientPalette, HIGHLIGHT};

/// Rank the 16 proportions, largest first.
///
/// The sort is stable: equal proportions keep their column order.
pub fn rank(row: &CountryProportions) -> [RankedEntry; TYPE_COUNT] {
    let mut pairs: [(MbtiType, f64); TYPE_COUNT] = MbtiType::ALL.map(|code| (code, row.value(code)));
    pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    std::array::from_fn(|i| RankedEntry {
        rank: i + 1,
        code: pairs[i].0,
        value: pairs[i].1,
    })
}

/// Color of the bar at 1-based `rank` among `n` bars.
///
/// Rank 1 is the highlight color; ranks 2..=n walk the palette from its
/// darkest color towards its lightest and then repeat the lightest.
/// Returns `None` for rank 0 or a rank past `n`.
pub fn color_for(rank: usize, n: usize, palette: &GradientPalette) -> Option<Rgb> {
    match rank {
        0 => None,
        r if r > n => None,
        1 => Some(HIGHLIGHT),
        r => Some(palette.darkest_first(r - 2)),
    }
}

/// Colors for `n` ranked bars, in rank order.
pub fn bar_colors(n: usize, palette: &GradientPalette) -> Vec<Rgb> {
    (1..=n).filter_map(|r| color_for(r, n, palette)).collect()
}
