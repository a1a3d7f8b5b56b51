//! Property-based and end-to-end checks over the public analysis API.

use std::io::Write;

use mbti_atlas::analysis::{aggregate, bar_colors, narrate, rank};
use mbti_atlas::domain::{
    Axis, AxisResult, CountryProportions, Dominance, MbtiType, Pole, Rgb, TYPE_COUNT,
};
use mbti_atlas::io::read_dataset;
use mbti_atlas::palette::{GradientPalette, HIGHLIGHT};
use mbti_atlas::report::{axis_view, bar_view};
use proptest::prelude::*;

fn row_strategy() -> impl Strategy<Value = [f64; TYPE_COUNT]> {
    prop::array::uniform16(0.0f64..1.0)
}

/// Palette of `len` distinct colors, light (index 0) to dark.
fn palette_of(len: usize) -> GradientPalette {
    let colors = (0..len).map(|i| Rgb(i as u8, 0, 0)).collect();
    GradientPalette::new(colors).unwrap()
}

// =============================================================================
// Aggregation
// =============================================================================

proptest! {
    /// Each axis splits the full row: pole sums add back up to the row total.
    #[test]
    fn prop_axis_pairs_sum_to_row_total(values in row_strategy()) {
        let row = CountryProportions::new("X", values);
        let total = row.total();
        for result in aggregate(&row) {
            prop_assert!((result.first + result.second - total).abs() < 1e-6);
        }
    }
}

// =============================================================================
// Ranking and colors
// =============================================================================

proptest! {
    /// Ranking is a non-increasing permutation of the row.
    #[test]
    fn prop_rank_is_sorted_permutation(values in row_strategy()) {
        let row = CountryProportions::new("X", values);
        let ranked = rank(&row);

        let mut seen: Vec<MbtiType> = ranked.iter().map(|e| e.code).collect();
        seen.sort_by_key(|c| c.index());
        prop_assert_eq!(seen, MbtiType::ALL.to_vec());

        for (i, e) in ranked.iter().enumerate() {
            prop_assert_eq!(e.rank, i + 1);
            prop_assert_eq!(e.value, row.value(e.code));
        }
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if values.iter().filter(|&&v| v == max).count() == 1 {
            prop_assert_eq!(ranked[0].value, max);
        }
    }

    /// One color per bar; rank 1 is the highlight, the rest walk the palette
    /// from dark to light and then stay on the lightest color.
    #[test]
    fn prop_bar_colors_follow_reversed_palette(len in 1usize..=20) {
        let palette = palette_of(len);
        let colors = bar_colors(TYPE_COUNT, &palette);
        prop_assert_eq!(colors.len(), TYPE_COUNT);
        prop_assert_eq!(colors[0], HIGHLIGHT);

        let positions: Vec<usize> = colors[1..]
            .iter()
            .map(|c| palette.colors().iter().position(|p| p == c).unwrap())
            .collect();
        prop_assert_eq!(positions[0], len - 1);
        for pair in positions.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
        if len < TYPE_COUNT - 1 {
            prop_assert_eq!(*positions.last().unwrap(), 0);
        }
    }
}

#[test]
fn bar_views_have_sixteen_colors_for_common_palettes() {
    let row = CountryProportions::new("X", [0.0625; TYPE_COUNT]);
    for len in [1, 9, 20] {
        let view = bar_view(&row, &palette_of(len));
        assert_eq!(view.bars.len(), TYPE_COUNT, "palette length {len}");
    }
}

// =============================================================================
// Narrative
// =============================================================================

#[test]
fn sixty_forty_split_reports_twenty_points() {
    let axes = [
        AxisResult { axis: Axis::Ei, first: 0.60, second: 0.40 },
        AxisResult { axis: Axis::Sn, first: 0.40, second: 0.60 },
        AxisResult { axis: Axis::Tf, first: 0.50, second: 0.50 },
        AxisResult { axis: Axis::Jp, first: 0.55, second: 0.45 },
    ];
    let lines = narrate(&axes);

    assert!(matches!(lines[0].dominance, Dominance::Leading { pole: Pole::E, .. }));
    assert!((lines[0].margin_pp - 20.0).abs() < 1e-9);
    assert!(lines[0].text.contains("20.0%p"));
    assert!(matches!(lines[1].dominance, Dominance::Leading { pole: Pole::N, .. }));
    assert_eq!(lines[2].dominance, Dominance::Balanced);
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn single_type_country_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    let header: Vec<&str> = MbtiType::ALL.iter().map(|c| c.code()).collect();
    writeln!(file, "Country,{}", header.join(",")).unwrap();
    let values: Vec<&str> = MbtiType::ALL
        .iter()
        .map(|c| if *c == MbtiType::Istj { "1.0" } else { "0" })
        .collect();
    writeln!(file, "A,{}", values.join(",")).unwrap();
    drop(file);

    let dataset = read_dataset(&path).unwrap();
    let row = dataset.country("A").unwrap();

    let view = axis_view(row);
    let expected = [(Pole::I, Pole::E), (Pole::S, Pole::N), (Pole::T, Pole::F), (Pole::J, Pole::P)];
    for (donut, (one, zero)) in view.donuts.iter().zip(expected) {
        for slice in &donut.poles {
            let want = if slice.pole == one {
                1.0
            } else {
                assert_eq!(slice.pole, zero);
                0.0
            };
            assert_eq!(slice.value, want, "{:?}", slice.pole);
        }
    }

    let bars = bar_view(row, &GradientPalette::reds());
    assert_eq!(bars.bars[0].label, MbtiType::Istj);
    assert_eq!(bars.bars[0].value, 1.0);
    let rest: Vec<MbtiType> = bars.bars[1..].iter().map(|b| b.label).collect();
    let column_order: Vec<MbtiType> = MbtiType::ALL
        .into_iter()
        .filter(|c| *c != MbtiType::Istj)
        .collect();
    assert_eq!(rest, column_order);
    assert!(bars.bars[1..].iter().all(|b| b.value == 0.0));
}
