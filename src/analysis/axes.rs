//! Axis aggregation.
//!
//! Each axis partitions the 16 codes into two fixed 8-element subsets through
//! the static pole table in `domain::types`; a pole's proportion is the plain
//! sum over its subset. No normalization happens here, so the two poles of an
//! axis always add up to the row total.

use crate::domain::{AXIS_COUNT, Axis, AxisResult, CountryProportions};

/// Aggregate one row into its four axis results (E/I, S/N, T/F, J/P order).
pub fn aggregate(row: &CountryProportions) -> [AxisResult; AXIS_COUNT] {
    Axis::ALL.map(|axis| aggregate_axis(row, axis))
}

/// Aggregate a single axis.
pub fn aggregate_axis(row: &CountryProportions, axis: Axis) -> AxisResult {
    let (first_pole, _) = axis.poles();
    let mut first = 0.0;
    let mut second = 0.0;
    for (code, value) in row.entries() {
        if code.pole_on(axis) == first_pole {
            first += value;
        } else {
            second += value;
        }
    }
    AxisResult { axis, first, second }
}
