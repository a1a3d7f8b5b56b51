//! Dominance statements for the axis page.

use std::fmt;

use serde::Serialize;

use crate::domain::{AXIS_COUNT, Axis, AxisResult, Dominance};

/// One human-readable summary line for an axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeLine {
    pub axis: Axis,
    pub dominance: Dominance,
    /// Absolute pole difference in percentage points.
    pub margin_pp: f64,
    pub text: String,
}

impl fmt::Display for NarrativeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Produce one line per axis, in input order.
pub fn narrate(axes: &[AxisResult; AXIS_COUNT]) -> [NarrativeLine; AXIS_COUNT] {
    axes.map(|axis| narrate_axis(&axis))
}

pub fn narrate_axis(result: &AxisResult) -> NarrativeLine {
    let axis = result.axis;
    let dominance = result.dominance();
    let margin_pp = (result.first - result.second).abs() * 100.0;

    let head = format!("{} axis ({})", axis.theme(), axis.label());
    let claim = match dominance {
        Dominance::Leading { pole, .. } => format!(
            "{} is stronger by about {margin_pp:.1}%p.",
            pole.display_name()
        ),
        Dominance::Balanced => format!(
            "{} and {} are evenly balanced ({margin_pp:.1}%p apart).",
            result.first_pole().display_name(),
            result.second_pole().display_name()
        ),
    };

    NarrativeLine {
        axis,
        dominance,
        margin_pp,
        text: format!("{head}: {claim} {}", interpretation(axis)),
    }
}

fn interpretation(axis: Axis) -> &'static str {
    match axis {
        Axis::Ei => "This shows where people tend to draw their energy from.",
        Axis::Sn => "This reflects how information is taken in (facts vs possibilities).",
        Axis::Tf => {
            "This shows whether decisions lean on logic and objectivity (T) or on values and relationships (F)."
        }
        Axis::Jp => {
            "This reflects whether daily life is planned and structured (J) or flexible and open (P)."
        }
    }
}
