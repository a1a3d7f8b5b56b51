//! Pure transformations over a single country row.
//!
//! - `axes`: 16 type proportions -> 4 axis pole sums
//! - `rank`: descending ranking + bar colors
//! - `narrative`: dominance statements per axis
//!
//! Nothing here holds state; every function is a pure function of its inputs.

pub mod axes;
pub mod narrative;
pub mod rank;

pub use axes::aggregate;
pub use narrative::{NarrativeLine, narrate};
pub use rank::{bar_colors, color_for, rank};
