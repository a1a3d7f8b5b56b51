//! Text-mode plots for the CLI reports.

pub mod ascii;

pub use ascii::{clip_width, render_bar_plot};
