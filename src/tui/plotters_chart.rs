//! Plotters-powered distribution bar chart for Ratatui.
//!
//! Plotters gives us axis/label handling for free; the output is drawn into the
//! Ratatui buffer through `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{Rgb, TYPE_COUNT};
use crate::report::BarView;

/// Share every type would have in a perfectly uniform population.
const UNIFORM_SHARE: f64 = 1.0 / TYPE_COUNT as f64;

/// Ranked bars, one color per rank, plus a uniform-share reference line.
pub struct DistributionChart<'a> {
    pub view: &'a BarView,
}

impl DistributionChart<'_> {
    /// Upper y bound: the tallest bar (or the reference line) plus headroom.
    fn y_max(&self) -> f64 {
        let top = self.view.max_value().max(UNIFORM_SHARE);
        if top.is_finite() && top > 0.0 { top * 1.1 } else { 1.0 }
    }
}

impl Widget for DistributionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters can fail to lay out a chart in a tiny area.
        if area.width < 24 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.view.bars.len() as i32;
        if n == 0 {
            return;
        }
        let y_max = self.y_max();
        let bars = &self.view.bars;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(bars.len())
                .y_labels(5)
                .x_label_formatter(&|v| match v {
                    SegmentValue::CenterOf(i) => bars
                        .get(*i as usize)
                        .map(|b| b.label.code().to_string())
                        .unwrap_or_default(),
                    _ => String::new(),
                })
                .y_label_formatter(&|v| format!("{:.0}%", v * 100.0))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let i = i as i32;
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0.0),
                        (SegmentValue::Exact(i + 1), bar.value),
                    ],
                    plotters_color(bar.color).filled(),
                )
            }))?;

            let reference = RGBColor(128, 128, 128);
            chart.draw_series(LineSeries::new(
                [
                    (SegmentValue::Exact(0), UNIFORM_SHARE),
                    (SegmentValue::Exact(n), UNIFORM_SHARE),
                ],
                &reference,
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn plotters_color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}
