//! Canvas drawings: axis donuts and the landmark map.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
};

use crate::domain::Rgb;
use crate::landmarks::{LANDMARKS, MAP_CENTER, bounds};
use crate::report::DonutView;

/// Inner radius of the ring, relative to the outer radius of 1.0.
const HOLE: f64 = 0.55;
const RING_STEPS: usize = 8;
const ANGLE_STEPS: usize = 240;

pub fn tui_color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Sample points covering the ring, split by slice.
///
/// Slices start at twelve o'clock and run clockwise, first pole first.
pub fn donut_points(shares: [f64; 2]) -> [Vec<(f64, f64)>; 2] {
    let mut out = [Vec::new(), Vec::new()];
    let split = shares[0].clamp(0.0, 1.0);
    for r in 0..RING_STEPS {
        let radius = HOLE + (1.0 - HOLE) * (r as f64 + 0.5) / RING_STEPS as f64;
        for a in 0..ANGLE_STEPS {
            let frac = (a as f64 + 0.5) / ANGLE_STEPS as f64;
            let angle = FRAC_PI_2 - frac * TAU;
            let slice = usize::from(frac >= split);
            out[slice].push((radius * angle.cos(), radius * angle.sin()));
        }
    }
    out
}

/// Canvas bounds that keep a unit circle round in `area`.
///
/// Terminal cells are roughly twice as tall as they are wide.
fn round_bounds(area: Rect, extent: f64) -> ([f64; 2], [f64; 2]) {
    let w = f64::from(area.width.max(1)) / 2.0;
    let h = f64::from(area.height.max(1));
    if w >= h {
        let x = extent * w / h;
        ([-x, x], [-extent, extent])
    } else {
        let y = extent * h / w;
        ([-extent, extent], [-y, y])
    }
}

pub fn render_donut(frame: &mut Frame<'_>, area: Rect, donut: &DonutView) {
    let points = donut_points(donut.shares());
    let colors = [
        tui_color(donut.poles[0].color),
        tui_color(donut.poles[1].color),
    ];
    let label = donut.axis.label();
    let (x_bounds, y_bounds) = round_bounds(area, 1.15);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            for (coords, color) in points.iter().zip(colors) {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color,
                });
            }
            ctx.print(-0.15, 0.0, Span::styled(label, Style::default().fg(Color::White)));
        });
    frame.render_widget(canvas, area);
}

/// Legend lines: colored square, pole name, share.
pub fn donut_legend(donut: &DonutView) -> Vec<Line<'static>> {
    donut
        .poles
        .iter()
        .map(|slice| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(tui_color(slice.color))),
                Span::raw(format!(
                    "{} {}",
                    slice.pole.display_name(),
                    crate::report::format_percent(slice.value, 1)
                )),
            ])
        })
        .collect()
}

/// The ten landmarks as labelled markers on a lat/lon canvas.
pub fn render_landmark_map(frame: &mut Frame<'_>, area: Rect, selected: usize) {
    let (x_bounds, y_bounds) = bounds(0.12);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            let (lat, lon) = MAP_CENTER;
            let dx = (x_bounds[1] - x_bounds[0]) * 0.02;
            let dy = (y_bounds[1] - y_bounds[0]) * 0.03;
            let grey = Color::DarkGray;
            ctx.draw(&CanvasLine::new(lon - dx, lat, lon + dx, lat, grey));
            ctx.draw(&CanvasLine::new(lon, lat - dy, lon, lat + dy, grey));

            ctx.layer();
            for (idx, l) in LANDMARKS.iter().enumerate() {
                let color = if idx == selected { Color::Yellow } else { Color::Red };
                ctx.print(l.lon, l.lat, Span::styled("●", Style::default().fg(color)));
                ctx.print(
                    l.lon + dx * 0.6,
                    l.lat,
                    Span::styled(
                        format!("{} {}", idx + 1, l.name),
                        Style::default().fg(if idx == selected { Color::Yellow } else { Color::Gray }),
                    ),
                );
            }
        });
    frame.render_widget(canvas, area);
}
