//! Ratatui-based terminal dashboard.
//!
//! Three pages share one loaded dataset: the ranked type distribution, the four
//! axis donuts with their summary, and the Seoul landmark map. The distribution
//! and axis pages keep independent country selections.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap},
};
use tracing::{info, warn};

use crate::app::pipeline::{Page, Session};
use crate::cli::TuiArgs;
use crate::error::AppError;
use crate::landmarks::LANDMARKS;
use crate::snapshot::{DEFAULT_SNAPSHOT_DIR, write_snapshot};

mod canvas;
mod plotters_chart;

use canvas::{donut_legend, render_donut, render_landmark_map, tui_color};
use plotters_chart::DistributionChart;

/// Start the dashboard.
pub fn run(session: Session, args: TuiArgs) -> Result<(), AppError> {
    // Resolve the requested country before touching the terminal so a bad name
    // is reported as a normal CLI error.
    let mut app = App::new(session, args.country.as_deref())?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: Session,
    page: Page,
    /// Selector positions into `dataset().countries()`.
    distribution_idx: usize,
    axes_idx: usize,
    landmark_idx: usize,
    snapshot_dir: PathBuf,
    status: String,
}

impl App {
    fn new(session: Session, requested: Option<&str>) -> Result<Self, AppError> {
        let distribution = session.resolve_country(requested, Page::Distribution)?;
        let axes = session.resolve_country(requested, Page::Axes)?;
        let dataset = session.dataset();
        let distribution_idx = dataset.selector_index(&distribution).unwrap_or(0);
        let axes_idx = dataset.selector_index(&axes).unwrap_or(0);

        let status = match session.outcome.warning() {
            Some(w) => w,
            None => crate::report::format_source_line(dataset),
        };

        Ok(Self {
            session,
            page: Page::Distribution,
            distribution_idx,
            axes_idx,
            landmark_idx: 0,
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press; returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.page = self.page.next(),
            KeyCode::Char('1') => self.page = Page::Distribution,
            KeyCode::Char('2') => self.page = Page::Axes,
            KeyCode::Char('3') => self.page = Page::Landmarks,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Char('s') => self.write_snapshot(),
            _ => {}
        }
        false
    }

    fn move_selection(&mut self, delta: isize) {
        let count = match self.page {
            Page::Landmarks => LANDMARKS.len(),
            _ => self.session.dataset().len(),
        };
        let idx = match self.page {
            Page::Distribution => &mut self.distribution_idx,
            Page::Axes => &mut self.axes_idx,
            Page::Landmarks => &mut self.landmark_idx,
        };
        if count == 0 {
            return;
        }
        *idx = idx.saturating_add_signed(delta).min(count - 1);
    }

    fn country_at(&self, idx: usize) -> Option<&str> {
        self.session.dataset().countries().get(idx).map(String::as_str)
    }

    /// Country shown on the current page (the landmark page snapshots the axis selection).
    fn current_country(&self) -> Option<&str> {
        match self.page {
            Page::Distribution => self.country_at(self.distribution_idx),
            Page::Axes | Page::Landmarks => self.country_at(self.axes_idx),
        }
    }

    fn write_snapshot(&mut self) {
        let Some(country) = self.current_country().map(str::to_string) else {
            self.status = "No country selected.".to_string();
            return;
        };
        match write_snapshot(
            self.session.dataset(),
            &country,
            &self.session.palette,
            &self.snapshot_dir,
        ) {
            Ok(path) => {
                info!(path = %path.display(), "snapshot written from dashboard");
                self.status = format!("Wrote snapshot: {}", path.display());
            }
            Err(err) => {
                warn!(%err, "snapshot failed");
                self.status = format!("Snapshot failed: {err}");
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Page::ALL
            .iter()
            .enumerate()
            .map(|(i, p)| Line::from(format!("{} {}", i + 1, p.title())))
            .collect();
        let selected = Page::ALL.iter().position(|p| *p == self.page).unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" mbti ", Style::default().fg(Color::Cyan))),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(0)])
            .split(area);

        match self.page {
            Page::Distribution => {
                self.draw_country_list(frame, chunks[0], self.distribution_idx);
                self.draw_distribution(frame, chunks[1]);
            }
            Page::Axes => {
                self.draw_country_list(frame, chunks[0], self.axes_idx);
                self.draw_axes(frame, chunks[1]);
            }
            Page::Landmarks => {
                self.draw_landmark_list(frame, chunks[0]);
                self.draw_landmarks(frame, chunks[1]);
            }
        }
    }

    fn draw_country_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect, selected: usize) {
        let items: Vec<ListItem> = self
            .session
            .dataset()
            .countries()
            .iter()
            .map(|c| ListItem::new(c.as_str()))
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Country").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_distribution(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(country) = self.country_at(self.distribution_idx) else {
            draw_message(frame, area, "No countries loaded.");
            return;
        };
        let view = match self.session.distribution(country) {
            Ok(view) => view,
            Err(err) => {
                draw_message(frame, area, err.message());
                return;
            }
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(26)])
            .split(area);

        let block = Block::default().title(view.title.as_str()).borders(Borders::ALL);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        frame.render_widget(DistributionChart { view: &view }, inner);

        let rows = view.bars.iter().map(|bar| {
            Row::new(vec![
                Cell::from(bar.rank.to_string()),
                Cell::from(bar.label.code()).style(Style::default().fg(tui_color(bar.color))),
                Cell::from(bar.percent_text.clone()),
            ])
        });
        let table = Table::new(
            rows,
            [Constraint::Length(4), Constraint::Length(6), Constraint::Length(8)],
        )
        .header(Row::new(vec!["rank", "type", "share"]).style(Style::default().fg(Color::Gray)))
        .block(Block::default().title("Ranking").borders(Borders::ALL));
        frame.render_widget(table, chunks[1]);
    }

    fn draw_axes(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(country) = self.country_at(self.axes_idx) else {
            draw_message(frame, area, "No countries loaded.");
            return;
        };
        let view = match self.session.axes(country) {
            Ok(view) => view,
            Err(err) => {
                draw_message(frame, area, err.message());
                return;
            }
        };

        let outer = Block::default().title(view.title.as_str()).borders(Borders::ALL);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(35),
                Constraint::Min(6),
            ])
            .split(inner);

        for (row_idx, row_area) in rows.iter().take(2).enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row_area);
            for (col_idx, cell) in cols.iter().enumerate() {
                let donut = &view.donuts[row_idx * 2 + col_idx];
                let block = Block::default().title(donut.title.as_str()).borders(Borders::ALL);
                let body = block.inner(*cell);
                frame.render_widget(block, *cell);

                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(3), Constraint::Length(2)])
                    .split(body);
                render_donut(frame, parts[0], donut);
                frame.render_widget(Paragraph::new(Text::from(donut_legend(donut))), parts[1]);
            }
        }

        let summary: Vec<Line> = view
            .narrative
            .iter()
            .map(|line| Line::from(format!("- {line}")))
            .collect();
        let p = Paragraph::new(Text::from(summary))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Summary").borders(Borders::ALL));
        frame.render_widget(p, rows[2]);
    }

    fn draw_landmark_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = LANDMARKS
            .iter()
            .enumerate()
            .map(|(i, l)| ListItem::new(format!("{:>2} {}", i + 1, l.name)))
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Landmark").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.landmark_idx));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_landmarks(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(4)])
            .split(area);

        let block = Block::default()
            .title("Seoul: top 10 landmarks for international visitors")
            .borders(Borders::ALL);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        render_landmark_map(frame, inner, self.landmark_idx);

        if let Some(l) = LANDMARKS.get(self.landmark_idx) {
            let details = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(l.name, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(format!("{} ({:.6}, {:.6})", l.description, l.lat, l.lon)),
            ]))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(details, chunks[1]);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab/1-3 page  ↑/↓ select  s snapshot  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_message(frame: &mut ratatui::Frame<'_>, area: Rect, msg: &str) {
    let p = Paragraph::new(msg.to_string())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}
