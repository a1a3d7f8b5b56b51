//! Shared dashboard workflow used by both CLI and TUI front-ends.
//!
//! load (once) -> select country -> aggregate/rank/narrate -> views
//!
//! The front-ends only decide how to present the views.

use tracing::debug;

use crate::data::{Dataset, LoadOutcome};
use crate::domain::DashboardConfig;
use crate::error::{AppError, DataError};
use crate::io::load_dataset;
use crate::palette::GradientPalette;
use crate::report::{AxisView, BarView, axis_view, bar_view};

/// Which page a default selection is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Distribution,
    Axes,
    Landmarks,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Distribution, Page::Axes, Page::Landmarks];

    pub fn title(self) -> &'static str {
        match self {
            Page::Distribution => "Distribution",
            Page::Axes => "Axes",
            Page::Landmarks => "Landmarks",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Page::Distribution => Page::Axes,
            Page::Axes => Page::Landmarks,
            Page::Landmarks => Page::Distribution,
        }
    }
}

/// A loaded dataset plus the settings needed to derive views from it.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: DashboardConfig,
    pub outcome: LoadOutcome,
    pub palette: GradientPalette,
}

impl Session {
    /// Load the configured dataset (never fails; see `LoadOutcome`).
    pub fn open(config: DashboardConfig) -> Self {
        let outcome = load_dataset(&config.data_path);
        Self::with_outcome(config, outcome)
    }

    pub fn with_outcome(config: DashboardConfig, outcome: LoadOutcome) -> Self {
        Self {
            config,
            outcome,
            palette: GradientPalette::reds(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.outcome.dataset
    }

    /// Default selection for `page`.
    ///
    /// The distribution page starts on the first country alphabetically; the
    /// axis page prefers the configured country.
    pub fn default_country(&self, page: Page) -> Option<&str> {
        match page {
            Page::Axes => self
                .dataset()
                .default_country_preferring(&self.config.preferred_country),
            Page::Distribution | Page::Landmarks => self.dataset().default_country(),
        }
    }

    /// Resolve an explicit request or fall back to the page default.
    ///
    /// Unknown names are rejected with the list of valid choices.
    pub fn resolve_country(&self, requested: Option<&str>, page: Page) -> Result<String, AppError> {
        let resolved = match requested {
            Some(name) => {
                if self.dataset().get(name).is_none() {
                    let err = DataError::UnknownCountry {
                        country: name.to_string(),
                    };
                    return Err(AppError::new(
                        err.exit_code(),
                        format!(
                            "{err}. Available: {}",
                            self.dataset().countries().join(", ")
                        ),
                    ));
                }
                name.to_string()
            }
            None => self
                .default_country(page)
                .map(str::to_string)
                .ok_or_else(|| AppError::new(3, "The dataset has no countries."))?,
        };
        debug!(country = %resolved, page = page.title(), "selected country");
        Ok(resolved)
    }

    pub fn distribution(&self, country: &str) -> Result<BarView, AppError> {
        let row = self.dataset().country(country)?;
        Ok(bar_view(row, &self.palette))
    }

    pub fn axes(&self, country: &str) -> Result<AxisView, AppError> {
        let row = self.dataset().country(country)?;
        Ok(axis_view(row))
    }
}
