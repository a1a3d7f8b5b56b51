//! The immutable dataset handle.
//!
//! A `Dataset` is built once per process and then only read. Every view
//! borrows it; nothing mutates it after construction.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::domain::CountryProportions;
use crate::error::DataError;

/// Where the rows came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Fallback,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Fallback => f.write_str("built-in sample data"),
        }
    }
}

/// A row skipped while reading the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub line: usize,
    pub country: Option<String>,
    pub message: String,
}

/// Country rows plus provenance.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<CountryProportions>,
    index: HashMap<String, usize>,
    sorted_countries: Vec<String>,
    source: DatasetSource,
    row_issues: Vec<RowIssue>,
}

impl Dataset {
    /// Build a dataset; if a country appears twice only its first row is kept.
    pub fn new(rows: Vec<CountryProportions>, source: DatasetSource) -> Self {
        Self::with_issues(rows, source, Vec::new())
    }

    pub fn with_issues(rows: Vec<CountryProportions>, source: DatasetSource, row_issues: Vec<RowIssue>) -> Self {
        let mut kept = Vec::with_capacity(rows.len());
        let mut index = HashMap::with_capacity(rows.len());
        for row in rows {
            if index.contains_key(&row.country) {
                continue;
            }
            index.insert(row.country.clone(), kept.len());
            kept.push(row);
        }

        let mut sorted_countries: Vec<String> = kept.iter().map(|r| r.country.clone()).collect();
        sorted_countries.sort();

        Self {
            rows: kept,
            index,
            sorted_countries,
            source,
            row_issues,
        }
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[CountryProportions] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DatasetSource::Fallback
    }

    pub fn row_issues(&self) -> &[RowIssue] {
        &self.row_issues
    }

    /// Country names sorted ascending; this is the selector's contents.
    pub fn countries(&self) -> &[String] {
        &self.sorted_countries
    }

    pub fn get(&self, country: &str) -> Option<&CountryProportions> {
        self.index.get(country).map(|&i| &self.rows[i])
    }

    /// Look up a country, failing with `UnknownCountry`.
    pub fn country(&self, country: &str) -> Result<&CountryProportions, DataError> {
        self.get(country).ok_or_else(|| DataError::UnknownCountry {
            country: country.to_string(),
        })
    }

    /// Default selection: the first country alphabetically.
    pub fn default_country(&self) -> Option<&str> {
        self.sorted_countries.first().map(String::as_str)
    }

    /// `preferred` when present, otherwise the alphabetical default.
    pub fn default_country_preferring(&self, preferred: &str) -> Option<&str> {
        match self.index.get_key_value(preferred) {
            Some((name, _)) => Some(name.as_str()),
            None => self.default_country(),
        }
    }

    /// Position of `country` in the sorted selector list.
    pub fn selector_index(&self, country: &str) -> Option<usize> {
        self.sorted_countries.iter().position(|c| c == country)
    }
}

/// Result of loading: always a usable dataset, plus the reason if the
/// fallback table had to be used.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub fallback: Option<DataError>,
}

impl LoadOutcome {
    /// User-facing notice when the fallback table is in use.
    pub fn warning(&self) -> Option<String> {
        self.fallback
            .as_ref()
            .map(|reason| format!("{reason}. Using built-in sample data instead."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TYPE_COUNT;

    fn row(name: &str, v: f64) -> CountryProportions {
        CountryProportions::new(name, [v; TYPE_COUNT])
    }

    #[test]
    fn countries_are_sorted_and_lookup_works() {
        let ds = Dataset::new(
            vec![row("Japan", 0.1), row("Brazil", 0.2), row("Germany", 0.3)],
            DatasetSource::Fallback,
        );
        assert_eq!(ds.countries(), ["Brazil", "Germany", "Japan"]);
        assert_eq!(ds.default_country(), Some("Brazil"));
        assert_eq!(ds.country("Japan").unwrap().values[0], 0.1);
        assert_eq!(ds.selector_index("Japan"), Some(2));
        assert!(matches!(
            ds.country("Atlantis"),
            Err(DataError::UnknownCountry { .. })
        ));
    }

    #[test]
    fn duplicate_country_keeps_first_row() {
        let ds = Dataset::new(vec![row("A", 0.1), row("A", 0.9)], DatasetSource::Fallback);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.country("A").unwrap().values[0], 0.1);
    }

    #[test]
    fn preferred_default_falls_back_to_first() {
        let ds = Dataset::new(vec![row("Chile", 0.1), row("South Korea", 0.1)], DatasetSource::Fallback);
        assert_eq!(ds.default_country_preferring("South Korea"), Some("South Korea"));
        assert_eq!(ds.default_country_preferring("Peru"), Some("Chile"));

        let empty = Dataset::new(Vec::new(), DatasetSource::Fallback);
        assert_eq!(empty.default_country_preferring("Peru"), None);
    }
}
