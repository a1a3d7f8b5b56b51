//! CSV ingest and validation.
//!
//! This module turns a `Country` + 16 type-code CSV into a `Dataset`.
//!
//! Design goals:
//! - **Strict schema** for required columns (any missing one rejects the file)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Never fail the caller**: `load_dataset` always returns a usable table,
//!   substituting the built-in sample data when the file cannot be used

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::data::{Dataset, DatasetSource, LoadOutcome, RowIssue, fallback_dataset};
use crate::domain::{CountryProportions, MbtiType, TYPE_COUNT};
use crate::error::DataError;

/// Normalized name of the country column.
const COUNTRY_COLUMN: &str = "country";

/// Load the dataset at `path`, falling back to the built-in table on failure.
///
/// The fallback reason is returned alongside the dataset so the caller can
/// surface a non-fatal warning.
pub fn load_dataset(path: &Path) -> LoadOutcome {
    match read_dataset(path) {
        Ok(dataset) => {
            info!(
                path = %path.display(),
                countries = dataset.len(),
                skipped_rows = dataset.row_issues().len(),
                "loaded country dataset"
            );
            LoadOutcome {
                dataset,
                fallback: None,
            }
        }
        Err(reason) => {
            warn!(%reason, "falling back to built-in sample data");
            LoadOutcome {
                dataset: fallback_dataset(),
                fallback: Some(reason),
            }
        }
    }
}

/// Read and validate the CSV at `path` without any fallback.
pub fn read_dataset(path: &Path) -> Result<Dataset, DataError> {
    let file = File::open(path).map_err(|e| DataError::SourceUnavailable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DataError::SourceUnavailable {
            path: path.to_path_buf(),
            message: format!("failed to read CSV headers: {e}"),
        })?
        .clone();

    let columns = resolve_columns(&headers).map_err(|missing| DataError::SchemaInvalid {
        path: path.to_path_buf(),
        missing,
    })?;

    let mut rows: Vec<CountryProportions> = Vec::new();
    let mut issues = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                issues.push(RowIssue {
                    line,
                    country: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &columns) {
            Ok(row) => {
                if let Some(first_line) = seen.get(&row.country) {
                    issues.push(RowIssue {
                        line,
                        country: Some(row.country.clone()),
                        message: format!("duplicate country (first defined on line {first_line})"),
                    });
                    continue;
                }
                seen.insert(row.country.clone(), line);
                rows.push(row);
            }
            Err((country, message)) => issues.push(RowIssue {
                line,
                country,
                message,
            }),
        }
    }

    for issue in &issues {
        debug!(line = issue.line, country = ?issue.country, "skipped row: {}", issue.message);
    }
    if !issues.is_empty() {
        warn!(path = %path.display(), skipped = issues.len(), "skipped invalid rows");
    }

    if rows.is_empty() {
        return Err(DataError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    Ok(Dataset::with_issues(
        rows,
        DatasetSource::File(path.to_path_buf()),
        issues,
    ))
}

/// Column positions of the country name and each type code.
#[derive(Debug, Clone)]
struct ColumnMap {
    country: usize,
    types: [usize; TYPE_COUNT],
}

/// Map required columns to header positions, or list the missing ones.
fn resolve_columns(headers: &StringRecord) -> Result<ColumnMap, Vec<String>> {
    let header_map = build_header_map(headers);

    let mut missing = Vec::new();
    let country = header_map.get(COUNTRY_COLUMN).copied();
    if country.is_none() {
        missing.push("Country".to_string());
    }

    let mut types = [0usize; TYPE_COUNT];
    for code in MbtiType::ALL {
        match header_map.get(&code.code().to_ascii_lowercase()) {
            Some(&idx) => types[code.index()] = idx,
            None => missing.push(code.code().to_string()),
        }
    }

    let extra: Vec<&str> = headers
        .iter()
        .filter(|h| {
            let name = normalize_header_name(h);
            name != COUNTRY_COLUMN && name.parse::<MbtiType>().is_err()
        })
        .collect();
    if !extra.is_empty() {
        debug!(?extra, "ignoring extra columns");
    }

    match country {
        Some(country) if missing.is_empty() => Ok(ColumnMap { country, types }),
        _ => Err(missing),
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for repeated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "\u{feff}Country"). If we don't strip it, schema
    // validation will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Parse one record; on failure return the country (if known) and a message.
fn parse_row(record: &StringRecord, columns: &ColumnMap) -> Result<CountryProportions, (Option<String>, String)> {
    let country = record.get(columns.country).unwrap_or("").trim();
    if country.is_empty() {
        return Err((None, "Missing country name.".to_string()));
    }

    let mut values = [0.0; TYPE_COUNT];
    for code in MbtiType::ALL {
        let raw = record.get(columns.types[code.index()]).unwrap_or("").trim();
        let value = parse_proportion(raw)
            .map_err(|msg| (Some(country.to_string()), format!("{}: {msg}", code.code())))?;
        values[code.index()] = value;
    }

    Ok(CountryProportions::new(country, values))
}

fn parse_proportion(raw: &str) -> Result<f64, String> {
    if raw.is_empty() {
        return Err("missing value".to_string());
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("invalid number '{raw}'"))?;
    if !value.is_finite() {
        return Err(format!("non-finite value '{raw}'"));
    }
    if value < 0.0 {
        return Err(format!("negative proportion '{raw}'"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Country,ESTJ,ESTP,ESFJ,ESFP,ENTJ,ENTP,ENFJ,ENFP,ISTJ,ISTP,ISFJ,ISFP,INTJ,INTP,INFJ,INFP";

    fn uniform_cells() -> String {
        vec!["0.0625"; TYPE_COUNT].join(",")
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_valid_file() {
        let csv = format!("{HEADER}\nPeru,{cells}\nChile,{cells}\n", cells = uniform_cells());
        let file = write_csv(&csv);

        let outcome = load_dataset(file.path());
        assert!(outcome.fallback.is_none());
        assert!(outcome.warning().is_none());
        let ds = outcome.dataset;
        assert_eq!(ds.countries(), ["Chile", "Peru"]);
        assert!((ds.country("Peru").unwrap().total() - 1.0).abs() < 1e-12);
        assert_eq!(ds.source(), &DatasetSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn missing_file_falls_back_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let outcome = load_dataset(&path);
        assert!(outcome.dataset.is_fallback());
        assert!(matches!(outcome.fallback, Some(DataError::SourceUnavailable { .. })));
        let warning = outcome.warning().unwrap();
        assert!(warning.ends_with("Using built-in sample data instead."), "{warning}");
    }

    #[test]
    fn missing_columns_fall_back_and_are_named() {
        let header = HEADER.replace(",INFJ", "").replace(",ESTP", "");
        let cells = vec!["0.07"; TYPE_COUNT - 2].join(",");
        let file = write_csv(&format!("{header}\nPeru,{cells}\n"));

        let outcome = load_dataset(file.path());
        assert!(outcome.dataset.is_fallback());
        match outcome.fallback {
            Some(DataError::SchemaInvalid { missing, .. }) => {
                assert_eq!(missing, vec!["ESTP".to_string(), "INFJ".to_string()]);
            }
            other => panic!("expected SchemaInvalid, got {other:?}"),
        }
    }

    #[test]
    fn bom_and_header_case_are_tolerated() {
        let header = format!("\u{feff}country,{}", HEADER.to_lowercase().trim_start_matches("country,"));
        let file = write_csv(&format!("{header}\nPeru,{}\n", uniform_cells()));

        let ds = read_dataset(file.path()).unwrap();
        assert_eq!(ds.countries(), ["Peru"]);
    }

    #[test]
    fn extra_columns_and_reordered_columns_are_fine() {
        let mut names: Vec<&str> = HEADER.split(',').collect();
        names.reverse();
        names.push("Population");
        let header = names.join(",");
        // Reversed order: INFP first ... Country last, then Population.
        let mut cells: Vec<String> = vec!["0.0".to_string(); TYPE_COUNT];
        cells[0] = "1.0".to_string(); // INFP
        let line = format!("{},Peru,123", cells.join(","));
        let file = write_csv(&format!("{header}\n{line}\n"));

        let ds = read_dataset(file.path()).unwrap();
        let row = ds.country("Peru").unwrap();
        assert_eq!(row.value(MbtiType::Infp), 1.0);
        assert_eq!(row.value(MbtiType::Estj), 0.0);
    }

    #[test]
    fn bad_rows_are_skipped_and_recorded() {
        let cells = uniform_cells();
        let bad_number = cells.replacen("0.0625", "abc", 1);
        let negative = cells.replacen("0.0625", "-0.1", 1);
        let csv = format!(
            "{HEADER}\nPeru,{cells}\n,{cells}\nChile,{bad_number}\nBolivia,{negative}\nPeru,{cells}\n"
        );
        let file = write_csv(&csv);

        let ds = read_dataset(file.path()).unwrap();
        assert_eq!(ds.countries(), ["Peru"]);

        let issues = ds.row_issues();
        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0].line, 3);
        assert_eq!(issues[0].country, None);
        assert_eq!(issues[1].country.as_deref(), Some("Chile"));
        assert!(issues[1].message.contains("ESTJ: invalid number 'abc'"), "{}", issues[1].message);
        assert!(issues[2].message.contains("negative"), "{}", issues[2].message);
        assert!(issues[3].message.contains("duplicate country"), "{}", issues[3].message);
    }

    #[test]
    fn no_valid_rows_is_empty_source() {
        let file = write_csv(&format!("{HEADER}\n"));
        assert!(matches!(
            read_dataset(file.path()),
            Err(DataError::EmptySource { .. })
        ));

        let outcome = load_dataset(file.path());
        assert!(outcome.dataset.is_fallback());
    }
}
