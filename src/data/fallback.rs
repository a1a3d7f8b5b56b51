//! Built-in sample table used when the CSV source cannot be used.
//!
//! The numbers are illustrative only. Their raw row sums are not 1.0, so every
//! row is renormalized by its own total before use.

use crate::domain::{CountryProportions, TYPE_COUNT};

use super::dataset::{Dataset, DatasetSource};

/// Raw illustrative rows, values in canonical column order
/// (ESTJ, ESTP, ESFJ, ESFP, ENTJ, ENTP, ENFJ, ENFP, ISTJ, ISTP, ISFJ, ISFP, INTJ, INTP, INFJ, INFP).
pub const FALLBACK_COUNTRIES: [(&str, [f64; TYPE_COUNT]); 5] = [
    (
        "South Korea",
        [0.10, 0.05, 0.15, 0.06, 0.03, 0.05, 0.04, 0.08, 0.07, 0.05, 0.09, 0.06, 0.03, 0.05, 0.04, 0.05],
    ),
    (
        "United States",
        [0.08, 0.06, 0.12, 0.07, 0.04, 0.06, 0.05, 0.10, 0.09, 0.06, 0.11, 0.08, 0.04, 0.06, 0.05, 0.03],
    ),
    (
        "Japan",
        [0.05, 0.04, 0.08, 0.05, 0.03, 0.05, 0.04, 0.07, 0.10, 0.08, 0.12, 0.09, 0.05, 0.07, 0.06, 0.02],
    ),
    (
        "Germany",
        [0.09, 0.05, 0.11, 0.06, 0.05, 0.07, 0.06, 0.09, 0.08, 0.04, 0.10, 0.07, 0.03, 0.05, 0.04, 0.01],
    ),
    (
        "Brazil",
        [0.07, 0.06, 0.13, 0.08, 0.03, 0.06, 0.05, 0.11, 0.06, 0.05, 0.09, 0.06, 0.04, 0.06, 0.05, 0.02],
    ),
];

/// The fallback dataset, rows renormalized to sum to 1.0.
pub fn fallback_dataset() -> Dataset {
    let rows = FALLBACK_COUNTRIES
        .iter()
        .map(|(country, values)| CountryProportions::new(*country, *values).renormalized())
        .collect();
    Dataset::new(rows, DatasetSource::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_rows_do_not_sum_to_one() {
        // Keeps the renormalization test meaningful.
        let off = FALLBACK_COUNTRIES
            .iter()
            .filter(|(_, v)| (v.iter().sum::<f64>() - 1.0).abs() > 1e-6)
            .count();
        assert!(off > 0);
    }

    #[test]
    fn fallback_rows_sum_to_one() {
        let ds = fallback_dataset();
        assert_eq!(ds.len(), FALLBACK_COUNTRIES.len());
        assert!(ds.is_fallback());
        for row in ds.rows() {
            assert!((row.total() - 1.0).abs() < 1e-12, "{}: {}", row.country, row.total());
        }
    }

    #[test]
    fn fallback_contains_preferred_default() {
        let ds = fallback_dataset();
        assert_eq!(
            ds.default_country_preferring(crate::domain::DEFAULT_PREFERRED_COUNTRY),
            Some("South Korea")
        );
        assert_eq!(ds.default_country(), Some("Brazil"));
    }
}
