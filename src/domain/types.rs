//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation and ranking
//! - exported to JSON/CSV
//! - rendered by the CLI reports and the TUI

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::DataError;

/// Number of MBTI type codes (and proportion columns per country).
pub const TYPE_COUNT: usize = 16;

/// Number of dichotomy axes.
pub const AXIS_COUNT: usize = 4;

/// Data file looked up in the working directory when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "countriesMBTI_16types.csv";

/// Country preselected on the axis page when the dataset contains it.
pub const DEFAULT_PREFERRED_COUNTRY: &str = "South Korea";

/// One of the 16 MBTI type codes.
///
/// Variant order is the canonical column order of the input file, which is
/// also the tie-break order used when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MbtiType {
    Estj,
    Estp,
    Esfj,
    Esfp,
    Entj,
    Entp,
    Enfj,
    Enfp,
    Istj,
    Istp,
    Isfj,
    Isfp,
    Intj,
    Intp,
    Infj,
    Infp,
}

/// Pole membership of every type, indexed by `MbtiType as usize` and then by `Axis as usize`.
const POLE_TABLE: [[Pole; AXIS_COUNT]; TYPE_COUNT] = {
    use Pole::{E, F, I, J, N, P, S, T};
    [
        [E, S, T, J],
        [E, S, T, P],
        [E, S, F, J],
        [E, S, F, P],
        [E, N, T, J],
        [E, N, T, P],
        [E, N, F, J],
        [E, N, F, P],
        [I, S, T, J],
        [I, S, T, P],
        [I, S, F, J],
        [I, S, F, P],
        [I, N, T, J],
        [I, N, T, P],
        [I, N, F, J],
        [I, N, F, P],
    ]
};

impl MbtiType {
    /// All codes in canonical column order.
    pub const ALL: [MbtiType; TYPE_COUNT] = [
        MbtiType::Estj,
        MbtiType::Estp,
        MbtiType::Esfj,
        MbtiType::Esfp,
        MbtiType::Entj,
        MbtiType::Entp,
        MbtiType::Enfj,
        MbtiType::Enfp,
        MbtiType::Istj,
        MbtiType::Istp,
        MbtiType::Isfj,
        MbtiType::Isfp,
        MbtiType::Intj,
        MbtiType::Intp,
        MbtiType::Infj,
        MbtiType::Infp,
    ];

    pub fn code(self) -> &'static str {
        match self {
            MbtiType::Estj => "ESTJ",
            MbtiType::Estp => "ESTP",
            MbtiType::Esfj => "ESFJ",
            MbtiType::Esfp => "ESFP",
            MbtiType::Entj => "ENTJ",
            MbtiType::Entp => "ENTP",
            MbtiType::Enfj => "ENFJ",
            MbtiType::Enfp => "ENFP",
            MbtiType::Istj => "ISTJ",
            MbtiType::Istp => "ISTP",
            MbtiType::Isfj => "ISFJ",
            MbtiType::Isfp => "ISFP",
            MbtiType::Intj => "INTJ",
            MbtiType::Intp => "INTP",
            MbtiType::Infj => "INFJ",
            MbtiType::Infp => "INFP",
        }
    }

    /// Position in the canonical column order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The four poles this type belongs to, in axis order (E/I, S/N, T/F, J/P).
    pub fn poles(self) -> [Pole; AXIS_COUNT] {
        POLE_TABLE[self.index()]
    }

    /// The pole this type sits on for a single axis.
    pub fn pole_on(self, axis: Axis) -> Pole {
        self.poles()[axis.index()]
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MbtiType {
    type Err = DataError;

    /// Parse a type code, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        MbtiType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DataError::InvalidTypeCode {
                code: trimmed.to_string(),
            })
    }
}

/// One of the four binary personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "E/I")]
    Ei,
    #[serde(rename = "S/N")]
    Sn,
    #[serde(rename = "T/F")]
    Tf,
    #[serde(rename = "J/P")]
    Jp,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [Axis::Ei, Axis::Sn, Axis::Tf, Axis::Jp];

    pub fn index(self) -> usize {
        self as usize
    }

    /// (first, second) pole; the first pole is the one listed first in the label.
    pub fn poles(self) -> (Pole, Pole) {
        match self {
            Axis::Ei => (Pole::E, Pole::I),
            Axis::Sn => (Pole::S, Pole::N),
            Axis::Tf => (Pole::T, Pole::F),
            Axis::Jp => (Pole::J, Pole::P),
        }
    }

    /// Short label, e.g. `E/I`.
    pub fn label(self) -> &'static str {
        match self {
            Axis::Ei => "E/I",
            Axis::Sn => "S/N",
            Axis::Tf => "T/F",
            Axis::Jp => "J/P",
        }
    }

    /// Name of the dimension the axis measures.
    pub fn theme(self) -> &'static str {
        match self {
            Axis::Ei => "Energy",
            Axis::Sn => "Perception",
            Axis::Tf => "Judgement",
            Axis::Jp => "Lifestyle",
        }
    }

    /// Chart title, e.g. `Energy (E vs I)`.
    pub fn title(self) -> String {
        let (a, b) = self.poles();
        format!("{} ({} vs {})", self.theme(), a.letter(), b.letter())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One side of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pole {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Pole {
    pub fn letter(self) -> char {
        match self {
            Pole::E => 'E',
            Pole::I => 'I',
            Pole::S => 'S',
            Pole::N => 'N',
            Pole::T => 'T',
            Pole::F => 'F',
            Pole::J => 'J',
            Pole::P => 'P',
        }
    }

    pub fn trait_name(self) -> &'static str {
        match self {
            Pole::E => "Extraversion",
            Pole::I => "Introversion",
            Pole::S => "Sensing",
            Pole::N => "Intuition",
            Pole::T => "Thinking",
            Pole::F => "Feeling",
            Pole::J => "Judging",
            Pole::P => "Perceiving",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Pole::E | Pole::I => Axis::Ei,
            Pole::S | Pole::N => Axis::Sn,
            Pole::T | Pole::F => Axis::Tf,
            Pole::J | Pole::P => Axis::Jp,
        }
    }

    /// Trait name with the letter, e.g. `Extraversion (E)`.
    pub fn display_name(self) -> String {
        format!("{} ({})", self.trait_name(), self.letter())
    }
}

/// Per-country MBTI proportions.
///
/// Values are stored in canonical column order and are expected (but not
/// required) to sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryProportions {
    pub country: String,
    pub values: [f64; TYPE_COUNT],
}

impl CountryProportions {
    pub fn new(country: impl Into<String>, values: [f64; TYPE_COUNT]) -> Self {
        Self {
            country: country.into(),
            values,
        }
    }

    /// Build a row from named columns.
    ///
    /// Later duplicates of a code overwrite earlier ones. Fails with
    /// `MissingTypeCode` for the first code (in column order) without a value.
    pub fn from_named<I>(country: impl Into<String>, columns: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (MbtiType, f64)>,
    {
        let country = country.into();
        let mut slots = [None; TYPE_COUNT];
        for (code, value) in columns {
            slots[code.index()] = Some(value);
        }

        let mut values = [0.0; TYPE_COUNT];
        for code in MbtiType::ALL {
            values[code.index()] = slots[code.index()].ok_or_else(|| DataError::MissingTypeCode {
                country: country.clone(),
                code,
            })?;
        }

        Ok(Self { country, values })
    }

    pub fn value(&self, code: MbtiType) -> f64 {
        self.values[code.index()]
    }

    /// `(code, value)` pairs in column order.
    pub fn entries(&self) -> impl Iterator<Item = (MbtiType, f64)> + '_ {
        MbtiType::ALL.into_iter().map(|code| (code, self.value(code)))
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Divide every value by the row total so the row sums to 1.0.
    ///
    /// Rows with a non-positive or non-finite total are returned unchanged.
    pub fn renormalized(&self) -> Self {
        let total = self.total();
        if !(total.is_finite() && total > 0.0) {
            return self.clone();
        }
        let mut values = self.values;
        for v in &mut values {
            *v /= total;
        }
        Self {
            country: self.country.clone(),
            values,
        }
    }
}

/// Aggregated proportions for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisResult {
    pub axis: Axis,
    /// Sum over types on the first pole (E, S, T, J).
    pub first: f64,
    /// Sum over types on the second pole (I, N, F, P).
    pub second: f64,
}

impl AxisResult {
    pub fn first_pole(&self) -> Pole {
        self.axis.poles().0
    }

    pub fn second_pole(&self) -> Pole {
        self.axis.poles().1
    }

    pub fn value_of(&self, pole: Pole) -> Option<f64> {
        if pole == self.first_pole() {
            Some(self.first)
        } else if pole == self.second_pole() {
            Some(self.second)
        } else {
            None
        }
    }

    pub fn total(&self) -> f64 {
        self.first + self.second
    }

    /// Which pole leads and by how much (absolute difference, as a fraction).
    pub fn dominance(&self) -> Dominance {
        let margin = (self.first - self.second).abs();
        if self.first > self.second {
            Dominance::Leading {
                pole: self.first_pole(),
                margin,
            }
        } else if self.second > self.first {
            Dominance::Leading {
                pole: self.second_pole(),
                margin,
            }
        } else {
            Dominance::Balanced
        }
    }
}

/// Outcome of comparing the two poles of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Dominance {
    Leading { pole: Pole, margin: f64 },
    Balanced,
}

/// A type code with its proportion and 1-based rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub code: MbtiType,
    pub value: f64,
}

/// A 24-bit color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Perceived lightness proxy (sum of channels); larger is lighter.
    pub fn brightness(self) -> u16 {
        u16::from(self.0) + u16::from(self.1) + u16::from(self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolved runtime settings shared by the CLI and the TUI.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Primary CSV source.
    pub data_path: PathBuf,
    /// Country preselected on the axis page if present.
    pub preferred_country: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            preferred_country: DEFAULT_PREFERRED_COUNTRY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pole_table_matches_code_letters() {
        for code in MbtiType::ALL {
            let letters: Vec<char> = code.code().chars().collect();
            for axis in Axis::ALL {
                assert_eq!(code.pole_on(axis).letter(), letters[axis.index()], "{code} on {axis}");
                assert_eq!(code.pole_on(axis).axis(), axis);
            }
        }
    }

    #[test]
    fn every_axis_splits_eight_eight() {
        for axis in Axis::ALL {
            let (first, _) = axis.poles();
            let n_first = MbtiType::ALL.iter().filter(|t| t.pole_on(axis) == first).count();
            assert_eq!(n_first, 8, "{axis}");
        }
    }

    #[test]
    fn parse_type_code_ignores_case() {
        assert_eq!(" intj ".parse::<MbtiType>().unwrap(), MbtiType::Intj);
        assert!(matches!(
            "XXXX".parse::<MbtiType>(),
            Err(DataError::InvalidTypeCode { .. })
        ));
    }

    #[test]
    fn from_named_reports_missing_code() {
        let columns = MbtiType::ALL
            .into_iter()
            .filter(|t| *t != MbtiType::Enfp)
            .map(|t| (t, 0.1));
        let err = CountryProportions::from_named("X", columns).unwrap_err();
        assert_eq!(
            err,
            DataError::MissingTypeCode {
                country: "X".to_string(),
                code: MbtiType::Enfp,
            }
        );
    }

    #[test]
    fn renormalized_sums_to_one() {
        let row = CountryProportions::new("X", [2.0; TYPE_COUNT]);
        let norm = row.renormalized();
        assert!((norm.total() - 1.0).abs() < 1e-12);
        assert!((norm.value(MbtiType::Istj) - 1.0 / 16.0).abs() < 1e-12);

        let zero = CountryProportions::new("Z", [0.0; TYPE_COUNT]);
        assert_eq!(zero.renormalized(), zero);
    }

    #[test]
    fn dominance_and_ties() {
        let r = AxisResult { axis: Axis::Tf, first: 0.4, second: 0.6 };
        match r.dominance() {
            Dominance::Leading { pole, margin } => {
                assert_eq!(pole, Pole::F);
                assert!((margin - 0.2).abs() < 1e-12);
            }
            Dominance::Balanced => panic!("expected a leading pole"),
        }

        let tie = AxisResult { axis: Axis::Ei, first: 0.5, second: 0.5 };
        assert_eq!(tie.dominance(), Dominance::Balanced);
    }

    #[test]
    fn rgb_hex_roundtrip_display() {
        assert_eq!(Rgb::from_hex(0xFF0000), Rgb(255, 0, 0));
        assert_eq!(Rgb(103, 0, 13).to_string(), "#67000D");
    }
}
