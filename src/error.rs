//! Error types.
//!
//! `AppError` is what the binary reports: a message plus the process exit code.
//! `DataError` covers dataset and analysis failures and converts into `AppError`.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::MbtiType;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Dataset and analysis errors.
///
/// The first three variants never reach callers of the loader: they are
/// recovered by switching to the fallback table and kept as the fallback reason.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Input file missing or unreadable.
    #[error("data source '{path}' is unavailable: {message}")]
    SourceUnavailable { path: PathBuf, message: String },

    /// Required columns missing from the input header.
    #[error("data source '{path}' is missing required columns: {}", .missing.join(", "))]
    SchemaInvalid { path: PathBuf, missing: Vec<String> },

    /// Header was fine but no row survived validation.
    #[error("data source '{path}' contains no usable country rows")]
    EmptySource { path: PathBuf },

    /// A row was built without one of the 16 type codes.
    #[error("row for '{country}' has no value for type {code}")]
    MissingTypeCode { country: String, code: MbtiType },

    #[error("'{code}' is not a valid MBTI type code")]
    InvalidTypeCode { code: String },

    #[error("unknown country '{country}'")]
    UnknownCountry { country: String },

    #[error("gradient palette must contain at least one color")]
    EmptyPalette,
}

impl DataError {
    /// Exit code used when this error terminates the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            DataError::SourceUnavailable { .. }
            | DataError::SchemaInvalid { .. }
            | DataError::InvalidTypeCode { .. }
            | DataError::UnknownCountry { .. } => 2,
            DataError::EmptySource { .. } => 3,
            DataError::MissingTypeCode { .. } | DataError::EmptyPalette => 4,
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_missing_columns() {
        let err = DataError::SchemaInvalid {
            path: PathBuf::from("x.csv"),
            missing: vec!["ESTJ".to_string(), "INFP".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "data source 'x.csv' is missing required columns: ESTJ, INFP"
        );
    }

    #[test]
    fn data_error_maps_to_exit_code() {
        let app: AppError = DataError::UnknownCountry {
            country: "Atlantis".to_string(),
        }
        .into();
        assert_eq!(app.exit_code(), 2);
        assert_eq!(app.message(), "unknown country 'Atlantis'");

        let app: AppError = DataError::EmptyPalette.into();
        assert_eq!(app.exit_code(), 4);
    }
}
