//! Error types for the troopdir ecosystem.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in troopdir operations.
#[derive(Error, Debug)]
pub enum TroopDirError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A recurrence rule field failed validation. Reports the field and
    /// the rejected value so form errors are actionable.
    #[error("Invalid recurrence rule: {field} {value:?} is not valid")]
    InvalidRule { field: &'static str, value: String },

    #[error("Invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A non-rule form field failed validation (team code, status, email).
    #[error("Invalid {field}: {value:?}")]
    Input { field: &'static str, value: String },

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// Some but not all events of a generated series were written.
    /// The store is left with a partial series; nothing is rolled back.
    #[error("Wrote {written} of {requested} events; failed dates: {}", failed_dates(.failed))]
    PartialPersistence {
        requested: usize,
        written: usize,
        failed: Vec<(NaiveDate, String)>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn failed_dates(failed: &[(NaiveDate, String)]) -> String {
    failed
        .iter()
        .map(|(date, _)| date.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for troopdir operations.
pub type TroopDirResult<T> = Result<T, TroopDirError>;
