pub mod evaluation;
pub mod migrate;
pub mod storage;
pub mod types;

pub use evaluation::{parse_created_at, EvaluationForm, CREATED_AT_FORMAT};
pub use migrate::{migrate_legacy, MigrationReport, LEGACY_HISTORY_KEY};
pub use storage::{append, history_key, latest, list, load};
pub use types::{EvaluationRecord, PatientStatus, Shift, Unit};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// No evaluation has been stored for the facility yet
    NoData,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NoData => write!(f, "No previous evaluations for this facility"),
        }
    }
}

impl std::error::Error for HistoryError {}
