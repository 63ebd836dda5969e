// Dataset load errors
use std::path::PathBuf;
use thiserror::Error;

/// Broad class of a load failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetErrorKind {
    /// Source missing, unreadable or not valid CSV
    DataUnavailable,
    /// A required column, date or amount could not be read
    Parse,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset unavailable at {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not valid {encoding} text")]
    InvalidEncoding { encoding: &'static str },

    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid {column} '{value}', expected month/day/year")]
    InvalidDate {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: invalid {column} amount '{value}'")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl DatasetError {
    pub fn kind(&self) -> DatasetErrorKind {
        match self {
            DatasetError::Unreadable { .. }
            | DatasetError::InvalidEncoding { .. }
            | DatasetError::Malformed(_) => DatasetErrorKind::DataUnavailable,
            DatasetError::MissingColumn(_)
            | DatasetError::InvalidDate { .. }
            | DatasetError::InvalidAmount { .. } => DatasetErrorKind::Parse,
        }
    }
}
