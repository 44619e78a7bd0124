use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::service::notice::Notice;
use crate::types::Feature;

#[derive(Debug, ThisError)]
pub enum GatehouseError {
    #[error("No account found; register first")]
    AccountNotFound,

    #[error("Account is not approved yet")]
    NotApproved,

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Stored value under `{key}` is corrupt: {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("The {0} feature is disabled")]
    FeatureDisabled(Feature),

    #[error("{requested} files submitted; at most {max} allowed")]
    UploadLimitExceeded { requested: usize, max: u32 },

    #[error("Missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("Row {row}: unrecognised date `{value}`")]
    InvalidDate { row: usize, value: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl GatehouseError {
    /// The notice shown to the user for this error, if it is one the user can act on.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            GatehouseError::AccountNotFound => Some(Notice::RegisterFirst),
            GatehouseError::NotApproved => Some(Notice::AwaitingApproval),
            GatehouseError::Unauthenticated => Some(Notice::LoginRequired),
            GatehouseError::FeatureDisabled(feature) => Some(Notice::FeatureDisabled(*feature)),
            GatehouseError::UploadLimitExceeded { .. } => Some(Notice::TooManyUploads),
            GatehouseError::CorruptRecord { .. }
            | GatehouseError::MissingColumn(_)
            | GatehouseError::InvalidDate { .. }
            | GatehouseError::UnsupportedFormat(_)
            | GatehouseError::Csv(_)
            | GatehouseError::Io(_)
            | GatehouseError::Json(_)
            | GatehouseError::DatabaseError(_) => None,
        }
    }
}
