use crate::domain::store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Error taxonomy for board operations.
///
/// Every error is handled at the initiating caller; nothing propagates past
/// the screen that issued the action. `Unauthenticated` is swallowed by the
/// UI for like/comment taps, `Validation` becomes a localized message, and
/// `Backend` becomes a generic alert with no automatic retry.
#[derive(Debug, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => DomainError::NotFound(path),
            other => DomainError::Backend(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(err: validator::ValidationErrors) -> Self {
        DomainError::Validation(err.to_string())
    }
}
