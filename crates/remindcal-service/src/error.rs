use remindcal_rfc::rfc::ical::ExpandError;
use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    ExpandError(#[from] ExpandError),

    #[error("Occurrence starting at {start} has no UID")]
    MissingUid { start: String },
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
