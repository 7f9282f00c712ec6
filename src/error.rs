//! Error types for account operations and their retry classification.

use std::fmt;

/// Retry eligibility of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Eligible for retry.
    Transient,
    /// Never retried; ends the retry loop immediately.
    Permanent,
    /// No explicit classification. Retried like `Transient`.
    Unclassified,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        !matches!(self, ErrorKind::Permanent)
    }
}

/// Errors that can tell the retry executor whether they are worth retrying.
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

/// Marker produced when a retry loop is aborted through its cancellation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Errors returned by the accounts API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Malformed request (HTTP 400), or a request that could not be built.
    BadRequest { detail: String },
    /// Resource not found (HTTP 404). The API reports the missing id as its message.
    NotFound { resource_id: String },
    /// Failure that retrying cannot fix.
    PermanentFailure { detail: String },
    /// Any other non-2xx response.
    Api { status_code: u16, message: String },
    /// The caller cancelled the operation.
    Cancelled,
}

impl AccountError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        AccountError::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn not_found(resource_id: impl Into<String>) -> Self {
        AccountError::NotFound {
            resource_id: resource_id.into(),
        }
    }

    pub fn permanent(detail: impl Into<String>) -> Self {
        AccountError::PermanentFailure {
            detail: detail.into(),
        }
    }

    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        AccountError::Api {
            status_code,
            message: message.into(),
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.kind() == ErrorKind::Permanent
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::BadRequest { detail } => write!(f, "bad request: {}", detail),
            AccountError::NotFound { resource_id } => {
                write!(f, "resource not found with ID: {}", resource_id)
            }
            AccountError::PermanentFailure { detail } => {
                write!(f, "permanent failure: {}", detail)
            }
            AccountError::Api { message, .. } => write!(f, "{}", message),
            AccountError::Cancelled => write!(f, "{}", Cancelled),
        }
    }
}

impl std::error::Error for AccountError {}

impl Classify for AccountError {
    fn kind(&self) -> ErrorKind {
        match self {
            AccountError::PermanentFailure { .. } | AccountError::Cancelled => ErrorKind::Permanent,
            AccountError::Api { .. } => ErrorKind::Transient,
            // 400 and 404 are not excluded from retries; only explicit permanent failures are.
            AccountError::BadRequest { .. } | AccountError::NotFound { .. } => {
                ErrorKind::Unclassified
            }
        }
    }
}

impl From<Cancelled> for AccountError {
    fn from(_: Cancelled) -> Self {
        AccountError::Cancelled
    }
}
