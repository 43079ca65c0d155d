use thiserror::Error;

use crate::api::models::ErrorEnvelope;

/// Failures that abort an invocation. Backend error statuses are not in
/// here; those come back as an `ErrorEnvelope` inside a successful response.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Please set BASE_URL environment variable")]
    MissingBaseUrl,

    #[error("Invalid BASE_URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("BASE_URL must use https, got {0}")]
    InsecureBaseUrl(String),

    #[error("Malformatted request - missing directive")]
    MissingDirective,

    #[error("Only support payloadVersion == 3")]
    UnsupportedPayloadVersion,

    #[error("Malformatted request - missing endpoint.scope")]
    MissingScope,

    #[error("Only support BearerToken")]
    UnsupportedScopeType,

    #[error("Authorization token is missing or invalid")]
    MissingToken,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{}", .0.message())]
    RequestFailed(ErrorEnvelope),
}

impl RelayError {
    /// The `INTERNAL_ERROR` envelope a transport failure rejects with.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            RelayError::RequestFailed(envelope) => Some(envelope),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
