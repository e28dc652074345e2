use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;
use tracing::{error, warn};

use crate::providers::ProviderKind;

/// Body of every 500 response. Callers never see the underlying cause.
pub const INTERNAL_ERROR_BODY: &str = "Sorry, something went wrong";

#[derive(Debug, ThisError)]
pub enum ScoutError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("[{provider}] provider unavailable: {source}")]
    ProviderUnavailable {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("[{provider}] provider responded with status {status}")]
    ProviderError {
        provider: ProviderKind,
        status: StatusCode,
    },

    #[error("[{provider}] malformed provider response: {detail}")]
    MalformedProviderResponse {
        provider: ProviderKind,
        detail: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),
}

impl ScoutError {
    pub(crate) fn malformed(provider: ProviderKind, detail: impl Into<String>) -> Self {
        ScoutError::MalformedProviderResponse {
            provider,
            detail: detail.into(),
        }
    }

    /// The upstream this error came from, if any.
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            ScoutError::ProviderUnavailable { provider, .. }
            | ScoutError::ProviderError { provider, .. }
            | ScoutError::MalformedProviderResponse { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}

impl From<figment::Error> for ScoutError {
    fn from(e: figment::Error) -> Self {
        ScoutError::Config(Box::new(e))
    }
}

impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        match self {
            ScoutError::InvalidRequest(message) => {
                warn!(%message, "Rejected request");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            other => {
                error!(
                    error = %other,
                    provider = %other.provider().map_or("-", ProviderKind::as_str),
                    "Request failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}
