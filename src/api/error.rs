use thiserror::Error;

/// Transport failure, classified from the HTTP status or the response envelope.
///
/// `Unauthorized` is special-cased by the navigation guard: observed from any
/// call during a session it forces a full logout. Every other variant is
/// contained at the call site that produced it.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error: {0}")]
    ServerError(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response envelope: {0}")]
    Envelope(String),
}

impl TransportError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TransportError::Unauthorized(_))
    }

    /// The backend-supplied message without the classification prefix
    pub fn message(&self) -> &str {
        match self {
            TransportError::Unauthorized(msg)
            | TransportError::Forbidden(msg)
            | TransportError::NotFound(msg)
            | TransportError::ServerError(msg)
            | TransportError::Timeout(msg)
            | TransportError::Network(msg)
            | TransportError::Envelope(msg) => msg,
        }
    }

    /// Classify a failed HTTP status line
    pub fn from_status(status: reqwest::StatusCode, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        match status.as_u16() {
            401 => TransportError::Unauthorized(msg),
            403 => TransportError::Forbidden(msg),
            404 => TransportError::NotFound(msg),
            _ => TransportError::ServerError(format!("{}: {}", status.as_u16(), msg)),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_decode() {
            TransportError::Envelope(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}
