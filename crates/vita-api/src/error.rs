use http::StatusCode;

/// Failure modes of a wrapped backend call.
///
/// `Unauthorized` means the session was already cleared and navigation to
/// login triggered; callers must not try to read a body. `Cancelled` is a
/// neutral outcome, not an error to render.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized - please login again")]
    Unauthorized,

    #[error("request cancelled")]
    Cancelled,

    #[error("{detail}")]
    Api { status: StatusCode, detail: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to decode response body")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request path")]
    InvalidPath(#[from] url::ParseError),

    #[error("invalid header value")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn api(status: StatusCode, detail: impl Into<String>) -> Self {
        ApiError::Api {
            status,
            detail: detail.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// The network call itself failed; no response was received.
#[derive(Debug, thiserror::Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}
