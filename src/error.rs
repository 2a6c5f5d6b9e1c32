use thiserror::Error;

/// Failures surfaced by the resource client.
///
/// View commands catch these, log them, and fall back to an empty
/// rendering; they are never allowed to take a page down.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("unreadable file {path}: {source}")]
    FilePayload {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
