use reqwest::StatusCode;
use thiserror::Error;

/// Per-request failure cause. Every variant collapses to a plain `Failure`
/// in the reported outcome, but stays distinguishable here for logs and tests.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("invalid URL: missing scheme or host")]
    InvalidUrl,

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status: {0}")]
    HttpStatus(StatusCode),

    #[error("not an image (content-type: {})", .0.as_deref().unwrap_or("<none>"))]
    ContentType(Option<String>),

    #[error("empty response body")]
    EmptyBody,

    #[error("failed to write file: {0}")]
    Write(#[from] std::io::Error),

    #[error("unexpected failure: {0}")]
    Unclassified(String),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DownloadError::Timeout
        } else {
            DownloadError::Transport(err.to_string())
        }
    }
}
