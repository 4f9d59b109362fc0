use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

/// Failures of the fetch-and-aggregate pipeline.
///
/// None of these are retried; the first one aborts the whole run.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("GitHub API returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    /// HTTP status carried by a [`StatsError::Status`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            StatsError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// GitHub answers unauthenticated quota exhaustion with 403 or 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.status(), Some(403) | Some(429))
    }
}
