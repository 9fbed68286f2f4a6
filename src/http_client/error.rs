//! Asset fetch errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Why an animation could not be loaded.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status.
    #[error("server returned {0}")]
    Status(StatusCode),
    /// DNS, connect, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// 2xx response whose body is not JSON.
    #[error("body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}
