// Error types shared across the crate

/// Errors produced while talking to the backend or setting up the inspector
#[derive(Debug, thiserror::Error)]
pub enum SpyError {
    /// Network-level failure (connection refused, DNS, body read)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response. Displays as the backend's `detail` string.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Local filesystem failure (log directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpyError {
    /// HTTP status for API errors, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SpyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SpyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SpyError::Decode(err.to_string())
        } else {
            SpyError::Transport(err.to_string())
        }
    }
}

impl From<config::ConfigError> for SpyError {
    fn from(err: config::ConfigError) -> Self {
        SpyError::Config(err.to_string())
    }
}

pub type SpyResult<T> = std::result::Result<T, SpyError>;
