use thiserror::Error;

/// Everything that can go wrong while loading a record set.
///
/// All variants except `Cancelled` collapse into the loader's single
/// user-visible error message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("invalid endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,
}

impl LoadError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }
}
