use serde::{Deserialize, Serialize};

/// Failure of a single parse request.
///
/// Every failure path of a parse call is reported through one of these
/// variants, on the same channel used for successful results.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    #[error("Transport error: {message}")]
    Transport { message: String, timed_out: bool },

    #[error("Unexpected HTTP status: {status}")]
    Status { status: u16 },

    #[error("Failed to decode response body: {message}")]
    Decode { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// The kind of a [`ParseError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Status,
    Decode,
    Config,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Transport { .. } => ErrorKind::Transport,
            ParseError::Status { .. } => ErrorKind::Status,
            ParseError::Decode { .. } => ErrorKind::Decode,
            ParseError::Config { .. } => ErrorKind::Config,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ParseError::Transport {
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ParseError::Transport {
            message: message.into(),
            timed_out: true,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ParseError::Config {
            message: message.into(),
        }
    }

    /// True when the request was abandoned because the timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ParseError::Transport {
                timed_out: true,
                ..
            }
        )
    }
}
