/// Error types shared by the background coordinator and the popup client
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a host (browser) API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> HostError {
        HostError(message.into())
    }
}

/// Machine-readable discriminant carried next to the error message on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    #[default]
    Host,
    MalformedRequest,
    UnsupportedAction,
    Timeout,
    Transport,
    Config,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("unsupported action: {0}")]
    UnsupportedAction(String),

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u32,
    },

    /// The runtime messaging channel itself failed (popup side)
    #[error("no usable response from background: {0}")]
    Transport(String),

    /// A failure payload received from the background worker
    #[error("{message}")]
    Remote { kind: ErrorKind, message: String },

    #[error("invalid config: {0}")]
    Config(String),
}

impl CoordinatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoordinatorError::Host(_) => ErrorKind::Host,
            CoordinatorError::MalformedRequest(_) => ErrorKind::MalformedRequest,
            CoordinatorError::UnsupportedAction(_) => ErrorKind::UnsupportedAction,
            CoordinatorError::Timeout { .. } => ErrorKind::Timeout,
            CoordinatorError::Transport(_) => ErrorKind::Transport,
            CoordinatorError::Remote { kind, .. } => *kind,
            CoordinatorError::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoordinatorError>;
