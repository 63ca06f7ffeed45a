use serde::{Deserialize, Serialize};

/// Request body accepted by a snippet store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetDraft {
    /// Snippet text.
    pub code: String,
    /// Editor language identifier used for highlighting.
    pub language: String,
}

impl SnippetDraft {
    /// Construct a draft from text and language.
    #[must_use]
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }
}

/// Successful store response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareReceipt {
    /// Identifier of the stored snippet.
    pub id: String,
}

/// Error body returned by the store on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ShareFailure {
    /// Server supplied reason, when present.
    #[serde(default)]
    pub error: Option<String>,
}

/// Errors surfaced by snippet stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response.
    #[error("snippet store request failed: {message}")]
    Transport {
        /// Human-readable transport failure.
        message: String,
    },
    /// The store answered with a non-success status.
    #[error("snippet store rejected the snippet ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Reason reported by the store.
        message: String,
    },
    /// The store answered successfully but the body was unusable.
    #[error("snippet store returned an invalid response: {message}")]
    InvalidResponse {
        /// What was wrong with the body.
        message: String,
    },
}

impl StoreError {
    /// Helper to construct a transport failure from any displayable message.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Convenience result alias for snippet store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
