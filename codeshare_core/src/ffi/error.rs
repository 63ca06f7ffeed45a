use thiserror::Error;

use crate::Error;

/// Errors surfaced through the `UniFFI` bindings.
///
/// Each variant keeps the full message of the core error so hosts can show
/// it verbatim, e.g. the remotes examined when no workspace matched.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A link segment could not be decoded.
    #[error("{message}")]
    Decode {
        /// Rendered error.
        message: String,
    },
    /// Repository has no remotes.
    #[error("{message}")]
    NoRemotes {
        /// Rendered error.
        message: String,
    },
    /// No workspace remote matches the link.
    #[error("{message}")]
    NoMatchingWorkspace {
        /// Rendered error, including the examined remotes.
        message: String,
    },
    /// Activation URI is missing parameters or malformed.
    #[error("{message}")]
    InvalidLink {
        /// Rendered error.
        message: String,
    },
    /// Path is not inside a usable git repository.
    #[error("{message}")]
    NotARepository {
        /// Rendered error.
        message: String,
    },
    /// HEAD is detached or unborn.
    #[error("{message}")]
    NoBranch {
        /// Rendered error.
        message: String,
    },
    /// Nothing was selected.
    #[error("{message}")]
    EmptySelection {
        /// Rendered error.
        message: String,
    },
    /// Selection range is unusable.
    #[error("{message}")]
    InvalidSelection {
        /// Rendered error.
        message: String,
    },
    /// Configuration value is unusable.
    #[error("{message}")]
    InvalidConfig {
        /// Rendered error.
        message: String,
    },
    /// Snippet store failed.
    #[error("{message}")]
    Store {
        /// Rendered error.
        message: String,
    },
    /// Underlying git operation failed.
    #[error("{message}")]
    Git {
        /// Rendered error.
        message: String,
    },
    /// Filesystem interaction failed.
    #[error("{message}")]
    Io {
        /// Rendered error.
        message: String,
    },
}

impl From<Error> for CoreError {
    fn from(error: Error) -> Self {
        let message = error.to_string();
        match error {
            Error::Decode(_) => Self::Decode { message },
            Error::NoRemotes => Self::NoRemotes { message },
            Error::NoMatchingWorkspace { .. } => Self::NoMatchingWorkspace { message },
            Error::InvalidLink { .. } => Self::InvalidLink { message },
            Error::NotARepository { .. }
            | Error::BareRepository { .. }
            | Error::OutsideRepository { .. } => Self::NotARepository { message },
            Error::NoBranch { .. } => Self::NoBranch { message },
            Error::EmptySelection => Self::EmptySelection { message },
            Error::InvalidSelection { .. } => Self::InvalidSelection { message },
            Error::InvalidConfig { .. } => Self::InvalidConfig { message },
            Error::Store { .. } => Self::Store { message },
            Error::Git { .. } => Self::Git { message },
            Error::Io { .. } => Self::Io { message },
        }
    }
}

impl From<crate::DecodeError> for CoreError {
    fn from(error: crate::DecodeError) -> Self {
        Error::from(error).into()
    }
}
