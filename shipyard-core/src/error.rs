//! Error types for Shipyard core.

use std::{error::Error, fmt};

/// Error type for Shipyard core operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ShipyardError {
    /// A supplied field failed validation or a required field was missing.
    InvalidArgument(String),
    /// No ship exists with the requested identifier.
    NotFound(i64),
    /// The storage collaborator failed.
    Storage(String),
}

impl ShipyardError {
    /// Build an invalid-argument error with a message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Build a storage error from any displayable failure.
    pub fn storage(err: impl fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}

impl fmt::Display for ShipyardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotFound(id) => write!(f, "ship {id} not found"),
            Self::Storage(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl Error for ShipyardError {}

/// Convenience result type for Shipyard core.
pub type Result<T> = std::result::Result<T, ShipyardError>;
