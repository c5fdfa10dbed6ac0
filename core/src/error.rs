//! Error types for storage access and payload validation.
//!
//! # Design
//! `ValidationError` variants carry no data; their `Display` text is the
//! exact message returned to the client. `StorageError` wraps whatever the
//! engine reported so the raw detail can be echoed in a 500 body.

use thiserror::Error;

/// A request payload was rejected before reaching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Create payload is missing `title` or `description` (or one is falsy).
    #[error("Both title and description are required fields.")]
    MissingRequiredFields,

    /// Update payload names none of the updatable fields.
    #[error("At least one field should be updated.")]
    NothingToUpdate,

    #[error("title expected to be string.")]
    TitleNotString,

    #[error("description expected to be string.")]
    DescriptionNotString,

    #[error("done expected to be boolean.")]
    DoneNotBoolean,
}

/// Failures raised by the storage accessor.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The engine rejected the statement or failed to run it.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// A previous holder of the connection panicked mid-statement.
    #[error("database connection lock poisoned")]
    Poisoned,
}
