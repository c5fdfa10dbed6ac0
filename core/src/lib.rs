//! Persistence and validation core for the to-do service.
//!
//! # Overview
//! Owns everything below the HTTP layer: the `Todo` model, the SQLite-backed
//! storage accessor, the request-payload validators, and the typed queries
//! the handlers issue. Nothing here is async or knows about HTTP.
//!
//! # Design
//! - `Storage` wraps a single `rusqlite::Connection` behind a mutex and
//!   exposes only `execute` and `query` over positional parameters.
//! - Validators turn an unknown-shape JSON object into `NewTodo` /
//!   `TodoPatch` or a `ValidationError` carrying the client-facing message.
//! - `todos` is the only place that knows the table's SQL.

pub mod error;
pub mod storage;
pub mod todos;
pub mod types;
pub mod validate;

pub use error::{StorageError, ValidationError};
pub use storage::{ExecOutcome, Row, Storage};
pub use todos::{TodoField, UpdateStatement};
pub use types::{
    FailureEnvelope, ItemEnvelope, ListEnvelope, MessageEnvelope, NewTodo, Payload, Todo,
    TodoPatch,
};
pub use validate::{validate_create, validate_update};
