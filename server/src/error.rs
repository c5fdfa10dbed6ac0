//! HTTP error mapping.
//!
//! # Design
//! Handlers return `Result<_, ApiError>` and let `IntoResponse` pick the
//! status and body. Storage failures carry the operation that failed so the
//! 500 body names it, plus the engine's own text as `error`. They are the
//! only variant logged, since everything else is a client mistake.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use todo_core::{FailureEnvelope, MessageEnvelope, StorageError, ValidationError};

use crate::config::ConfigError;

pub const NOT_FOUND_MESSAGE: &str = "To-do not found";

/// Anything that stops the server from starting. Always fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialize database: {0}")]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The five resource operations, used to pick response messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Delete,
    Update,
}

impl Operation {
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::List => "To-dos retrieved successfully",
            Operation::Get => "To-do retrieved successfully",
            Operation::Create => "To-do created successfully",
            Operation::Delete => "To-do deleted successfully",
            Operation::Update => "To-do updated successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "An error occurred while fetching the to-dos",
            Operation::Get => "An error occurred while fetching the to-do",
            Operation::Create => "An error occurred while creating the new to-do",
            Operation::Delete => "An error occurred while deleting the to-do",
            Operation::Update => "An error occurred while updating the to-do",
        }
    }
}

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload failed validation; 400 with the validator's message.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body was present but not JSON.
    #[error("Malformed JSON body.")]
    MalformedBody,

    #[error("To-do not found")]
    NotFound,

    /// Storage (or the blocking task running it) failed; 500.
    #[error("{}: {source}", .operation.failure_message())]
    Storage {
        operation: Operation,
        #[source]
        source: BoxError,
    },
}

/// Engine or task failure behind a 500.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl ApiError {
    pub fn storage(operation: Operation, err: impl Into<BoxError>) -> Self {
        ApiError::Storage {
            operation,
            source: err.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Storage { operation, source } => {
                tracing::error!(?operation, error = %source, "storage failure");
                let body = FailureEnvelope {
                    message: operation.failure_message().to_string(),
                    error: source.to_string(),
                };
                (status, Json(body)).into_response()
            }
            ApiError::NotFound => {
                let body = MessageEnvelope {
                    message: NOT_FOUND_MESSAGE.to_string(),
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = MessageEnvelope {
                    message: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
