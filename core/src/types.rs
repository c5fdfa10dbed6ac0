//! Domain types and response envelopes for the to-do API.
//!
//! # Design
//! `Todo` is both the decoded table row and the wire shape; `done` is a real
//! `bool` here and only becomes `0`/`1` at the SQL boundary in `todos`.
//! Every response body is one of the envelope structs below so handlers
//! cannot drift from the `{message, data|toDo}` shape.

use serde::{Deserialize, Serialize};

/// Unknown-shape request body as parsed from JSON.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A single to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// Validated create payload. New items always start with `done = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

/// Validated partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }

    /// Overlay the supplied fields onto `current`.
    pub fn apply_to(&self, current: &Todo) -> Todo {
        Todo {
            id: current.id,
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            done: self.done.unwrap_or(current.done),
        }
    }
}

/// `{message, data}` body used by list and get-by-id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope {
    pub message: String,
    pub data: Vec<Todo>,
}

/// `{message, toDo}` body used by create, delete and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEnvelope {
    pub message: String,
    #[serde(rename = "toDo")]
    pub to_do: Todo,
}

/// `{message}` body for 400 and 404 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
}

/// `{message, error}` body for 500 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEnvelope {
    pub message: String,
    pub error: String,
}
