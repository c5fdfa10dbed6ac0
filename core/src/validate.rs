//! Request-payload validators for create and partial update.
//!
//! Both validators inspect a raw JSON object and either return the typed
//! input the handler needs or the first `ValidationError` in check order.
//! Keys other than `title`, `description` and `done` are ignored.

use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{NewTodo, Payload, TodoPatch};

/// Validate a create payload.
///
/// Check order: both fields present and non-empty, then `title` is a string,
/// then `description` is a string.
pub fn validate_create(payload: &Payload) -> Result<NewTodo, ValidationError> {
    let title = payload.get("title").filter(|v| is_truthy(v));
    let description = payload.get("description").filter(|v| is_truthy(v));
    let (Some(title), Some(description)) = (title, description) else {
        return Err(ValidationError::MissingRequiredFields);
    };
    let title = title.as_str().ok_or(ValidationError::TitleNotString)?;
    let description = description
        .as_str()
        .ok_or(ValidationError::DescriptionNotString)?;
    Ok(NewTodo {
        title: title.to_string(),
        description: description.to_string(),
    })
}

/// Validate a partial-update payload.
///
/// A key counts as present even when its value is `null`; a present key must
/// still carry the right type, so `null`, `""` and `false` are all checked.
pub fn validate_update(payload: &Payload) -> Result<TodoPatch, ValidationError> {
    let done = payload.get("done");
    let title = payload.get("title");
    let description = payload.get("description");
    if done.is_none() && title.is_none() && description.is_none() {
        return Err(ValidationError::NothingToUpdate);
    }

    let done = done
        .map(|v| v.as_bool().ok_or(ValidationError::DoneNotBoolean))
        .transpose()?;
    let title = title
        .map(|v| string_field(v, ValidationError::TitleNotString))
        .transpose()?;
    let description = description
        .map(|v| string_field(v, ValidationError::DescriptionNotString))
        .transpose()?;

    Ok(TodoPatch {
        title,
        description,
        done,
    })
}

fn string_field(value: &Value, err: ValidationError) -> Result<String, ValidationError> {
    value.as_str().map(str::to_string).ok_or(err)
}

/// JSON truthiness as a dynamically typed client would see it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
