//! Resource handlers for the five to-do routes.
//!
//! # Design
//! Every handler follows the same shape: parse and validate the body (when
//! there is one), parse the id, run storage work on the blocking pool, then
//! wrap the result in an envelope. Delete and update look the row up first
//! and write second with no transaction around the pair, so a concurrent
//! delete can land in between; the write then simply affects zero rows.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;
use todo_core::todos;
use todo_core::{
    validate_create, validate_update, ItemEnvelope, ListEnvelope, Payload, Storage, StorageError,
};

use crate::error::{ApiError, Operation};
use crate::Db;

pub async fn list_todos(State(db): State<Db>) -> Result<Json<ListEnvelope>, ApiError> {
    let data = blocking(&db, Operation::List, todos::list_todos).await?;
    Ok(Json(ListEnvelope {
        message: Operation::List.success_message().to_string(),
        data,
    }))
}

pub async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<ListEnvelope>, ApiError> {
    let id = parse_id(&id)?;
    let todo = blocking(&db, Operation::Get, move |storage| {
        todos::find_todo(storage, id)
    })
    .await?
    .ok_or(ApiError::NotFound)?;
    Ok(Json(ListEnvelope {
        message: Operation::Get.success_message().to_string(),
        data: vec![todo],
    }))
}

pub async fn create_todo(
    State(db): State<Db>,
    body: Bytes,
) -> Result<Json<ItemEnvelope>, ApiError> {
    let input = validate_create(&parse_payload(&body)?)?;
    let to_do = blocking(&db, Operation::Create, move |storage| {
        todos::insert_todo(storage, input)
    })
    .await?;
    tracing::debug!(id = to_do.id, "created to-do");
    Ok(Json(ItemEnvelope {
        message: Operation::Create.success_message().to_string(),
        to_do,
    }))
}

pub async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<ItemEnvelope>, ApiError> {
    let id = parse_id(&id)?;
    let to_do = blocking(&db, Operation::Delete, move |storage| {
        let Some(existing) = todos::find_todo(storage, id)? else {
            return Ok(None);
        };
        todos::delete_todo(storage, id)?;
        Ok(Some(existing))
    })
    .await?
    .ok_or(ApiError::NotFound)?;
    tracing::debug!(id, "deleted to-do");
    Ok(Json(ItemEnvelope {
        message: Operation::Delete.success_message().to_string(),
        to_do,
    }))
}

pub async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ItemEnvelope>, ApiError> {
    let patch = validate_update(&parse_payload(&body)?)?;
    let id = parse_id(&id)?;
    let to_do = blocking(&db, Operation::Update, move |storage| {
        let Some(existing) = todos::find_todo(storage, id)? else {
            return Ok(None);
        };
        todos::update_todo(storage, id, &patch)?;
        Ok(Some(patch.apply_to(&existing)))
    })
    .await?
    .ok_or(ApiError::NotFound)?;
    tracing::debug!(id, "updated to-do");
    Ok(Json(ItemEnvelope {
        message: Operation::Update.success_message().to_string(),
        to_do,
    }))
}

/// Run `work` against storage on the blocking pool.
async fn blocking<T, F>(db: &Db, operation: Operation, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&Storage) -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    let storage = Arc::clone(db);
    tokio::task::spawn_blocking(move || work(&storage))
        .await
        .map_err(|err| ApiError::storage(operation, err))?
        .map_err(|err| ApiError::storage(operation, err))
}

/// Ids that are not integers cannot match any row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// An empty body or a non-object JSON value reads as an empty payload.
fn parse_payload(body: &[u8]) -> Result<Payload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Payload::new()),
        Err(_) => Err(ApiError::MalformedBody),
    }
}
