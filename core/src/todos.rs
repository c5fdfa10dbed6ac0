//! Typed queries over the `todos` table.
//!
//! # Design
//! Every SQL string the service runs lives here. Reads decode rows through
//! `decode_row`, which is the single place `done` turns from `0`/`1` into a
//! `bool`. Partial updates go through `UpdateStatement`, which only ever
//! names columns from the closed `TodoField` set and binds every value.

use rusqlite::types::Value;

use crate::error::StorageError;
use crate::storage::{Row, Storage};
use crate::types::{NewTodo, Todo, TodoPatch};

const SELECT_ALL: &str = "SELECT id, title, description, done FROM todos";
const SELECT_BY_ID: &str = "SELECT id, title, description, done FROM todos WHERE id = ?";
const INSERT: &str = "INSERT INTO todos (title, description) VALUES (?, ?)";
const DELETE_BY_ID: &str = "DELETE FROM todos WHERE id = ?";

/// Columns a partial update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoField {
    Title,
    Description,
    Done,
}

impl TodoField {
    pub fn column(self) -> &'static str {
        match self {
            TodoField::Title => "title",
            TodoField::Description => "description",
            TodoField::Done => "done",
        }
    }
}

/// A parameterized `UPDATE todos SET ... WHERE id = ?` for the supplied fields.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    fields: Vec<TodoField>,
    params: Vec<Value>,
}

impl UpdateStatement {
    /// Build the statement for `patch`. Returns `None` when nothing is set.
    pub fn for_patch(id: i64, patch: &TodoPatch) -> Option<Self> {
        let mut fields = Vec::new();
        let mut params = Vec::new();
        if let Some(title) = &patch.title {
            fields.push(TodoField::Title);
            params.push(Value::Text(title.clone()));
        }
        if let Some(description) = &patch.description {
            fields.push(TodoField::Description);
            params.push(Value::Text(description.clone()));
        }
        if let Some(done) = patch.done {
            fields.push(TodoField::Done);
            params.push(Value::Integer(i64::from(done)));
        }
        if fields.is_empty() {
            return None;
        }
        params.push(Value::Integer(id));
        Some(Self { fields, params })
    }

    pub fn fields(&self) -> &[TodoField] {
        &self.fields
    }

    pub fn sql(&self) -> String {
        let assignments = self
            .fields
            .iter()
            .map(|field| format!("{} = ?", field.column()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("UPDATE todos SET {assignments} WHERE id = ?")
    }

    /// Bound values in placeholder order, ending with the id.
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

pub fn list_todos(storage: &Storage) -> Result<Vec<Todo>, StorageError> {
    Ok(storage
        .query(SELECT_ALL, &[])?
        .iter()
        .map(decode_row)
        .collect())
}

pub fn find_todo(storage: &Storage, id: i64) -> Result<Option<Todo>, StorageError> {
    Ok(storage
        .query(SELECT_BY_ID, &[Value::Integer(id)])?
        .first()
        .map(decode_row))
}

/// Insert `new` and return it with the id the engine assigned.
pub fn insert_todo(storage: &Storage, new: NewTodo) -> Result<Todo, StorageError> {
    let outcome = storage.execute(
        INSERT,
        &[
            Value::Text(new.title.clone()),
            Value::Text(new.description.clone()),
        ],
    )?;
    Ok(Todo {
        id: outcome.last_insert_id,
        title: new.title,
        description: new.description,
        done: false,
    })
}

/// Returns the number of rows removed.
pub fn delete_todo(storage: &Storage, id: i64) -> Result<usize, StorageError> {
    Ok(storage
        .execute(DELETE_BY_ID, &[Value::Integer(id)])?
        .rows_affected)
}

/// Returns the number of rows changed; an empty patch changes nothing.
pub fn update_todo(storage: &Storage, id: i64, patch: &TodoPatch) -> Result<usize, StorageError> {
    match UpdateStatement::for_patch(id, patch) {
        Some(statement) => Ok(storage
            .execute(&statement.sql(), statement.params())?
            .rows_affected),
        None => Ok(0),
    }
}

fn decode_row(row: &Row) -> Todo {
    Todo {
        id: integer(row.get("id")),
        title: text(row.get("title")),
        description: text(row.get("description")),
        done: integer(row.get("done")) != 0,
    }
}

fn integer(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Integer(n)) => *n,
        _ => 0,
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::Text(s)) => s.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_builds_no_statement() {
        assert!(UpdateStatement::for_patch(1, &TodoPatch::default()).is_none());
    }

    #[test]
    fn statement_names_only_supplied_columns() {
        let patch = TodoPatch {
            title: None,
            description: Some("new".to_string()),
            done: Some(true),
        };
        let statement = UpdateStatement::for_patch(42, &patch).unwrap();
        assert_eq!(statement.fields(), &[TodoField::Description, TodoField::Done]);
        assert_eq!(
            statement.sql(),
            "UPDATE todos SET description = ?, done = ? WHERE id = ?"
        );
        assert_eq!(
            statement.params(),
            &[
                Value::Text("new".to_string()),
                Value::Integer(1),
                Value::Integer(42)
            ]
        );
    }

    #[test]
    fn statement_keeps_fixed_column_order() {
        let patch = TodoPatch {
            title: Some("t".to_string()),
            description: Some("d".to_string()),
            done: Some(false),
        };
        let statement = UpdateStatement::for_patch(3, &patch).unwrap();
        assert_eq!(
            statement.sql(),
            "UPDATE todos SET title = ?, description = ?, done = ? WHERE id = ?"
        );
        assert_eq!(statement.params()[2], Value::Integer(0));
    }

    #[test]
    fn decode_row_coerces_done_to_bool() {
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Integer(5));
        row.insert("title".to_string(), Value::Text("t".to_string()));
        row.insert("description".to_string(), Value::Text("d".to_string()));
        row.insert("done".to_string(), Value::Integer(1));
        assert!(decode_row(&row).done);

        row.insert("done".to_string(), Value::Null);
        assert!(!decode_row(&row).done);
    }

    #[test]
    fn decode_row_reads_non_integer_done_as_false() {
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Integer(2));
        row.insert("done".to_string(), Value::Real(1.0));
        assert!(!decode_row(&row).done);
    }

    #[test]
    fn decode_row_reads_null_text_as_empty() {
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Integer(1));
        row.insert("title".to_string(), Value::Null);
        let todo = decode_row(&row);
        assert_eq!(todo.title, "");
        assert_eq!(todo.description, "");
    }
}
