//! Typed to-do queries against real SQLite databases.
//!
//! # Design
//! Most cases run against an in-memory database; the file-backed cases use a
//! temp directory to check that data and the schema survive reopening.

use todo_core::todos::{delete_todo, find_todo, insert_todo, list_todos, update_todo};
use todo_core::{NewTodo, Storage, TodoPatch};

fn storage() -> Storage {
    let storage = Storage::open_in_memory().unwrap();
    storage.initialize().unwrap();
    storage
}

fn new_todo(title: &str, description: &str) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        description: description.to_string(),
    }
}

#[test]
fn create_then_find_returns_not_done_item() {
    let storage = storage();
    let created = insert_todo(&storage, new_todo("Walk dog", "around the block")).unwrap();
    assert!(!created.done);

    let found = find_todo(&storage, created.id).unwrap().unwrap();
    assert_eq!(found, created);
}

#[test]
fn ids_are_assigned_by_the_engine() {
    let storage = storage();
    let first = insert_todo(&storage, new_todo("a", "a")).unwrap();
    let second = insert_todo(&storage, new_todo("b", "b")).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn list_returns_every_row_in_insert_order() {
    let storage = storage();
    assert!(list_todos(&storage).unwrap().is_empty());

    insert_todo(&storage, new_todo("one", "1")).unwrap();
    insert_todo(&storage, new_todo("two", "2")).unwrap();
    let titles: Vec<String> = list_todos(&storage)
        .unwrap()
        .into_iter()
        .map(|todo| todo.title)
        .collect();
    assert_eq!(titles, vec!["one", "two"]);
}

#[test]
fn find_missing_id_is_none() {
    assert!(find_todo(&storage(), 99999).unwrap().is_none());
}

#[test]
fn delete_removes_row() {
    let storage = storage();
    let created = insert_todo(&storage, new_todo("gone", "soon")).unwrap();
    assert_eq!(delete_todo(&storage, created.id).unwrap(), 1);
    assert!(find_todo(&storage, created.id).unwrap().is_none());
    assert_eq!(delete_todo(&storage, created.id).unwrap(), 0);
}

#[test]
fn update_done_preserves_title_and_description() {
    let storage = storage();
    let created = insert_todo(&storage, new_todo("keep", "me")).unwrap();
    let patch = TodoPatch {
        done: Some(true),
        ..TodoPatch::default()
    };
    assert_eq!(update_todo(&storage, created.id, &patch).unwrap(), 1);

    let found = find_todo(&storage, created.id).unwrap().unwrap();
    assert_eq!(found.title, "keep");
    assert_eq!(found.description, "me");
    assert!(found.done);
}

#[test]
fn done_is_stored_as_integer() {
    let storage = storage();
    let created = insert_todo(&storage, new_todo("x", "y")).unwrap();
    let patch = TodoPatch {
        done: Some(true),
        ..TodoPatch::default()
    };
    update_todo(&storage, created.id, &patch).unwrap();

    let rows = storage.query("SELECT done FROM todos", &[]).unwrap();
    assert_eq!(rows[0]["done"], rusqlite::types::Value::Integer(1));
}

#[test]
fn update_title_only_leaves_done_untouched() {
    let storage = storage();
    let created = insert_todo(&storage, new_todo("old", "desc")).unwrap();
    let done = TodoPatch {
        done: Some(true),
        ..TodoPatch::default()
    };
    update_todo(&storage, created.id, &done).unwrap();
    let retitle = TodoPatch {
        title: Some("new".to_string()),
        ..TodoPatch::default()
    };
    update_todo(&storage, created.id, &retitle).unwrap();

    let found = find_todo(&storage, created.id).unwrap().unwrap();
    assert_eq!(found.title, "new");
    assert!(found.done);
}

#[test]
fn update_missing_id_touches_nothing() {
    let patch = TodoPatch {
        title: Some("nope".to_string()),
        ..TodoPatch::default()
    };
    assert_eq!(update_todo(&storage(), 404, &patch).unwrap(), 0);
}

#[test]
fn query_against_missing_table_fails() {
    let storage = Storage::open_in_memory().unwrap();
    assert!(list_todos(&storage).is_err());
}

#[test]
fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.sqlite");

    let id = {
        let storage = Storage::open(&path).unwrap();
        storage.initialize().unwrap();
        insert_todo(&storage, new_todo("durable", "on disk")).unwrap().id
    };

    let storage = Storage::open(&path).unwrap();
    storage.initialize().unwrap();
    let found = find_todo(&storage, id).unwrap().unwrap();
    assert_eq!(found.title, "durable");
}

#[test]
fn storage_is_shareable_across_threads() {
    let storage = std::sync::Arc::new(storage());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let storage = storage.clone();
            std::thread::spawn(move || {
                insert_todo(&storage, new_todo(&format!("t{n}"), "d")).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(list_todos(&storage).unwrap().len(), 4);
}
