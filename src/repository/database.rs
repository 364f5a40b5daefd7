use chrono::prelude::*;
use std::sync::{Arc, Mutex};

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

struct Inner {
    todos: Vec<Todo>,
    counter: u64,
}

/// In-memory store owning all todo records. A single mutex guards both the
/// id counter and the records, so concurrent creates never collide on id and
/// readers never observe a half-written record. Handlers only ever see
/// clones; replacing the internals with a durable backend would not change
/// the method contracts.
pub struct Database {
    inner: Arc<Mutex<Inner>>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Database {
            inner: Arc::new(Mutex::new(Inner {
                todos: vec![],
                counter: 0,
            })),
        }
    }

    /// Assigns the next id and stamps both timestamps. Infallible.
    pub fn create_todo(&self, new_todo: CreateTodo) -> Todo {
        let mut inner = self.inner.lock().unwrap();
        inner.counter += 1;
        let now = Utc::now();
        let todo = Todo {
            id: inner.counter.to_string(),
            title: new_todo.title,
            description: new_todo.description,
            completed: new_todo.completed,
            created_at: now,
            updated_at: now,
        };
        inner.todos.push(todo.clone());
        todo
    }

    pub fn get_todo_by_id(&self, id: &str) -> Option<Todo> {
        let inner = self.inner.lock().unwrap();
        inner.todos.iter().find(|todo| todo.id == id).cloned()
    }

    /// All live records in insertion order (ascending numeric id).
    pub fn get_todos(&self) -> Vec<Todo> {
        let inner = self.inner.lock().unwrap();
        inner.todos.clone()
    }

    /// Overwrites only the supplied fields; `updated_at` is refreshed on
    /// every hit, even when nothing changed value. `None` if the id is
    /// unknown.
    pub fn update_todo_by_id(&self, id: &str, changes: UpdateTodo) -> Option<Todo> {
        let mut inner = self.inner.lock().unwrap();
        let todo = inner.todos.iter_mut().find(|todo| todo.id == id)?;
        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(description) = changes.description {
            todo.description = description;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();
        Some(todo.clone())
    }

    /// Returns whether the record existed. A second delete of the same id
    /// reports `false`.
    pub fn delete_todo_by_id(&self, id: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let index = inner.todos.iter().position(|todo| todo.id == id);
        match index {
            Some(index) => {
                inner.todos.remove(index);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring match on title or description. Records
    /// without a description never match on description. An empty term
    /// returns everything.
    pub fn search_todos(&self, term: &str) -> Vec<Todo> {
        if term.is_empty() {
            return self.get_todos();
        }
        let term = term.to_lowercase();
        let inner = self.inner.lock().unwrap();
        inner
            .todos
            .iter()
            .filter(|todo| {
                todo.title.to_lowercase().contains(&term)
                    || todo
                        .description
                        .as_ref()
                        .is_some_and(|description| description.to_lowercase().contains(&term))
            })
            .cloned()
            .collect()
    }

    /// `None` returns everything, otherwise only records with the given
    /// completion state.
    pub fn filter_todos(&self, completed: Option<bool>) -> Vec<Todo> {
        let inner = self.inner.lock().unwrap();
        match completed {
            None => inner.todos.clone(),
            Some(completed) => inner
                .todos
                .iter()
                .filter(|todo| todo.completed == completed)
                .cloned()
                .collect(),
        }
    }
}
