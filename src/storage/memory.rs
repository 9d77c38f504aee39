//! Process-local todo storage.

use crate::domain::{NewTodo, Todo, TodoError, TodoId, TodoPatch};
use crate::storage::TodoStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::{Mutex, RwLock};

/// Hands out strictly increasing identifiers starting at 1. Ids are never reused,
/// even after the record that held one is deleted.
#[derive(Debug)]
pub struct IdAllocator {
    next: Mutex<u64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: Mutex::new(1) }
    }

    pub async fn allocate(&self) -> u64 {
        let mut next = self.next.lock().await;
        let id = *next;
        *next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory store keyed by identifier.
///
/// Ids only ever grow, so iterating the map in key order yields insertion order.
/// All mutations happen under the write lock; handlers never hold a reference
/// into the map across requests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ids: IdAllocator,
    todos: RwLock<BTreeMap<u64, Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(id: TodoId) -> Option<u64> {
        match id {
            TodoId::Seq(n) => Some(n),
            TodoId::Doc(_) => None,
        }
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn parse_id(&self, raw: &str) -> Result<TodoId, TodoError> {
        raw.parse::<u64>().map(TodoId::Seq).map_err(|_| TodoError::InvalidId)
    }

    async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        Ok(self.todos.read().await.values().cloned().collect())
    }

    async fn insert(&self, new: NewTodo) -> Result<Todo, TodoError> {
        let id = self.ids.allocate().await;
        let todo = Todo {
            id: TodoId::Seq(id),
            item: new.item,
            completed: new.completed,
        };
        self.todos.write().await.insert(id, todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        let Some(key) = Self::key(id) else { return Ok(None) };
        Ok(self.todos.read().await.get(&key).cloned())
    }

    async fn patch(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, TodoError> {
        let Some(key) = Self::key(id) else { return Ok(None) };
        let mut todos = self.todos.write().await;
        Ok(todos.get_mut(&key).map(|todo| {
            patch.apply_to(todo);
            todo.clone()
        }))
    }

    async fn remove(&self, id: TodoId) -> Result<Option<Todo>, TodoError> {
        let Some(key) = Self::key(id) else { return Ok(None) };
        Ok(self.todos.write().await.remove(&key))
    }

    async fn ping(&self) -> Result<(), TodoError> {
        Ok(())
    }
}
