//! The todo operations.
//!
//! Every operation resolves the client's identifier through the store, then
//! performs a single lookup or mutation. The service is backend-agnostic: the same
//! code runs over [`crate::storage::MemoryStore`] and
//! [`crate::storage::PgDocumentStore`].

use crate::domain::{NewTodo, Todo, TodoError, TodoId, TodoPatch, TodoPayload};
use crate::storage::TodoStore;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn TodoStore> {
        &self.store
    }

    pub fn parse_id(&self, raw: &str) -> Result<TodoId, TodoError> {
        self.store.parse_id(raw.trim())
    }

    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        self.store.list().await
    }

    pub async fn create(&self, payload: TodoPayload) -> Result<Todo, TodoError> {
        let new = NewTodo::try_from(payload)?;
        let todo = self.store.insert(new).await?;
        debug!(id = %todo.id, "todo created");
        Ok(todo)
    }

    /// Record locator: parses the identifier and loads the matching record.
    pub async fn fetch(&self, raw_id: &str) -> Result<Todo, TodoError> {
        let id = self.parse_id(raw_id)?;
        self.store.get(id).await?.ok_or(TodoError::NotFound)
    }

    /// Flips `completed`.
    ///
    /// Read then write: a delete landing between the two surfaces as `NotFound`,
    /// and one of two concurrent toggles may be lost.
    pub async fn toggle(&self, raw_id: &str) -> Result<Todo, TodoError> {
        let current = self.fetch(raw_id).await?;
        let patch = TodoPatch {
            item: None,
            completed: Some(!current.completed),
        };
        let todo = self.store.patch(current.id, patch).await?.ok_or(TodoError::NotFound)?;
        debug!(id = %todo.id, completed = todo.completed, "todo toggled");
        Ok(todo)
    }

    /// Merges the fields present in `payload` into the record.
    pub async fn update(&self, id: TodoId, payload: TodoPayload) -> Result<Todo, TodoError> {
        let patch = TodoPatch::try_from(payload)?;
        let todo = if patch.is_empty() {
            self.store.get(id).await?
        } else {
            self.store.patch(id, patch).await?
        };
        let todo = todo.ok_or(TodoError::NotFound)?;
        debug!(id = %todo.id, "todo updated");
        Ok(todo)
    }

    /// Record remover: returns the record as it was before deletion.
    pub async fn delete(&self, raw_id: &str) -> Result<Todo, TodoError> {
        let id = self.parse_id(raw_id)?;
        let todo = self.store.remove(id).await?.ok_or(TodoError::NotFound)?;
        debug!(id = %todo.id, "todo deleted");
        Ok(todo)
    }
}
