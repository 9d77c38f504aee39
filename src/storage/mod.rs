//! Storage backends for todo records.
//!
//! Operation logic in [`crate::app::todo_service`] is written once against
//! [`TodoStore`]; the binaries pick an implementation at startup.

use crate::domain::{NewTodo, Todo, TodoError, TodoId, TodoPatch};
use crate::infra::config::{Backend, Config};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub mod memory;
pub mod postgres;

pub use memory::{IdAllocator, MemoryStore};
pub use postgres::PgDocumentStore;

/// Contract every todo backend fulfils.
///
/// Lookups return `Ok(None)` for a well-formed identifier with no matching
/// record; only backend failures are errors.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Short backend name used in logs and the health response.
    fn backend(&self) -> &'static str;

    /// Parses a client-supplied identifier into this backend's id shape.
    fn parse_id(&self, raw: &str) -> Result<TodoId, TodoError>;

    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<Todo>, TodoError>;

    /// Stores a new record and assigns its identifier.
    async fn insert(&self, new: NewTodo) -> Result<Todo, TodoError>;

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;

    /// Applies a field-set patch and returns the record as stored afterwards.
    async fn patch(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, TodoError>;

    /// Deletes a record, returning it as it was just before removal.
    async fn remove(&self, id: TodoId) -> Result<Option<Todo>, TodoError>;

    /// Backend liveness check.
    async fn ping(&self) -> Result<(), TodoError>;
}

/// Builds the backend selected by `config`.
///
/// For postgres this connects, creates the `todos` collection if needed and pings
/// the server, so a failure here means the service must not start.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn TodoStore>> {
    let store: Arc<dyn TodoStore> = match config.backend {
        Backend::Memory => Arc::new(MemoryStore::new()),
        Backend::Postgres => {
            let url = config.database_url()?;
            Arc::new(PgDocumentStore::connect(url, config.max_connections).await?)
        }
    };
    info!(backend = store.backend(), "todo store ready");
    Ok(store)
}
