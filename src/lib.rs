pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::todo_service::TodoService;
pub use domain::{Todo, TodoError, TodoId, TodoPayload};
pub use infra::config::{Backend, Config};
pub use storage::{MemoryStore, PgDocumentStore, TodoStore};
