//! Domain types for todo records.

pub mod todo;

pub use todo::{NewTodo, Todo, TodoError, TodoId, TodoPatch, TodoPayload};
