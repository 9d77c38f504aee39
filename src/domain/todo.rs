//! The todo record and the error taxonomy shared by every backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Identifier of a stored todo.
///
/// The in-memory backend hands out small sequential integers; the document
/// backend uses an opaque UUID generated by the database on insert. On the wire
/// the former is a JSON number and the latter a JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Seq(u64),
    Doc(Uuid),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Seq(n) => write!(f, "{}", n),
            TodoId::Doc(u) => write!(f, "{}", u),
        }
    }
}

/// A stored todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Integer (in-memory backend) or UUID string (document backend).
    #[schema(value_type = Object)]
    pub id: TodoId,
    pub item: String,
    pub completed: bool,
}

/// Candidate record carried by create and update requests.
///
/// Every field is optional at the decoding level so that create can report a
/// missing `item` as a validation error and update can merge only what was sent.
/// A client-supplied `id` is not part of the shape and is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct TodoPayload {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Field-set patch applied by a store. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub item: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.completed.is_none()
    }

    /// Applies the patch in place.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(item) = &self.item {
            todo.item = item.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

/// Validated input for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub item: String,
    pub completed: bool,
}

impl TryFrom<TodoPayload> for NewTodo {
    type Error = TodoError;

    fn try_from(payload: TodoPayload) -> Result<Self, Self::Error> {
        match payload.item {
            Some(item) if !item.is_empty() => Ok(NewTodo {
                item,
                completed: payload.completed.unwrap_or(false),
            }),
            _ => Err(TodoError::Validation("Item is required".to_string())),
        }
    }
}

impl TryFrom<TodoPayload> for TodoPatch {
    type Error = TodoError;

    fn try_from(payload: TodoPayload) -> Result<Self, Self::Error> {
        if matches!(payload.item.as_deref(), Some("")) {
            return Err(TodoError::Validation("Item must not be empty".to_string()));
        }
        Ok(TodoPatch {
            item: payload.item,
            completed: payload.completed,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// Missing required field or malformed request body.
    #[error("{0}")]
    Validation(String),
    #[error("invalid todo id")]
    InvalidId,
    #[error("todo not found")]
    NotFound,
    /// Backend failure; the backend's own message is kept verbatim.
    #[error("{0}")]
    Storage(String),
}

impl From<sqlx::Error> for TodoError {
    fn from(e: sqlx::Error) -> Self {
        TodoError::Storage(e.to_string())
    }
}
