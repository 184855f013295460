//! Persistence for `Todo` records.
//!
//! # Design
//! `TodoStore` is the only seam between the HTTP layer and storage. Every
//! operation returns `StoreResult`, and the error kind alone decides the
//! HTTP status further up. Writes follow the affected-rows convention: a
//! write that completes but changes nothing is `Rejected`, not `Ok`.

use std::fmt;

use async_trait::async_trait;

use crate::model::Todo;

mod memory;
mod seed;
mod sqlite;

pub use memory::MemoryTodoStore;
pub use seed::{seed_if_empty, STARTER_TITLES};
pub use sqlite::SqliteTodoStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record has the requested id.
    NotFound(String),

    /// The write completed but affected zero rows.
    Rejected(String),

    /// The storage engine failed or is unavailable.
    Storage(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "todo not found: {id}"),
            StoreError::Rejected(reason) => write!(f, "write rejected: {reason}"),
            StoreError::Storage(detail) => write!(f, "storage failure: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// List / find / insert / remove over `Todo` records.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records in storage-native order.
    async fn list_all(&self) -> StoreResult<Vec<Todo>>;

    /// `NotFound` when the id is absent.
    async fn find_by_id(&self, id: &str) -> StoreResult<Todo>;

    /// `Rejected` when nothing was written.
    async fn insert(&self, todo: &Todo) -> StoreResult<()>;

    /// `NotFound` when the id is absent, `Rejected` when the delete removed nothing.
    async fn remove(&self, id: &str) -> StoreResult<()>;
}
