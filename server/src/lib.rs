//! To-do list REST service.
//!
//! # Overview
//! A `TodoStore` (in-memory or SQLite) behind four axum routes: list, get by
//! id, create and delete. Store outcomes are typed (`StoreError`) and the API
//! layer turns each kind into one status code.
//!
//! # Design
//! - `AppState` carries the store plus the clock and id generator used on
//!   create, so tests can pin both.
//! - Everything above the store is storage-agnostic; `ServerConfig` picks the
//!   engine at startup.

pub mod api;
pub mod config;
pub mod effects;
pub mod logging;
pub mod model;
pub mod store;

use axum::Router;
use tokio::net::TcpListener;

pub use api::{ApiError, AppState, ProblemDetails};
pub use config::{ConfigError, ServerConfig, StoreKind};
pub use effects::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidIds};
pub use logging::init_logging;
pub use model::Todo;
pub use store::{
    seed_if_empty, MemoryTodoStore, SqliteTodoStore, StoreError, StoreResult, TodoStore,
};

pub fn app(state: AppState) -> Router {
    api::router(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
