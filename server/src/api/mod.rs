//! HTTP routes over a `TodoStore`.
//!
//! | Method | Path                | Success |
//! |--------|---------------------|---------|
//! | GET    | `/todo`             | 200     |
//! | GET    | `/todo/{id}`        | 200     |
//! | POST   | `/todo/CreateTodo`  | 201     |
//! | DELETE | `/todo/{id}`        | 200     |
//!
//! The create route takes the title from the `todoTitle` query parameter,
//! not from a request body. GET and DELETE on `/todo/CreateTodo` behave as
//! lookups of the id `CreateTodo`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::effects::{Clock, IdGenerator, SystemClock, UuidIds};
use crate::store::TodoStore;

mod error;
mod handlers;
mod trace;

pub use error::{ApiError, ProblemDetails, INTERNAL_TITLE, PROBLEM_CONTENT_TYPE, REJECTED_TITLE};
pub use handlers::CreateTodoQuery;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    /// Local wall-clock time and random UUIDs.
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self::with_effects(store, Arc::new(SystemClock), Arc::new(UuidIds))
    }

    pub fn with_effects(
        store: Arc<dyn TodoStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { store, clock, ids }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/todo", get(handlers::list_todos))
        .route(
            "/todo/CreateTodo",
            post(handlers::create_todo)
                .get(handlers::get_create_segment)
                .delete(handlers::delete_create_segment),
        )
        .route(
            "/todo/{id}",
            get(handlers::get_todo).delete(handlers::delete_todo),
        )
        .layer(axum::middleware::from_fn(trace::trace_requests))
        .with_state(state)
}
