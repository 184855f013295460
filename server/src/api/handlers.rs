use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tracing::{info, warn};

use super::{ApiError, AppState};
use crate::model::Todo;
use crate::store::StoreError;

/// Last path segment of the create route. GET and DELETE treat it as an id.
pub const CREATE_SEGMENT: &str = "CreateTodo";

/// Query string of `POST /todo/CreateTodo`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateTodoQuery {
    pub todo_title: Option<String>,
}

impl CreateTodoQuery {
    /// Binds the first `todoTitle` pair; repeats and unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let todo_title = pairs
            .into_iter()
            .find(|(key, _)| key == "todoTitle")
            .map(|(_, value)| value);
        Self { todo_title }
    }
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.list_all().await?;
    Ok(Json(todos))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.store.find_by_id(&id).await?;
    Ok(Json(todo))
}

pub async fn create_todo(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, ApiError> {
    let query = CreateTodoQuery::from_pairs(pairs);
    let todo = Todo::new(
        state.ids.next_id(),
        query.todo_title.unwrap_or_default(),
        state.clock.now(),
    );
    state.store.insert(&todo).await?;
    info!(id = %todo.id, "created todo");

    let location = format!("/todo/{}", todo.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(todo)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.remove(&id).await {
        Ok(()) => {
            info!(%id, "deleted todo");
            Ok(StatusCode::OK)
        }
        Err(StoreError::Rejected(reason)) => {
            warn!(%id, %reason, "delete removed nothing");
            Err(ApiError::NotFound)
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /todo/CreateTodo`: the static create route shadows `{id}` here.
pub async fn get_create_segment(state: State<AppState>) -> Result<Json<Todo>, ApiError> {
    get_todo(state, Path(CREATE_SEGMENT.to_string())).await
}

/// `DELETE /todo/CreateTodo`.
pub async fn delete_create_segment(state: State<AppState>) -> Result<StatusCode, ApiError> {
    delete_todo(state, Path(CREATE_SEGMENT.to_string())).await
}
