//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently,
//! so the client does not pull in axum or the storage stack. The end-to-end
//! test catches any schema drift between the two crates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub date_created: NaiveDateTime,
    pub date_completed: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_complete: bool,
}

/// Input for creating a todo. Sent as the `todoTitle` query parameter; when
/// `None` the parameter is omitted and the server stores an empty title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(rename = "todoTitle", default)]
    pub todo_title: Option<String>,
}

impl CreateTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            todo_title: Some(title.into()),
        }
    }
}

/// Problem-details body the server sends with 400 and 500 responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
