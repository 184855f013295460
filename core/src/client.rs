//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a validated base URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.

use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, ProblemDetails, Todo};

const TODO_SEGMENT: &str = "todo";
const CREATE_SEGMENT: &str = "CreateTodo";
const TITLE_PARAM: &str = "todoTitle";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: Url,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{base_url} cannot carry a path"
            )));
        }
        Ok(Self { base_url })
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.endpoint(&[TODO_SEGMENT]))
    }

    pub fn build_get_todo(&self, id: &str) -> HttpRequest {
        bodyless(HttpMethod::Get, self.endpoint(&[TODO_SEGMENT, id]))
    }

    /// The title travels in the query string; the request has no body.
    pub fn build_create_todo(&self, input: &CreateTodo) -> HttpRequest {
        let mut url = self.endpoint(&[TODO_SEGMENT, CREATE_SEGMENT]);
        if let Some(title) = &input.todo_title {
            url.query_pairs_mut().append_pair(TITLE_PARAM, title);
        }
        bodyless(HttpMethod::Post, url)
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        bodyless(HttpMethod::Delete, self.endpoint(&[TODO_SEGMENT, id]))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn bodyless(method: HttpMethod, url: Url) -> HttpRequest {
    HttpRequest {
        method,
        url: url.into(),
        headers: Vec::new(),
        body: None,
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    if response.status == 400 {
        if let Ok(problem) = serde_json::from_str::<ProblemDetails>(&response.body) {
            return Err(ApiError::Problem {
                status: problem.status,
                title: problem.title,
            });
        }
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
