//! HTTP-facing error type.
//!
//! Each `ApiError` kind maps to exactly one status code. Not-found responses
//! carry no body; the others carry a problem-details JSON object.

use std::fmt;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::store::StoreError;

pub const REJECTED_TITLE: &str = "Problem saving todo to database";
pub const INTERNAL_TITLE: &str = "Internal server error";
pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound,
    Rejected(String),
    Internal(String),
}

/// Problem-details body for 400 and 500 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "not found"),
            ApiError::Rejected(reason) => write!(f, "rejected: {reason}"),
            ApiError::Internal(detail) => write!(f, "internal error: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Rejected(reason) => ApiError::Rejected(reason),
            StoreError::Storage(detail) => ApiError::Internal(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let problem = match self {
            ApiError::NotFound => return status.into_response(),
            ApiError::Rejected(reason) => {
                warn!(%reason, "write rejected by store");
                ProblemDetails {
                    title: REJECTED_TITLE.to_string(),
                    status: status.as_u16(),
                    detail: None,
                }
            }
            ApiError::Internal(detail) => {
                error!(%detail, "store failure");
                ProblemDetails {
                    title: INTERNAL_TITLE.to_string(),
                    status: status.as_u16(),
                    detail: Some(detail),
                }
            }
        };

        let mut resp = (status, Json(problem)).into_response();
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
        );
        resp
    }
}
