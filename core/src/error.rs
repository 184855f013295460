//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." A 400 carrying a problem-details body becomes `Problem`. All
//! other non-success responses land in `HttpError` with the raw status code
//! and body for debugging.

use std::fmt;

/// Errors returned by `TodoClient`.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    NotFound,

    /// The server refused the write and explained why.
    Problem { status: u16, title: String },

    /// Any other unexpected status.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The base URL given to `TodoClient::new` is unusable.
    InvalidBaseUrl(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Problem { status, title } => write!(f, "HTTP {status}: {title}"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::InvalidBaseUrl(msg) => write!(f, "invalid base url: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
