use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while serving recipe requests
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or blank
    #[error("{0}")]
    Validation(String),

    /// No recipe exists for the requested id
    #[error("Recipe not found")]
    NotFound,

    /// The record store reported a failure; the message is passed through verbatim
    #[error("{0}")]
    Store(String),

    /// Failed to reach the record store
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or malformed startup configuration
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Http(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
