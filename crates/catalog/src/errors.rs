use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Duplicate item name: {0}")]
    DuplicateName(String),

    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            AppError::DuplicateName(name) => (StatusCode::CONFLICT, name.as_str()),
            AppError::InvalidItem(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Config(msg) => {
                error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
