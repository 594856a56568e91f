use crate::database::DatabaseError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ValidationFailed(String),
    #[error("{0}")]
    ParseFailed(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("Database error: {0}")]
    Database(DatabaseError),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code carried next to the message
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationFailed(_) => "VALIDATION_FAILED",
            AppError::ParseFailed(_) => "PARSE_FAILED",
            AppError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Config(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound => AppError::NotFound("Record not found".to_string()),
            DatabaseError::Constraint(msg) => AppError::ValidationFailed(msg),
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = Json(json!({
            "Error": self.to_string(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
