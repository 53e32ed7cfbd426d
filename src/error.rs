//! Error types for the bookstore server

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Machine-readable error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchData = 4,
    MissingField = 5,
    BadValue = 6,
    ParseFailure = 7,
    IdentifierMismatch = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("required field '{0}' is missing")]
    RequiredField(String),

    #[error("invalid value for '{field}': {message}")]
    Constraint { field: String, message: String },

    #[error("failed to parse {}: {message}", .param.as_deref().unwrap_or("request body"))]
    Parsing {
        param: Option<String>,
        message: String,
    },

    #[error("{field} in the path does not match {field} in the body")]
    IdMismatch { field: &'static str },

    #[error("{0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("corrupt {column} column: {source}")]
    CorruptRecord {
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn storage(context: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::Storage {
            context: context.into(),
            source,
        }
    }

    /// Prefix storage failures with the operation that triggered them.
    /// Validation and not-found errors pass through untouched.
    pub fn context(self, operation: &str) -> Self {
        match self {
            AppError::Storage { context, source } => AppError::Storage {
                context: format!("{}: {}", operation, context),
                source,
            },
            other @ (AppError::CorruptRecord { .. } | AppError::Internal(_)) => {
                AppError::Internal(format!("{}: {}", operation, other))
            }
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::RequiredField(_)
            | AppError::Constraint { .. }
            | AppError::Parsing { .. }
            | AppError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage { .. } | AppError::CorruptRecord { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::RequiredField(_) => ErrorCode::MissingField,
            AppError::Constraint { .. } => ErrorCode::BadValue,
            AppError::Parsing { .. } => ErrorCode::ParseFailure,
            AppError::IdMismatch { .. } => ErrorCode::IdentifierMismatch,
            AppError::NotFound(_) => ErrorCode::NoSuchData,
            AppError::Storage { .. } => ErrorCode::DbFailure,
            AppError::CorruptRecord { .. } | AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// Name of the offending field or query parameter, when there is one
    pub fn field(&self) -> Option<String> {
        match self {
            AppError::RequiredField(field) => Some(field.clone()),
            AppError::Constraint { field, .. } => Some(field.clone()),
            AppError::Parsing { param, .. } => param.clone(),
            AppError::IdMismatch { field } => Some(field.to_string()),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(source: sqlx::Error) -> Self {
        AppError::storage("database error", source)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();

        AppError::Constraint {
            field: fields.into_iter().next().unwrap_or_default(),
            message: errors.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = err.code();
        ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: err.to_string(),
            field: err.field(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Turns a failure into the HTTP response actually written to the client.
/// Controllers hand every error to the handler held in `AppState`.
pub type ErrorHandler = Arc<dyn Fn(AppError) -> Response + Send + Sync>;

/// Emits the error's own status code with a JSON `ErrorResponse` body
pub fn default_error_handler() -> ErrorHandler {
    Arc::new(|err: AppError| err.into_response())
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
