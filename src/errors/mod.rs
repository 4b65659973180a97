//! Centralized error handling.
//!
//! Provides a unified error type for the entire application and the mapping
//! from any error to an HTTP status and JSON body.

mod database;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub use database::{DbFailure, ServerError};
pub(crate) use database::to_camel_case;

/// Message returned for every unclassified failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    /// Rejection produced by the HTTP framework (extractors), kept verbatim
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code
    #[schema(example = "UNIQUE_CONSTRAINT_VIOLATION")]
    pub code: String,
    /// Human-readable description
    #[schema(example = "A record with the same values already exists")]
    pub message: String,
    /// Offending fields (unique constraint violations only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl ErrorBody {
    fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            fields: None,
        }
    }
}

/// Serialized error body attached to error responses for the request logger.
#[derive(Debug, Clone)]
pub struct ErrorReport(pub String);

impl AppError {
    /// Map the error to the status and body sent to the client.
    pub fn to_status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Database(err) => database_response(err),
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorBody::new("AUTH_ERROR", "Invalid or expired token"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_response()
            }
            AppError::Http { status, message } => {
                (*status, ErrorBody::new(status_code_name(*status), message.clone()))
            }
            _ => (self.status(), ErrorBody::new(self.code(), self.user_message())),
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
            AppError::Database(err) => database_status(&DbFailure::classify(err)),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Http { .. } => "HTTP_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message for client errors
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => format!("{} already exists", msg),
            _ => self.to_string(),
        }
    }
}

fn database_status(failure: &DbFailure) -> StatusCode {
    match failure {
        DbFailure::UniqueViolation { .. } => StatusCode::CONFLICT,
        DbFailure::ForeignKeyViolation { .. }
        | DbFailure::Rejected { .. }
        | DbFailure::Validation(_) => StatusCode::BAD_REQUEST,
        DbFailure::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn database_response(err: &sea_orm::DbErr) -> (StatusCode, ErrorBody) {
    let failure = DbFailure::classify(err);
    if failure == DbFailure::Unclassified {
        tracing::error!("Database error: {:?}", err);
    }
    render_db_failure(failure)
}

/// Status and body for a classified database failure.
fn render_db_failure(failure: DbFailure) -> (StatusCode, ErrorBody) {
    let status = database_status(&failure);

    let body = match failure {
        DbFailure::UniqueViolation { fields } => ErrorBody {
            code: "UNIQUE_CONSTRAINT_VIOLATION".to_string(),
            message: "A record with the same values already exists".to_string(),
            fields: Some(fields),
        },
        DbFailure::ForeignKeyViolation { constraint } => {
            tracing::debug!(constraint = ?constraint, "Foreign key violation");
            ErrorBody::new(
                "FOREIGN_KEY_VIOLATION",
                "Referenced record does not exist or is still referenced",
            )
        }
        DbFailure::Rejected { code } => {
            ErrorBody::new("DATABASE_ERROR", format!("Database request failed ({})", code))
        }
        DbFailure::Validation(msg) => {
            tracing::debug!("Data validation error: {}", msg);
            ErrorBody::new("DATA_VALIDATION_ERROR", "Invalid data for the requested operation")
        }
        DbFailure::Unclassified => return internal_response(),
    };

    (status, body)
}

fn internal_response() -> (StatusCode, ErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("INTERNAL_ERROR", INTERNAL_ERROR_MESSAGE),
    )
}

/// Upper snake case name of a status, e.g. `UNPROCESSABLE_ENTITY`.
fn status_code_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("HTTP_ERROR")
        .to_uppercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_status_and_body();
        let body = ErrorResponse { error: body };
        let report = serde_json::to_string(&body).unwrap_or_default();

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport(report));
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Http {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Http {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Http {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
