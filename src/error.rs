//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a handler can produce is one of its variants, and each variant maps to
//! exactly one HTTP status code and a JSON body of the form `{"message": "..."}`.
//!
//! `AppError` implements `actix_web::error::ResponseError`, and `From` conversions exist
//! for the lower-level errors (`sqlx`, `validator`, `bcrypt`, token verification and
//! actix's blocking pool) so handlers can use the `?` operator throughout.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Signup with an email that already belongs to a user (HTTP 400).
    DuplicateEmail,
    /// The user referenced by an email or a token no longer exists (HTTP 404).
    UserNotFound,
    /// The password did not match the stored hash (HTTP 401).
    InvalidCredentials,
    /// A protected route was called without a bearer token (HTTP 401).
    Unauthorized(String),
    /// The bearer token was present but malformed, badly signed or expired (HTTP 403).
    Forbidden(String),
    /// A required field was missing or a field failed validation (HTTP 400).
    InvalidArgument(String),
    /// The requested resource does not exist or is not owned by the caller (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the backing store (HTTP 500).
    DatabaseError(String),
}

impl AppError {
    /// The message sent to the client in the `message` field.
    ///
    /// Internal and database errors are replaced by a generic text so that
    /// driver details never reach the client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::DuplicateEmail => "Email already exists".to_string(),
            AppError::UserNotFound => "User not found".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::InvalidArgument(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateEmail => write!(f, "Duplicate email"),
            AppError::UserNotFound => write!(f, "User not found"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.client_message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes a 404; everything else is a database error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Validation failures are client errors carrying the validator's field messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::InvalidArgument(error.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        if error.is_invalid_token() {
            log::debug!("Rejected bearer token: {}", error);
            AppError::Forbidden("Invalid Token".into())
        } else {
            AppError::InternalServerError(error.to_string())
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
