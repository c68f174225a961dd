//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type returned by services and
//! route handlers. It implements `actix_web::error::ResponseError`, so handlers can
//! return `Result<_, AppError>` and have failures rendered as `{"error": ...}` JSON.
//!
//! Client-facing bodies carry only what the caller needs. Authentication failures
//! use fixed messages so that responses cannot be used to tell an unknown email from
//! a wrong password, or an expired token from a forged one. Internal detail (database
//! errors, token rejection causes) is logged and never returned.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::AuthError;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Unable to login, invalid credentials";
pub const UNAUTHENTICATED_MESSAGE: &str = "Please authenticate";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Bad or duplicate input (HTTP 400). The message is safe to show to the client.
    ValidationError(String),
    /// Login failed. Used for both an unknown email and a wrong password (HTTP 400).
    InvalidCredentials,
    /// Missing, malformed, forged or expired bearer token (HTTP 401).
    Unauthenticated,
    /// The requested resource does not exist or is not visible to the caller (HTTP 404).
    NotFound(String),
    /// Failure in the store (HTTP 500). The detail is logged, not returned.
    DatabaseError(String),
    /// Any other unexpected server-side failure (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Unauthenticated => write!(f, "Unauthenticated"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.as_str(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            AppError::Unauthenticated => UNAUTHENTICATED_MESSAGE,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                log::error!("{}", self);
                INTERNAL_MESSAGE
            }
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// `RowNotFound` becomes `NotFound`; everything else is an opaque database error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Every token failure looks the same to the client; the cause is logged here.
impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        log::warn!("rejected bearer token: {}", error);
        AppError::Unauthenticated
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(error: actix_web::error::BlockingError) -> AppError {
        AppError::InternalServerError(format!("blocking task failed: {}", error))
    }
}
