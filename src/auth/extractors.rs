use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use lazy_static::lazy_static;
use regex::Regex;
use std::future::{ready, Ready};
use uuid::Uuid;

use super::service::AuthService;
use crate::error::AppError;

lazy_static! {
    // RFC 6750: the scheme is case-insensitive, the token is a single opaque run.
    static ref BEARER_REGEX: Regex = Regex::new(r"^(?i:bearer)\s+(\S+)\s*$").unwrap();
}

/// The identity resolved from a request's bearer token.
///
/// Taking this as a handler argument makes the route protected: extraction verifies
/// the token through [`AuthService::authenticate`] and rejects the request with
/// `401` before the handler body runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    BEARER_REGEX
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|token| token.as_str())
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let auth = req.app_data::<web::Data<AuthService>>().ok_or_else(|| {
        AppError::InternalServerError("AuthService is not registered as app data".into())
    })?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            log::debug!("request to {} without a bearer token", req.path());
            AppError::Unauthenticated
        })?;

    auth.authenticate(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req).map_err(ActixError::from))
    }
}
