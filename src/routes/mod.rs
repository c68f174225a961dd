pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};

use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(web::scope("/users").service(auth::me))
        .service(
            web::scope("/tasks")
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// JSON extractor settings: unreadable or incomplete bodies become `400 {"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let message = match &err {
                JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
                JsonPayloadError::ContentType => "Expected a JSON request body".to_string(),
                _ => "Invalid request body".to_string(),
            };
            AppError::ValidationError(message).into()
        })
}

/// Query extractor settings: a malformed query string becomes `400 {"error": ...}`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        AppError::ValidationError(format!("Invalid query string: {}", err)).into()
    })
}
