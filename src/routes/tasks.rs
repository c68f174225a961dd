use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskQuery, TaskUpdate},
    store::TaskStore,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// Lists the caller's tasks, newest first.
///
/// ## Query Parameters:
/// - `completed` (optional): only tasks whose completion flag matches.
///
/// ## Responses:
/// - `200 OK`: `{ "tasks": [Task] }`.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn get_tasks(
    identity: AuthenticatedUser,
    store: web::Data<dyn TaskStore>,
    query_params: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = store.list_tasks(identity.user_id, &query_params).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Creates a task owned by the caller.
///
/// ## Responses:
/// - `201 Created`: `{ "task": Task }`.
/// - `400 Bad Request`: missing or invalid `description`.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    identity: AuthenticatedUser,
    store: web::Data<dyn TaskStore>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store
        .insert_task(Task::new(task_data.into_inner(), identity.user_id))
        .await?;

    Ok(HttpResponse::Created().json(json!({ "task": task })))
}

/// Retrieves one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{ "task": Task }`.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    identity: AuthenticatedUser,
    store: web::Data<dyn TaskStore>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = store
        .find_task(identity.user_id, task_id.into_inner())
        .await?
        .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Partially updates one of the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: `{ "task": Task }` with the new values.
/// - `400 Bad Request`: an empty or overlong `description`.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[patch("/{id}")]
pub async fn update_task(
    identity: AuthenticatedUser,
    store: web::Data<dyn TaskStore>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store
        .update_task(identity.user_id, task_id.into_inner(), task_data.into_inner())
        .await?
        .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Deletes one of the caller's tasks and returns it.
///
/// ## Responses:
/// - `200 OK`: `{ "task": Task, "message": "Task deleted" }`.
/// - `404 Not Found`: no such task, or it belongs to another user.
#[delete("/{id}")]
pub async fn delete_task(
    identity: AuthenticatedUser,
    store: web::Data<dyn TaskStore>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = store
        .delete_task(identity.user_id, task_id.into_inner())
        .await?
        .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(json!({ "task": task, "message": "Task deleted" })))
}
