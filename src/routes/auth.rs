use crate::{
    auth::{
        AuthService, AuthenticatedUser, LoginRequest, LoginResponse, RegisterRequest,
        RegisterResponse, LOGGED_IN_MESSAGE, REGISTERED_MESSAGE,
    },
    error::AppError,
    models::User,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: `{ "user": User, "message": "User Created Successfully" }`.
/// - `400 Bad Request`: missing or invalid fields, or the email is already registered.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let user = auth.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        user,
        message: REGISTERED_MESSAGE.to_string(),
    }))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `{ "user": User, "token": "...", "message": "Logged in successfully" }`.
/// - `400 Bad Request`: the same body for an unknown email and for a wrong password.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (user, token) = auth.login(login_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        user,
        token,
        message: LOGGED_IN_MESSAGE.to_string(),
    }))
}

/// The profile of the authenticated caller.
///
/// A valid token for a user that no longer exists is treated as unauthenticated.
#[get("/me")]
pub async fn me(
    identity: AuthenticatedUser,
    auth: web::Data<AuthService>,
) -> Result<impl Responder, AppError> {
    let user: User = auth
        .users()
        .find_user_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthenticated)?
        .into();

    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}
