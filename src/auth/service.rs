use actix_web::web;
use std::sync::Arc;
use validator::Validate;

use super::extractors::AuthenticatedUser;
use super::password::PasswordHasher;
use super::token::TokenService;
use super::{LoginRequest, RegisterRequest};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{normalize_email, NewUser, User};
use crate::store::{UserStore, DUPLICATE_EMAIL_MESSAGE};

/// Registration, login and token authentication over a [`UserStore`].
///
/// Holds no mutable state; one instance is shared by every worker.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
    /// Verified against when the email is unknown, so both login failures cost one KDF run.
    dummy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash("taskgate-dummy-password")?;
        Ok(Self {
            users,
            hasher,
            tokens,
            dummy_hash,
        })
    }

    pub fn from_config(config: &Config, users: Arc<dyn UserStore>) -> Result<Self, AppError> {
        Self::new(
            users,
            PasswordHasher::new(config.bcrypt_cost),
            TokenService::from_config(config),
        )
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    pub async fn register(&self, mut request: RegisterRequest) -> Result<User, AppError> {
        // Surrounding whitespace would otherwise fail the email format check.
        request.email = normalize_email(&request.email);
        request.validate()?;

        let email = request.email;
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::ValidationError(DUPLICATE_EMAIL_MESSAGE.into()));
        }

        let hasher = self.hasher;
        let password = request.password;
        let password_hash = web::block(move || hasher.hash(&password)).await??;

        let record = self
            .users
            .insert_user(NewUser {
                name: request.name.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        log::info!("registered user {}", record.id);
        Ok(record.into())
    }

    /// Checks credentials and issues a session token.
    ///
    /// A blank field, an unknown email and a wrong password all end in
    /// `AppError::InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<(User, String), AppError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            log::info!("failed login: missing email or password");
            return Err(AppError::InvalidCredentials);
        }

        let record = self
            .users
            .find_user_by_email(&normalize_email(&request.email))
            .await?;

        let digest = record
            .as_ref()
            .map(|user| user.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.clone());
        let hasher = self.hasher;
        let password = request.password;
        let matches = web::block(move || hasher.verify(&password, &digest)).await?;

        match record {
            Some(user) if matches => {
                let token = self.tokens.issue(user.id)?;
                log::info!("user {} logged in", user.id);
                Ok((user.into(), token))
            }
            Some(user) => {
                log::info!("failed login for user {}: wrong password", user.id);
                Err(AppError::InvalidCredentials)
            }
            None => {
                log::info!("failed login: unknown email");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Resolves a bearer token to the identity it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let user_id = self.tokens.verify(token)?;
        Ok(AuthenticatedUser { user_id })
    }
}
