use actix_web::web;
use chrono::Duration;
use std::sync::Arc;

use taskgate::auth::{AuthService, PasswordHasher, TokenService};
use taskgate::config::MIN_BCRYPT_COST;
use taskgate::store::{MemoryStore, TaskStore};

pub const TEST_SECRET: &str = "integration-test-secret";

/// App data backed by a fresh in-memory store, with the cheapest bcrypt cost.
pub fn test_state() -> (web::Data<AuthService>, web::Data<dyn TaskStore>) {
    let store = Arc::new(MemoryStore::new());
    let auth = AuthService::new(
        store.clone(),
        PasswordHasher::new(MIN_BCRYPT_COST),
        TokenService::new(TEST_SECRET, Duration::hours(1)),
    )
    .expect("auth service");
    let tasks: Arc<dyn TaskStore> = store;
    (web::Data::new(auth), web::Data::from(tasks))
}
