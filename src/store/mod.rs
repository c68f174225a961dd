//! Persistence boundary for users and tasks.
//!
//! Services only see the [`UserStore`] and [`TaskStore`] traits. [`postgres::PgStore`]
//! is the production backend; [`memory::MemoryStore`] keeps everything in process and
//! backs the test suite.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskQuery, TaskUpdate, UserRecord};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user.
    ///
    /// Email uniqueness is enforced here: a second insert with the same (normalized)
    /// email fails with `AppError::ValidationError`, even when two registrations race.
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError>;
}

/// Task persistence. Every operation is scoped to an owner; tasks belonging to
/// someone else behave as if they did not exist.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: Task) -> Result<Task, AppError>;

    /// Lists the owner's tasks, newest first.
    async fn list_tasks(&self, owner: Uuid, query: &TaskQuery) -> Result<Vec<Task>, AppError>;

    async fn find_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError>;

    async fn update_task(
        &self,
        owner: Uuid,
        id: Uuid,
        update: TaskUpdate,
    ) -> Result<Option<Task>, AppError>;

    /// Removes the task and returns it, or `None` if the owner has no such task.
    async fn delete_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError>;
}
