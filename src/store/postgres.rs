use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use super::{TaskStore, UserStore, DUPLICATE_EMAIL_MESSAGE};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{NewUser, Task, TaskQuery, TaskUpdate, UserRecord};

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at";
const TASK_COLUMNS: &str = "id, description, completed, owner, created_at, updated_at";

/// Postgres-backed store. The `users.email` unique index is what serializes
/// concurrent registrations for the same address.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects with the configured pool size and applies pending migrations.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("migration failed: {}", e)))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let record = user.into_record();
        let result = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        ))
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::ValidationError(DUPLICATE_EMAIL_MESSAGE.into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks ({TASK_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.id)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.owner)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn list_tasks(&self, owner: Uuid, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks \
             WHERE owner = $1 AND ($2::BOOLEAN IS NULL OR completed = $2) \
             ORDER BY created_at DESC"
        ))
        .bind(owner)
        .bind(query.completed)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn find_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND owner = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn update_task(
        &self,
        owner: Uuid,
        id: Uuid,
        update: TaskUpdate,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET description = COALESCE($1, description), \
                 completed = COALESCE($2, completed), \
                 updated_at = NOW() \
             WHERE id = $3 AND owner = $4 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(update.description.map(|d| d.trim().to_string()))
        .bind(update.completed)
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "DELETE FROM tasks WHERE id = $1 AND owner = $2 RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }
}
