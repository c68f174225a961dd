use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TaskStore, UserStore, DUPLICATE_EMAIL_MESSAGE};
use crate::error::AppError;
use crate::models::{NewUser, Task, TaskQuery, TaskUpdate, UserRecord};

/// In-process store. Uniqueness checks and inserts happen under one write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::ValidationError(DUPLICATE_EMAIL_MESSAGE.into()));
        }
        let record = user.into_record();
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, owner: Uuid, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|task| task.owner == owner)
            .filter(|task| query.completed.map_or(true, |c| task.completed == c))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).filter(|task| task.owner == owner).cloned())
    }

    async fn update_task(
        &self,
        owner: Uuid,
        id: Uuid,
        update: TaskUpdate,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&id) {
            Some(task) if task.owner == owner => {
                task.apply(update);
                Ok(Some(task.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_task(&self, owner: Uuid, id: Uuid) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        if tasks.get(&id).map_or(false, |task| task.owner == owner) {
            Ok(tasks.remove(&id))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskInput;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$placeholder".to_string(),
        }
    }

    fn task_for(owner: Uuid, description: &str) -> Task {
        Task::new(
            TaskInput {
                description: description.to_string(),
                completed: false,
            },
            owner,
        )
    }

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        let first = store.insert_user(new_user("a@example.com")).await.unwrap();

        let second = store.insert_user(new_user("a@example.com")).await;
        assert!(matches!(second, Err(AppError::ValidationError(_))));

        let found = store.find_user_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(store.user_count().await, 1);
    }

    #[actix_rt::test]
    async fn test_find_user_by_id() {
        let store = MemoryStore::new();
        let user = store.insert_user(new_user("b@example.com")).await.unwrap();

        assert!(store.find_user_by_id(user.id).await.unwrap().is_some());
        assert!(store.find_user_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_tasks_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let task = store.insert_task(task_for(alice, "Alice's task")).await.unwrap();

        assert!(store.find_task(bob, task.id).await.unwrap().is_none());
        assert!(store
            .update_task(bob, task.id, TaskUpdate::default())
            .await
            .unwrap()
            .is_none());
        assert!(store.delete_task(bob, task.id).await.unwrap().is_none());
        assert!(store
            .list_tasks(bob, &TaskQuery::default())
            .await
            .unwrap()
            .is_empty());

        let deleted = store.delete_task(alice, task.id).await.unwrap();
        assert_eq!(deleted.map(|t| t.id), Some(task.id));
        assert!(store.find_task(alice, task.id).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_list_filters_by_completion() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let open = store.insert_task(task_for(owner, "open")).await.unwrap();
        let done = store.insert_task(task_for(owner, "done")).await.unwrap();
        store
            .update_task(
                owner,
                done.id,
                TaskUpdate {
                    description: None,
                    completed: Some(true),
                },
            )
            .await
            .unwrap();

        let completed = store
            .list_tasks(owner, &TaskQuery { completed: Some(true) })
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, done.id);

        let pending = store
            .list_tasks(owner, &TaskQuery { completed: Some(false) })
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, open.id);

        let all = store.list_tasks(owner, &TaskQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
