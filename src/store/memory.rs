use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TasksStore, UsersStore};
use crate::error::AppError;
use crate::models::{CreateTaskDto, GetTasksFilterDto, Task, User};

/// In-memory `UsersStore`, with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct InMemoryUsersStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUsersStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UsersStore for InMemoryUsersStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict("Username already exists".into()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: password_hash.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_one(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

/// In-memory `TasksStore`. Tasks are kept in insertion order.
#[derive(Default)]
pub struct InMemoryTasksStore {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTasksStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored task regardless of owner.
    pub async fn all(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }
}

#[async_trait]
impl TasksStore for InMemoryTasksStore {
    async fn get_tasks(
        &self,
        filter: &GetTasksFilterDto,
        owner_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|t| t.user_id == owner_id && filter.matches(t))
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == owner_id)
            .cloned())
    }

    async fn create_task(&self, dto: CreateTaskDto, owner_id: Uuid) -> Result<Task, AppError> {
        let task = Task::new(dto, owner_id);
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<u64, AppError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.user_id == owner_id));
        Ok((before - tasks.len()) as u64)
    }

    async fn save(&self, task: &Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks
            .iter_mut()
            .find(|t| t.id == task.id && t.user_id == task.user_id)
        {
            Some(stored) => {
                stored.status = task.status;
                Ok(stored.clone())
            }
            None => Err(AppError::NotFound(format!(
                "Task with ID \"{}\" not found",
                task.id
            ))),
        }
    }
}
