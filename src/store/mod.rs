//! Persistence collaborators for the auth and task services.
//!
//! Services only see the `UsersStore` and `TasksStore` traits; the concrete
//! backend (Postgres in production, in-memory in tests) is injected at startup.
//! Every task operation takes the owner id explicitly so that implementations
//! can apply it as part of the lookup key.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CreateTaskDto, GetTasksFilterDto, Task, User};

pub use memory::{InMemoryTasksStore, InMemoryUsersStore};
pub use postgres::{PgTasksStore, PgUsersStore};

#[async_trait]
pub trait UsersStore: Send + Sync {
    /// Persists a new user. Fails with `AppError::Conflict` if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;

    async fn find_one(&self, username: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait TasksStore: Send + Sync {
    /// Tasks owned by `owner_id` that satisfy `filter`.
    async fn get_tasks(
        &self,
        filter: &GetTasksFilterDto,
        owner_id: Uuid,
    ) -> Result<Vec<Task>, AppError>;

    async fn find_one(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Task>, AppError>;

    /// Inserts a new `OPEN` task for `owner_id` and returns it.
    async fn create_task(&self, dto: CreateTaskDto, owner_id: Uuid) -> Result<Task, AppError>;

    /// Deletes the task matching `(id, owner_id)` and returns the number of rows removed.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<u64, AppError>;

    /// Writes back a previously loaded task, keyed by `(task.id, task.user_id)`.
    async fn save(&self, task: &Task) -> Result<Task, AppError>;
}
