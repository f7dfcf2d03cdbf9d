use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CreateTaskDto, GetTasksFilterDto, Task, TaskStatus, User};
use crate::store::TasksStore;

/// Task CRUD, always scoped to the calling user.
///
/// A task that exists but belongs to somebody else is reported exactly like
/// a task that does not exist.
pub struct TasksService {
    tasks: Arc<dyn TasksStore>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Task with ID \"{}\" not found", id))
}

impl TasksService {
    pub fn new(tasks: Arc<dyn TasksStore>) -> Self {
        Self { tasks }
    }

    /// Lists the owner's tasks matching `filter`; an empty filter lists them all.
    pub async fn get_tasks(
        &self,
        filter: &GetTasksFilterDto,
        owner: &User,
    ) -> Result<Vec<Task>, AppError> {
        log::debug!(
            "User \"{}\" retrieving tasks. Filters: {:?}",
            owner.username,
            filter
        );

        self.tasks.get_tasks(filter, owner.id).await.map_err(|e| {
            log::error!(
                "Failed to get tasks for user \"{}\". Filters: {:?}: {}",
                owner.username,
                filter,
                e
            );
            e
        })
    }

    pub async fn get_task_by_id(&self, id: Uuid, owner: &User) -> Result<Task, AppError> {
        self.tasks
            .find_one(id, owner.id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates an `OPEN` task owned by `owner`.
    pub async fn create_task(&self, dto: CreateTaskDto, owner: &User) -> Result<Task, AppError> {
        let task = self.tasks.create_task(dto, owner.id).await?;
        log::debug!("User \"{}\" created task {}", owner.username, task.id);
        Ok(task)
    }

    pub async fn delete_task(&self, id: Uuid, owner: &User) -> Result<(), AppError> {
        let affected = self.tasks.delete(id, owner.id).await?;
        if affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Sets the status of an owned task. Any status may follow any other.
    pub async fn update_task_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        owner: &User,
    ) -> Result<Task, AppError> {
        let mut task = self.get_task_by_id(id, owner).await?;
        task.status = status;
        log::debug!("User \"{}\" set task {} to {}", owner.username, id, status);
        self.tasks.save(&task).await
    }
}
