use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{TasksStore, UsersStore};
use crate::error::AppError;
use crate::models::{CreateTaskDto, GetTasksFilterDto, Task, User};

const TASK_COLUMNS: &str = "id, title, description, status, user_id";

/// PostgreSQL implementation of `UsersStore`.
#[derive(Clone)]
pub struct PgUsersStore {
    pool: PgPool,
}

impl PgUsersStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersStore for PgUsersStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password) VALUES ($1, $2, $3)
             RETURNING id, username, password",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Username already exists".into()),
            other => other,
        })
    }

    async fn find_one(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// PostgreSQL implementation of `TasksStore`.
#[derive(Clone)]
pub struct PgTasksStore {
    pool: PgPool,
}

impl PgTasksStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE metacharacters so the search term is matched literally.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Builds the listing query. Parameter `$1` is always the owner id.
fn get_tasks_sql(filter: &GetTasksFilterDto) -> String {
    let mut sql = format!("SELECT {} FROM tasks WHERE user_id = $1", TASK_COLUMNS);
    let mut param_count = 2;

    if filter.status.is_some() {
        sql.push_str(&format!(" AND status = ${}", param_count));
        param_count += 1;
    }
    if filter.search.is_some() {
        sql.push_str(&format!(
            " AND (title ILIKE ${0} OR description ILIKE ${0})",
            param_count
        ));
    }

    sql
}

#[async_trait]
impl TasksStore for PgTasksStore {
    async fn get_tasks(
        &self,
        filter: &GetTasksFilterDto,
        owner_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let sql = get_tasks_sql(filter);
        let mut query = sqlx::query_as::<_, Task>(&sql).bind(owner_id);

        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(search) = &filter.search {
            query = query.bind(like_pattern(search));
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn find_one(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
            TASK_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn create_task(&self, dto: CreateTaskDto, owner_id: Uuid) -> Result<Task, AppError> {
        let task = Task::new(dto, owner_id);

        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, title, description, status, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.id)
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn save(&self, task: &Task) -> Result<Task, AppError> {
        // Only the status is mutable; ownership stays part of the key.
        let saved = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET status = $1 WHERE id = $2 AND user_id = $3 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(task.status)
        .bind(task.id)
        .bind(task.user_id)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound(format!("Task with ID \"{}\" not found", task.id)))
    }
}
