use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// Any status may move to any other status; no workflow is enforced.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is yet to be started.
    Open,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        };
        f.write_str(s)
    }
}

/// Payload for creating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskDto {
    /// The title of the task. Must not be empty.
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,

    /// The description of the task. Must not be empty.
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
}

/// Payload for `PATCH /tasks/{id}/status`.
///
/// Unknown status strings are already rejected while deserializing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTaskStatusDto {
    pub status: TaskStatus,
}

/// Query parameters for filtering tasks when listing them.
///
/// Both fields are optional; when both are set a task must match both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GetTasksFilterDto {
    /// Only tasks with exactly this status.
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring of the title or the description.
    /// An empty value is treated as absent; whitespace is searched for literally.
    #[serde(default, deserialize_with = "non_empty")]
    pub search: Option<String>,
}

impl GetTasksFilterDto {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.search.is_none()
    }

    /// Returns `true` if `task` satisfies every populated field of the filter.
    ///
    /// Ownership is not checked here; callers scope by owner first.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            return task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle);
        }
        true
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Identifier of the owning user. Never exposed in responses.
    #[serde(skip_serializing, default)]
    pub user_id: Uuid,
}

impl Task {
    /// Creates a new `OPEN` task owned by `user_id`, with a fresh UUID.
    pub fn new(input: CreateTaskDto, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: TaskStatus::Open,
            user_id,
        }
    }
}
