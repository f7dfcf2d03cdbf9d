pub mod task;
pub mod user;

pub use task::{CreateTaskDto, GetTasksFilterDto, Task, TaskStatus, UpdateTaskStatusDto};
pub use user::User;
