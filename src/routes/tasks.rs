use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskDto, GetTasksFilterDto, UpdateTaskStatusDto},
    tasks::TasksService,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// ## Query Parameters:
/// - `status` (optional): `OPEN`, `IN_PROGRESS` or `DONE`.
/// - `search` (optional): case-insensitive substring of the title or description.
///
/// When both are given a task must match both.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `400 Bad Request`: Unknown `status` value.
/// - `401 Unauthorized`: Missing or invalid token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TasksService>,
    filter: web::Query<GetTasksFilterDto>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    filter.validate()?;

    let found = tasks.get_tasks(&filter, &user.0).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// Retrieves a single task.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `404 Not Found`: No task with this ID is owned by the authenticated user.
#[get("/{id}")]
pub async fn get_task_by_id(
    tasks: web::Data<TasksService>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks.get_task_by_id(task_id.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Creates a new task for the authenticated user. New tasks start as `OPEN`.
///
/// ## Request Body:
/// - `title`: non-empty string.
/// - `description`: non-empty string.
///
/// ## Responses:
/// - `201 Created`: The created `Task`, including its generated `id`.
/// - `422 Unprocessable Entity`: Empty title or description.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TasksService>,
    task_data: web::Json<CreateTaskDto>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks.create_task(task_data.into_inner(), &user.0).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `204 No Content`: Deleted.
/// - `404 Not Found`: No task with this ID is owned by the authenticated user.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TasksService>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    tasks.delete_task(task_id.into_inner(), &user.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Changes the status of a task.
///
/// ## Request Body:
/// - `status`: `OPEN`, `IN_PROGRESS` or `DONE`.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `400 Bad Request`: Unknown status value.
/// - `404 Not Found`: No task with this ID is owned by the authenticated user.
#[patch("/{id}/status")]
pub async fn update_task_status(
    tasks: web::Data<TasksService>,
    task_id: web::Path<Uuid>,
    body: web::Json<UpdateTaskStatusDto>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let task = tasks
        .update_task_status(task_id.into_inner(), body.status, &user.0)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}
