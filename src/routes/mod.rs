pub mod auth;
pub mod health;
pub mod tasks;

use std::sync::Arc;

use actix_web::{error, web, HttpRequest};

use crate::auth::{AuthMiddleware, TokenSigner};
use crate::error::AppError;

/// Mounts `/auth` (public) and `/tasks` (behind `AuthMiddleware`).
///
/// `AuthService` and `TasksService` must be registered as `web::Data` on the app.
pub fn config(signer: Arc<dyn TokenSigner>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .service(
                web::scope("/auth")
                    .service(auth::sign_up)
                    .service(auth::sign_in),
            )
            .service(
                web::scope("/tasks")
                    .wrap(AuthMiddleware::new(signer))
                    .service(tasks::get_tasks)
                    .service(tasks::create_task)
                    .service(tasks::get_task_by_id)
                    .service(tasks::update_task_status)
                    .service(tasks::delete_task),
            );
    }
}

// Payloads that fail to parse are reported as `AppError::BadRequest`,
// with the same JSON error body as every other failure.

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: error::PathError, _req: &HttpRequest| {
        AppError::BadRequest(err.to_string()).into()
    })
}
