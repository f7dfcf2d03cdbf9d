use crate::{
    auth::{AuthCredentialsDto, AuthService},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: Account created; empty body.
/// - `409 Conflict`: The username is already taken.
/// - `422 Unprocessable Entity`: Username or password failed validation.
#[post("/signup")]
pub async fn sign_up(
    auth: web::Data<AuthService>,
    credentials: web::Json<AuthCredentialsDto>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;
    auth.sign_up(credentials.into_inner()).await?;

    Ok(HttpResponse::Created().finish())
}

/// Sign in
///
/// ## Responses:
/// - `200 OK`: `{"accessToken": "<jwt>"}`.
/// - `401 Unauthorized`: Unknown username or wrong password.
/// - `422 Unprocessable Entity`: Username or password failed validation.
#[post("/signin")]
pub async fn sign_in(
    auth: web::Data<AuthService>,
    credentials: web::Json<AuthCredentialsDto>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;
    let response = auth.sign_in(credentials.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}
