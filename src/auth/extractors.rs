use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::auth::service::AuthService;
use crate::auth::token::JwtPayload;
use crate::error::AppError;
use crate::models::User;

/// The user named by the request's verified access token.
///
/// Only usable on routes wrapped in `AuthMiddleware`, which verifies the token
/// and leaves its `JwtPayload` in the request extensions. The user is then
/// loaded through `AuthService::validate_claims`, so a token for a user that
/// no longer exists is rejected with `Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtPayload>().cloned();
        let auth = req.app_data::<web::Data<AuthService>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(|| {
                AppError::Unauthorized(
                    "No verified token on request. Ensure AuthMiddleware is active.".to_string(),
                )
            })?;
            let auth = auth.ok_or_else(|| {
                AppError::InternalServerError("AuthService is not registered".to_string())
            })?;

            let user = auth.validate_claims(&claims).await?;
            Ok::<_, ActixError>(AuthenticatedUser(user))
        })
    }
}
