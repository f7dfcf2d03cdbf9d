use std::sync::Arc;

use super::password::{hash_password, verify_password};
use super::token::{JwtPayload, TokenSigner};
use super::{AuthCredentialsDto, AuthResponse};
use crate::error::AppError;
use crate::models::User;
use crate::store::UsersStore;

const INVALID_CREDENTIALS: &str = "Please check your login credentials";

/// Signup, signin and token-to-user resolution.
///
/// Holds no state of its own beyond its collaborators, so a single instance
/// is shared across all workers.
pub struct AuthService {
    users: Arc<dyn UsersStore>,
    signer: Arc<dyn TokenSigner>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UsersStore>, signer: Arc<dyn TokenSigner>) -> Self {
        Self { users, signer }
    }

    /// The signer used for issuing tokens; the request guard verifies with the same one.
    pub fn signer(&self) -> Arc<dyn TokenSigner> {
        Arc::clone(&self.signer)
    }

    /// Creates a user with a bcrypt-hashed password.
    ///
    /// Fails with `AppError::Conflict` if the username is already taken.
    pub async fn sign_up(&self, credentials: AuthCredentialsDto) -> Result<(), AppError> {
        let password_hash = hash_password(&credentials.password)?;
        let user = self
            .users
            .create_user(&credentials.username, &password_hash)
            .await?;

        log::info!("User \"{}\" signed up", user.username);
        Ok(())
    }

    /// Checks the credentials and issues an access token for `{username}`.
    ///
    /// Unknown usernames and wrong passwords fail with the same
    /// `AppError::Unauthorized`.
    pub async fn sign_in(&self, credentials: AuthCredentialsDto) -> Result<AuthResponse, AppError> {
        let user = self.users.find_one(&credentials.username).await?;

        let authenticated = match &user {
            Some(user) => verify_password(&credentials.password, &user.password)?,
            None => false,
        };

        if !authenticated {
            log::warn!("Failed signin attempt for \"{}\"", credentials.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let payload = JwtPayload {
            username: credentials.username,
        };
        let access_token = self.signer.sign(&payload)?;

        log::info!("User \"{}\" signed in", payload.username);
        Ok(AuthResponse { access_token })
    }

    /// Resolves verified token claims to the user they name.
    pub async fn validate_claims(&self, payload: &JwtPayload) -> Result<User, AppError> {
        self.users
            .find_one(&payload.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))
    }
}
