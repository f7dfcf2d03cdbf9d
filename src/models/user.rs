use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. Created on signup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// bcrypt hash of the password, never the plaintext.
    #[serde(skip_serializing)]
    pub password: String,
}
