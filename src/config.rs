use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Upper bound for `JWT_EXPIRES_IN`: ten years, in seconds.
pub const MAX_JWT_EXPIRES_IN: i64 = 10 * 365 * 24 * 60 * 60;

/// Runtime configuration, read from the environment (and `.env` via `dotenv`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_expires_in: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            database_max_connections: parsed_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parsed_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret: required(&lookup, "JWT_SECRET")?,
            jwt_expires_in: token_lifetime(&lookup)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| AppError::InternalServerError(format!("{} must be set", key)))
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} must be a number", key))),
        None => Ok(default),
    }
}

/// Tokens must outlive their signing instant and stay within `MAX_JWT_EXPIRES_IN`.
fn token_lifetime<F>(lookup: &F) -> Result<i64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: i64 = parsed_or(lookup, "JWT_EXPIRES_IN", 3600)?;
    if (1..=MAX_JWT_EXPIRES_IN).contains(&secs) {
        Ok(secs)
    } else {
        Err(AppError::InternalServerError(format!(
            "JWT_EXPIRES_IN must be between 1 and {} seconds",
            MAX_JWT_EXPIRES_IN
        )))
    }
}
