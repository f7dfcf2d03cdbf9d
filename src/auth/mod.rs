pub mod extractors;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use token::{Claims, JwtPayload, JwtSigner, TokenSigner};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Credentials submitted to both `/auth/signup` and `/auth/signin`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AuthCredentialsDto {
    /// Between 4 and 20 characters: letters, digits, underscores or hyphens.
    #[validate(
        length(min = 4, max = 20),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Between 8 and 32 characters, see `validate_password_strength`.
    #[validate(
        length(min = 8, max = 32),
        custom = "validate_password_strength"
    )]
    pub password: String,
}

/// Requires an uppercase letter, a lowercase letter, and a digit or symbol.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit_or_symbol = password.chars().any(|c| !c.is_alphabetic());

    if has_upper && has_lower && has_digit_or_symbol && !password.contains('\n') {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some("password is too weak".into());
        Err(err)
    }
}

/// Response body of a successful signin.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The signed JWT to present as `Authorization: Bearer <token>`.
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn credentials(username: &str, password: &str) -> AuthCredentialsDto {
        AuthCredentialsDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_credentials_validation() {
        assert!(credentials("test_user-1", "Password123").validate().is_ok());
        assert!(credentials("test_user", "Pass!word").validate().is_ok());

        // username: too short, too long, bad characters
        assert!(credentials("abc", "Password123").validate().is_err());
        assert!(credentials(&"a".repeat(21), "Password123").validate().is_err());
        assert!(credentials("test user!", "Password123").validate().is_err());

        // password: too short, too long
        assert!(credentials("test_user", "Pa1").validate().is_err());
        assert!(credentials("test_user", &format!("Pa1{}", "a".repeat(30)))
            .validate()
            .is_err());
    }

    #[test]
    fn test_weak_passwords_are_rejected() {
        for weak in ["password123", "PASSWORD123", "Passwordonly"] {
            let errors = credentials("test_user", weak).validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("password"),
                "{} should be rejected",
                weak
            );
        }
    }

    #[test]
    fn test_auth_response_serializes_camel_case() {
        let json = serde_json::to_value(AuthResponse {
            access_token: "token".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "accessToken": "token" }));
    }
}
