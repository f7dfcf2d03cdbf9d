use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// The application-level content of an access token.
///
/// Only the username is carried; no password material or other PII.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtPayload {
    pub username: String,
}

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Signs and verifies access tokens.
///
/// `AuthService` builds the payload; implementations own the algorithm,
/// the secret and the expiry policy.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, payload: &JwtPayload) -> Result<String, AppError>;

    /// Returns the payload of a well-formed, correctly signed, unexpired token.
    /// Every other outcome is `AppError::Unauthorized`.
    fn verify(&self, token: &str) -> Result<JwtPayload, AppError>;
}

/// HS256 `TokenSigner` backed by `jsonwebtoken`.
pub struct JwtSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token lifetime in seconds.
    expires_in: i64,
}

impl JwtSigner {
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in: expires_in_secs,
        }
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, payload: &JwtPayload) -> Result<String, AppError> {
        let iat = chrono::Utc::now().timestamp();
        let exp = iat
            .checked_add(self.expires_in)
            .filter(|exp| *exp > iat)
            .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

        let claims = Claims {
            username: payload.username.clone(),
            iat,
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<JwtPayload, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(JwtPayload {
            username: data.claims.username,
        })
    }
}
