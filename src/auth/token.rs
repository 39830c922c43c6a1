use crate::config::Config;
use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Access tokens expire 30 minutes after issuance. There is no refresh
/// mechanism; expired clients log in again.
const ACCESS_TOKEN_TTL_SECS: i64 = 30 * 60;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the authenticated username.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Signing and verification material, built once from [`Config`] at startup
/// and shared immutably via `web::Data`. No component reads the secret from
/// the environment after construction.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &str, algorithm: Algorithm) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(algorithm),
            validation: Validation::new(algorithm),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_algorithm)
    }

    /// Issues a signed token for `username`, expiring in 30 minutes.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::seconds(ACCESS_TOKEN_TTL_SECS))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: username.to_owned(),
            exp: expiration,
        };

        encode(&self.header, &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))
    }

    /// Verifies a token's signature and expiry and decodes its claims.
    ///
    /// Any malformed token, signature mismatch, or expired token comes back
    /// as `AppError::Unauthorized`; callers treat it as "not authenticated".
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}
