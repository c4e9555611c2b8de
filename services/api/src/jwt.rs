//! JWT service for token generation and validation
//!
//! Tokens are stateless: an HS256 signature over the user id and an absolute
//! expiry. There is no server-side revocation, a token stays valid until it
//! expires.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::Error as JwtError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default token lifetime in seconds (24 hours)
pub const DEFAULT_TOKEN_EXPIRY: u64 = 86_400;

/// Longest accepted token lifetime in seconds (one year)
pub const MAX_TOKEN_EXPIRY: u64 = 365 * 86_400;

/// Errors raised by the credential service
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Bad signature, malformed structure, or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Failed to hash password: {0}")]
    Hashing(String),

    #[error("Failed to sign token: {0}")]
    Signing(#[source] JwtError),

    #[error("Credential configuration error: {0}")]
    Configuration(String),
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Token expiration time in seconds (default: 24 hours)
    pub token_expiry: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: HMAC signing secret (required, must not be empty)
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 86400, at most one year)
    pub fn from_env() -> Result<Self, CredentialError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| {
            CredentialError::Configuration("JWT_SECRET environment variable not set".to_string())
        })?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY);
        checked_expiry(token_expiry)?;

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// Token lifetime as a signed offset, if it is within `1..=MAX_TOKEN_EXPIRY`
fn checked_expiry(token_expiry: u64) -> Result<i64, CredentialError> {
    if token_expiry == 0 || token_expiry > MAX_TOKEN_EXPIRY {
        return Err(CredentialError::Configuration(format!(
            "JWT_TOKEN_EXPIRY must be between 1 and {MAX_TOKEN_EXPIRY} seconds, got {token_expiry}"
        )));
    }

    i64::try_from(token_expiry)
        .map_err(|_| CredentialError::Configuration("JWT_TOKEN_EXPIRY out of range".to_string()))
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (hex ObjectId)
    pub sub: String,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: i64,
}

impl JwtService {
    /// Initialize a new JWT service
    ///
    /// An empty secret would sign every token with an empty key, so it is
    /// rejected here instead of at the first request.
    pub fn new(config: JwtConfig) -> Result<Self, CredentialError> {
        if config.secret.trim().is_empty() {
            return Err(CredentialError::Configuration(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        let token_expiry = checked_expiry(config.token_expiry)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(JwtService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            token_expiry,
        })
    }

    /// Issue a token for a user
    pub fn issue_token(&self, user_id: &str) -> Result<String, CredentialError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.token_expiry,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(CredentialError::Signing)
    }

    /// Validate a token and return the user id it was issued for
    pub fn validate_token(&self, token: &str) -> Result<String, CredentialError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| CredentialError::InvalidToken)?;

        Ok(token_data.claims.sub)
    }
}
