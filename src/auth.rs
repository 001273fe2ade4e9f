// ABOUTME: Authentication manager for password hashing and JWT session tokens
// ABOUTME: Issues and validates HS256 tokens and hashes passwords off the async runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Passwords are hashed with bcrypt on the blocking pool so a slow hash never
//! stalls request handling. Sessions are stateless HS256 JWTs carrying the
//! user id and username.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use nutrismart_core::models::UserProfile;

/// Token validation failures with enough detail for logs
#[derive(Debug, Clone, thiserror::Error)]
pub enum JwtValidationError {
    /// Token has expired
    #[error("JWT token expired at {expired_at}")]
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature or claims are invalid
    #[error("JWT token is invalid: {reason}")]
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is not a well-formed JWT
    #[error("JWT token is malformed: {details}")]
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        let code = match &error {
            JwtValidationError::TokenExpired { .. } => ErrorCode::AuthExpired,
            JwtValidationError::TokenInvalid { .. } => ErrorCode::AuthInvalid,
            JwtValidationError::TokenMalformed { .. } => ErrorCode::AuthMalformed,
        };
        Self::new(code, error.to_string())
    }
}

/// `JWT` claims for user sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if the subject is not a UUID
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AppError::auth_invalid("Token subject is not a user id").with_source(e))
    }
}

/// Password hashing and token issuance
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
    bcrypt_cost: u32,
}

impl AuthManager {
    /// Build a manager from the auth configuration
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_secs: config.jwt_expiry_secs,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Hash a password with the configured bcrypt cost
    ///
    /// # Errors
    ///
    /// Returns an internal error if hashing fails or the blocking task panics
    pub async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(&password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Check a password against a stored bcrypt hash
    ///
    /// A corrupt stored hash counts as a mismatch.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the blocking task panics
    pub async fn verify_password(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;

        Ok(verified.unwrap_or_else(|e| {
            tracing::warn!("Stored password hash could not be verified: {e}");
            false
        }))
    }

    /// Issue a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an internal error if the lifetime overflows or encoding fails
    pub fn generate_token(&self, user: &UserProfile) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_seconds(self.expiry_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AppError::internal("Token lifetime is out of range"))?;
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] for expired, tampered or malformed tokens
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
                Err(self.expired(token))
            }
            Err(e) => Err(Self::convert_jwt_error(&e)),
        }
    }

    /// Signature already verified; re-read the claims to report the real expiry
    fn expired(&self, token: &str) -> JwtValidationError {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let expired_at = decode::<Claims>(token, &self.decoding_key, &validation)
            .ok()
            .and_then(|data| DateTime::from_timestamp(data.claims.exp, 0))
            .unwrap_or_else(Utc::now);
        tracing::debug!(%expired_at, "JWT token expired");

        JwtValidationError::TokenExpired { expired_at }
    }

    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::debug!("JWT token validation failed: {e:?}");

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrismart_core::models::{BudgetLevel, Goal};

    fn test_config(expiry_secs: i64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret-with-enough-entropy".into(),
            jwt_expiry_secs: expiry_secs,
            bcrypt_cost: 4,
            secret_generated: false,
        }
    }

    fn test_user() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            username: "chef".into(),
            email: Some("chef@example.com".into()),
            profile_image: None,
            bio: "Ready to cook smarter!".into(),
            goals: Goal::Balanced,
            allergies: Vec::new(),
            budget_level: BudgetLevel::Medium,
            pantry: Vec::new(),
            search_history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_password_hash_round_trip() {
        let manager = AuthManager::new(&test_config(3600));
        let hash = manager.hash_password("hunter22").await.unwrap();

        assert_ne!(hash, "hunter22");
        assert!(manager.verify_password("hunter22", &hash).await.unwrap());
        assert!(!manager.verify_password("hunter23", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_a_mismatch() {
        let manager = AuthManager::new(&test_config(3600));
        assert!(!manager.verify_password("pw", "not-a-bcrypt-hash").await.unwrap());
    }

    #[test]
    fn test_token_carries_user_identity() {
        let manager = AuthManager::new(&test_config(3600));
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "chef");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = AuthManager::new(&test_config(-120));
        let token = manager.generate_token(&test_user()).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtValidationError::TokenExpired { .. }));
        assert_eq!(AppError::from(err).code, ErrorCode::AuthExpired);
    }

    #[test]
    fn test_oversized_lifetime_is_an_error() {
        let manager = AuthManager::new(&test_config(i64::MAX));
        let err = manager.generate_token(&test_user()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let issuer = AuthManager::new(&test_config(3600));
        let mut other = test_config(3600);
        other.jwt_secret = "a-completely-different-secret".into();
        let verifier = AuthManager::new(&other);

        let token = issuer.generate_token(&test_user()).unwrap();
        let err = verifier.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtValidationError::TokenInvalid { .. }));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let manager = AuthManager::new(&test_config(3600));
        let err = manager.validate_token("not.a.jwt").unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::AuthMalformed);
    }
}
