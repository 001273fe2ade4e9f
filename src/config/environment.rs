// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use anyhow::{bail, Context, Result};
use nutrismart_core::constants::{auth, database, llm, network};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx connection URL (`sqlite:./data/nutrismart.db`, `sqlite::memory:`)
    pub url: String,
}

impl DatabaseConfig {
    /// Whether the database lives only in process memory
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Token signing and password hashing settings
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiry_secs: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Whether `jwt_secret` was generated for this process
    pub secret_generated: bool,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_secs", &self.jwt_expiry_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("secret_generated", &self.secret_generated)
            .finish()
    }
}

/// Generative text service settings
#[derive(Clone)]
pub struct LlmConfig {
    /// Gemini API key; absence is a supported mode
    pub api_key: Option<String>,
    /// Model id
    pub model: String,
    /// REST base URL
    pub base_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

/// Load `.env` from the working directory (or a parent) into the process environment
///
/// Variables already set win over the file. Returns the loaded path.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Whether a key is present and long enough to be worth sending upstream
#[must_use]
pub fn is_usable_api_key(key: Option<&str>) -> bool {
    key.is_some_and(|key| key.len() >= llm::MIN_API_KEY_LENGTH)
}

impl LlmConfig {
    /// Whether the configured key passes [`is_usable_api_key`]
    #[must_use]
    pub fn has_usable_key(&self) -> bool {
        is_usable_api_key(self.api_key.as_deref())
    }

    /// Timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP surface settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Allowed CORS origins; `["*"]` allows any
    pub cors_origins: Vec<String>,
    /// Request body limit in megabytes
    pub body_limit_mb: usize,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment mode
    pub environment: Environment,
    /// HTTP surface
    pub http: HttpConfig,
    /// Database
    pub database: DatabaseConfig,
    /// Authentication
    pub auth: AuthConfig,
    /// Generative text service
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or validation fails
    pub fn from_env() -> Result<Self> {
        if load_dotenv().is_none() {
            debug!("No .env file loaded; using process environment only");
        }

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT")
                .or_else(|_| env::var("NODE_ENV"))
                .unwrap_or_default(),
        );

        let (jwt_secret, secret_generated) = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => (secret, false),
            _ if environment.is_production() => {
                bail!("JWT_SECRET must be set in production");
            }
            _ => {
                warn!("JWT_SECRET not set; generated a per-process secret (tokens will not survive restarts)");
                (generate_secret(), true)
            }
        };

        let config = Self {
            environment,
            http: HttpConfig {
                host: env_var_or("HOST", network::DEFAULT_HOST),
                port: env_var_or("PORT", &network::DEFAULT_HTTP_PORT.to_string())
                    .parse()
                    .context("Invalid PORT value")?,
                cors_origins: parse_origins(&env_var_or(
                    "CORS_ORIGINS",
                    network::DEFAULT_CORS_ORIGIN,
                )),
                body_limit_mb: env_var_or(
                    "BODY_LIMIT_MB",
                    &network::DEFAULT_BODY_LIMIT_MB.to_string(),
                )
                .parse()
                .context("Invalid BODY_LIMIT_MB value")?,
            },
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", database::DEFAULT_DATABASE_URL),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_secs: env_var_or(
                    "JWT_EXPIRY_SECS",
                    &auth::DEFAULT_JWT_EXPIRY_SECS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_SECS value")?,
                bcrypt_cost: env_var_or("BCRYPT_COST", &auth::DEFAULT_BCRYPT_COST.to_string())
                    .parse()
                    .context("Invalid BCRYPT_COST value")?,
                secret_generated,
            },
            llm: LlmConfig {
                api_key: env::var("GEMINI_API_KEY")
                    .ok()
                    .map(|key| key.trim().to_owned())
                    .filter(|key| !key.is_empty()),
                model: env_var_or("GEMINI_MODEL", llm::DEFAULT_GEMINI_MODEL),
                base_url: env_var_or("GEMINI_BASE_URL", llm::GEMINI_API_BASE_URL),
                timeout_secs: env_var_or(
                    "LLM_TIMEOUT_SECS",
                    &llm::DEFAULT_LLM_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid LLM_TIMEOUT_SECS value")?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.http.port == 0 {
            bail!("PORT must be non-zero");
        }
        if self.llm.timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be non-zero");
        }
        if self.auth.jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }
        if !(1..=auth::MAX_JWT_EXPIRY_SECS).contains(&self.auth.jwt_expiry_secs) {
            bail!(
                "JWT_EXPIRY_SECS must be between 1 and {}",
                auth::MAX_JWT_EXPIRY_SECS
            );
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }
        if self.http.body_limit_mb == 0 {
            bail!("BODY_LIMIT_MB must be non-zero");
        }

        if self.llm.api_key.is_some() && !self.llm.has_usable_key() {
            warn!(
                "GEMINI_API_KEY is shorter than {} characters; AI generation is disabled",
                llm::MIN_API_KEY_LENGTH
            );
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "NutriSmart Server Configuration: environment={}, bind={}:{}, database={}, \
             gemini={} (model {}, timeout {}s), cors=[{}], jwt_secret={}",
            self.environment,
            self.http.host,
            self.http.port,
            if self.database.is_memory() {
                "SQLite (memory)"
            } else {
                "SQLite (file)"
            },
            if self.llm.has_usable_key() {
                "enabled"
            } else {
                "fallback only"
            },
            self.llm.model,
            self.llm.timeout_secs,
            self.http.cors_origins.join(","),
            if self.auth.secret_generated {
                "generated"
            } else {
                "configured"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn generate_secret() -> String {
    let mut bytes = [0_u8; auth::GENERATED_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "ENVIRONMENT",
        "NODE_ENV",
        "HOST",
        "PORT",
        "DATABASE_URL",
        "JWT_SECRET",
        "JWT_EXPIRY_SECS",
        "BCRYPT_COST",
        "GEMINI_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_BASE_URL",
        "LLM_TIMEOUT_SECS",
        "CORS_ORIGINS",
        "BODY_LIMIT_MB",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    #[serial]
    fn test_defaults_without_environment() {
        clear_env();
        let config = ServerConfig::from_env().unwrap();

        assert_eq!(config.http.port, network::DEFAULT_HTTP_PORT);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.llm.timeout_secs, 15);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.llm.api_key.is_none());
        assert!(!config.llm.has_usable_key());
        assert!(config.auth.secret_generated);
        assert_eq!(config.auth.jwt_secret.len(), auth::GENERATED_SECRET_BYTES * 2);
    }

    #[test]
    #[serial]
    fn test_overrides_from_environment() {
        clear_env();
        env::set_var("PORT", "8088");
        env::set_var("GEMINI_API_KEY", "  abcdefghijklmnop ");
        env::set_var("LLM_TIMEOUT_SECS", "3");
        env::set_var("JWT_SECRET", "configured-secret");
        env::set_var("CORS_ORIGINS", "*");

        let config = ServerConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.http.port, 8088);
        assert_eq!(config.llm.api_key.as_deref(), Some("abcdefghijklmnop"));
        assert!(config.llm.has_usable_key());
        assert_eq!(config.llm.timeout(), Duration::from_secs(3));
        assert!(!config.auth.secret_generated);
        assert_eq!(config.http.cors_origins, vec!["*"]);
    }

    #[test]
    #[serial]
    fn test_short_key_is_not_usable() {
        clear_env();
        env::set_var("GEMINI_API_KEY", "short");
        let config = ServerConfig::from_env().unwrap();
        clear_env();

        assert!(config.llm.api_key.is_some());
        assert!(!config.llm.has_usable_key());
    }

    #[test]
    #[serial]
    fn test_production_requires_jwt_secret() {
        clear_env();
        env::set_var("NODE_ENV", "production");
        let result = ServerConfig::from_env();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_validation_rejects_zero_timeout() {
        clear_env();
        env::set_var("LLM_TIMEOUT_SECS", "0");
        let result = ServerConfig::from_env();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_validation_bounds_jwt_expiry() {
        clear_env();
        env::set_var("JWT_EXPIRY_SECS", "9223372036854775807");
        let oversized = ServerConfig::from_env();
        env::set_var("JWT_EXPIRY_SECS", "0");
        let zero = ServerConfig::from_env();
        env::set_var("JWT_EXPIRY_SECS", "86400");
        let day = ServerConfig::from_env();
        clear_env();

        assert!(oversized.is_err());
        assert!(zero.is_err());
        assert_eq!(day.unwrap().auth.jwt_expiry_secs, 86_400);
    }

    #[test]
    #[serial]
    fn test_summary_and_debug_hide_secrets() {
        clear_env();
        env::set_var("GEMINI_API_KEY", "super-secret-gemini-key");
        env::set_var("JWT_SECRET", "super-secret-jwt");
        let config = ServerConfig::from_env().unwrap();
        clear_env();

        let summary = config.summary();
        let debug = format!("{config:?}");
        for rendered in [summary, debug] {
            assert!(!rendered.contains("super-secret-gemini-key"));
            assert!(!rendered.contains("super-secret-jwt"));
        }
    }
}
