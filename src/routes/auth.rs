// ABOUTME: User authentication route handlers for registration, login and session lookup
// ABOUTME: AuthService holds the account logic; AuthRoutes adapts it to HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes
//!
//! Handlers are thin wrappers that delegate to [`AuthService`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthManager;
use crate::constants::messages;
use crate::database::{Database, NewUser, UserLookup};
use crate::errors::{AppError, AppResult};
use crate::server::ServerResources;
use crate::utils::auth::extract_bearer_token_from_option;
use crate::utils::json_responses::DataResponse;
use nutrismart_core::models::{UserProfile, UserSummary};

/// User registration request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Display and lookup name
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: UserSummary,
}

/// User login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User login response; carries the full profile for the client
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    database: Arc<Database>,
    auth_manager: Arc<AuthManager>,
}

impl AuthService {
    #[must_use]
    pub const fn new(database: Arc<Database>, auth_manager: Arc<AuthManager>) -> Self {
        Self {
            database,
            auth_manager,
        }
    }

    /// Register a new account and open a session for it
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank username, blank password or bad
    /// email, and `ResourceAlreadyExists` when the username or email is taken
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<RegisterResponse> {
        let username = request.username.trim();
        let email = request.email.trim().to_lowercase();
        tracing::info!("User registration attempt for username: {username}");

        if username.is_empty() {
            return Err(AppError::invalid_input("Username is required"));
        }
        if !Self::is_valid_email(&email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }
        if request.password.is_empty() {
            return Err(AppError::invalid_input("Password is required"));
        }

        if self.database.user_exists(username, Some(&email)).await? {
            return Err(AppError::already_exists(messages::USER_EXISTS));
        }

        let password_hash = self.auth_manager.hash_password(&request.password).await?;
        let user = self
            .database
            .create_user(&NewUser {
                username: username.to_owned(),
                email: Some(email),
                password_hash,
            })
            .await?;

        let token = self.auth_manager.generate_token(&user)?;
        tracing::info!("User registered successfully: {} ({})", user.username, user.id);

        Ok(RegisterResponse {
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Verify credentials and open a session
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` ("Invalid Credentials") for an unknown email or a
    /// wrong password
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let email = request.email.trim().to_lowercase();

        let Some(record) = self.database.find_user(&UserLookup::Email(email)).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(AppError::auth_invalid(messages::INVALID_CREDENTIALS));
        };

        if !self
            .auth_manager
            .verify_password(&request.password, &record.password_hash)
            .await?
        {
            tracing::warn!("Invalid password for user: {}", record.profile.id);
            return Err(AppError::auth_invalid(messages::INVALID_CREDENTIALS));
        }

        let token = self.auth_manager.generate_token(&record.profile)?;
        tracing::info!("User logged in successfully: {}", record.profile.id);

        Ok(LoginResponse {
            token,
            user: record.profile,
        })
    }

    /// Resolve the profile behind a bearer token
    ///
    /// # Errors
    ///
    /// Returns an auth error for a missing or invalid token and `NotFound`
    /// when the account no longer exists
    pub async fn current_user(&self, auth_header: Option<&str>) -> AppResult<UserProfile> {
        let token = extract_bearer_token_from_option(auth_header)?;
        let claims = self.auth_manager.validate_token(token)?;
        let user_id = claims.user_id()?;

        self.database
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        email[at_pos + 1..].contains('.')
    }
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    fn service(resources: &ServerResources) -> AuthService {
        AuthService::new(
            Arc::clone(&resources.database),
            Arc::clone(&resources.auth_manager),
        )
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;
        let response = Self::service(&resources).register(&request).await?;
        Ok(Json(response).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;
        let response = Self::service(&resources).login(&request).await?;
        Ok(Json(response).into_response())
    }

    /// Handle GET /api/auth/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth_header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
        let user = Self::service(&resources).current_user(auth_header).await?;
        Ok(Json(DataResponse::new(user)).into_response())
    }
}
