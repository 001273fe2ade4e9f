// ABOUTME: User profile route handlers for profile updates and search history
// ABOUTME: Locates users by email or username and applies partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::constants::messages;
use crate::database::{ProfileUpdate, UserLookup};
use crate::errors::{AppError, AppResult};
use crate::server::ServerResources;
use crate::utils::json_responses::{Acknowledged, DataResponse};
use nutrismart_core::models::{BudgetLevel, Goal};

/// Body of `POST /api/user/profile`
///
/// `email` wins over `username` for locating the account; the rest are the
/// fields to change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub goals: Option<String>,
    pub budget_level: Option<String>,
    pub bio: Option<String>,
    pub pantry: Option<Vec<String>>,
    pub allergies: Option<Vec<String>>,
}

impl ProfileUpdateRequest {
    fn lookup(&self) -> AppResult<UserLookup> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        non_blank(&self.email)
            .map(|email| UserLookup::Email(email.to_lowercase()))
            .or_else(|| non_blank(&self.username).map(UserLookup::Username))
            .ok_or_else(|| AppError::invalid_input(messages::IDENTIFIER_REQUIRED))
    }

    fn update(&self) -> AppResult<ProfileUpdate> {
        Ok(ProfileUpdate {
            profile_image: self.profile_image.clone(),
            goals: self.goals.as_deref().map(str::parse::<Goal>).transpose()?,
            budget_level: self
                .budget_level
                .as_deref()
                .map(str::parse::<BudgetLevel>)
                .transpose()?,
            bio: self.bio.clone(),
            pantry: self.pantry.clone(),
            allergies: self.allergies.clone(),
        })
    }
}

/// Body of `POST /api/user/search-history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHistoryRequest {
    pub username: Option<String>,
    pub query: Option<String>,
}

/// User profile routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/user/profile", post(Self::handle_update_profile))
            .route("/api/user/search-history", post(Self::handle_search_history))
            .with_state(resources)
    }

    /// Handle POST /api/user/profile
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<ProfileUpdateRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;
        let lookup = request.lookup()?;
        let update = request.update()?;

        let user = resources
            .database
            .update_profile(&lookup, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(Json(DataResponse::new(user)).into_response())
    }

    /// Handle POST /api/user/search-history
    ///
    /// A missing username or query, or an unknown user, is a silent no-op.
    async fn handle_search_history(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<SearchHistoryRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = body.map(|Json(request)| request).unwrap_or_default();

        let username = request.username.as_deref().map(str::trim).unwrap_or_default();
        let query = request.query.as_deref().map(str::trim).unwrap_or_default();

        if !username.is_empty() && !query.is_empty() {
            let recorded = resources
                .database
                .append_search_history(username, query)
                .await
                .map_err(|e| AppError::database(messages::HISTORY_SAVE_FAILED).with_source(e))?;

            if !recorded {
                tracing::debug!("Search history skipped for unknown user");
            }
        }

        Ok(Json(Acknowledged::ok()).into_response())
    }
}
