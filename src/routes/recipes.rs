// ABOUTME: Recipe route handlers for recommendations, trending recipes and food search
// ABOUTME: Thin HTTP adapters over the suggestion pipeline and the recipe queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! `POST /api/recommend` never fails once the pantry passes validation; the
//! pipeline substitutes backup recipes for every upstream problem. Trending and
//! search surface their own faults since they have nothing to fall back to.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::messages;
use crate::errors::AppError;
use crate::recipes::RecommendationRequest;
use crate::server::ServerResources;
use crate::utils::json_responses::DataResponse;

/// Body of `POST /api/search`
#[derive(Debug, Default, Deserialize)]
pub struct FoodSearchRequest {
    /// Free-text food name
    #[serde(default)]
    pub query: Option<String>,
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recommend", post(Self::handle_recommend))
            .route("/api/recipes/trending", get(Self::handle_trending))
            .route("/api/search", post(Self::handle_search))
            .with_state(resources)
    }

    /// Handle POST /api/recommend
    async fn handle_recommend(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<RecommendationRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        // An unreadable body has no pantry either
        let Json(request) = body.map_err(|rejection| {
            debug!(%rejection, "Rejected recommendation body");
            AppError::invalid_input(messages::INGREDIENTS_REQUIRED)
        })?;

        let suggestion = resources.pipeline.recommend(&request).await?;

        // Dropping the handle detaches persistence from the response
        drop(suggestion.persistence);

        let count = suggestion.outcome.recipe_count();
        match suggestion.outcome.fallback_reason() {
            None => info!(count, "Serving generated recipes"),
            Some(reason) => info!(count, fallback_reason = %reason, "Serving backup recipes"),
        }

        Ok(Json(DataResponse::new(suggestion.outcome.into_payload())).into_response())
    }

    /// Handle GET /api/recipes/trending
    async fn handle_trending(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let recipes = resources.trending.fetch().await?;
        Ok(Json(DataResponse::new(recipes)).into_response())
    }

    /// Handle POST /api/search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<FoodSearchRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = body.map(|Json(request)| request).unwrap_or_default();
        let results = resources
            .food_search
            .search(request.query.as_deref())
            .await?;
        Ok(Json(results).into_response())
    }
}
