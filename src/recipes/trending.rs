// ABOUTME: Trending recipes listing over the recipe store
// ABOUTME: Returns the newest persisted recipes up to a fixed limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use nutrismart_core::constants::{messages, recipes::TRENDING_RECIPE_LIMIT};
use nutrismart_core::models::Recipe;
use tracing::error;

use super::persistence::RecipeStore;
use crate::errors::{AppError, AppResult};

/// Newest-first listing of saved recipes
#[derive(Clone)]
pub struct TrendingRecipesQuery {
    store: Arc<dyn RecipeStore>,
}

impl TrendingRecipesQuery {
    /// Create a listing over `store`
    #[must_use]
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Fetch the most recent recipes
    ///
    /// # Errors
    ///
    /// Returns a `DatabaseError` with the message "Fetch failed" when the store fails
    pub async fn fetch(&self) -> AppResult<Vec<Recipe>> {
        self.store
            .list_recent_recipes(TRENDING_RECIPE_LIMIT)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load trending recipes");
                AppError::database(messages::FETCH_FAILED).with_source(e)
            })
    }
}
