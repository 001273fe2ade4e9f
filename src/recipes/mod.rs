// ABOUTME: Recipe domain: suggestion pipeline, fallback content, parsing, search, and listing
// ABOUTME: Wires prompts, the LLM provider, and the recipe store into request-level operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe suggestions and lookups

/// Static backup recipes
pub mod fallback;
/// Nutrition lookup
pub mod food_search;
/// Model output sanitization and parsing
pub mod parse;
/// Recipe store contract and background saving
pub mod persistence;
/// Generation pipeline
pub mod pipeline;
/// Prompt builders
pub mod prompt;
/// Trending listing
pub mod trending;

use serde::{Deserialize, Serialize};

pub use fallback::fallback_recipes;
pub use food_search::FoodSearchQuery;
pub use persistence::{PersistenceReport, PersistenceTask, RecipeStore};
pub use pipeline::{
    FallbackReason, GenerationOutcome, PipelineConfig, RecipePayload, RecipeSuggestionPipeline,
    Suggestion,
};
pub use trending::TrendingRecipesQuery;

/// Body of `POST /api/recommend`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Free-text pantry contents
    #[serde(default)]
    pub pantry: Option<String>,
    /// Dietary goal
    #[serde(default)]
    pub user_goal: Option<String>,
    /// Budget description
    #[serde(default)]
    pub budget: Option<String>,
}
