// ABOUTME: Nutrition lookup for a free-text food query backed by the LLM
// ABOUTME: Missing credentials and failures become single placeholder rows instead of errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use nutrismart_core::constants::messages;
use nutrismart_core::models::FoodSearchResult;
use tracing::{debug, instrument, warn};

use super::parse::parse_food_results;
use super::pipeline::PipelineConfig;
use super::prompt::build_food_search_prompt;
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatRequest, LlmProvider};
use crate::utils::route_timeout::with_upstream_timeout;

/// Food search backed by a generation provider
#[derive(Clone)]
pub struct FoodSearchQuery {
    config: PipelineConfig,
    provider: Arc<dyn LlmProvider>,
}

impl FoodSearchQuery {
    /// Create a search over `provider`
    #[must_use]
    pub fn new(config: PipelineConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self { config, provider }
    }

    /// Look up nutrition facts for `query`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the query is absent or blank
    #[instrument(skip(self))]
    pub async fn search(&self, query: Option<&str>) -> AppResult<Vec<FoodSearchResult>> {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::invalid_input(messages::QUERY_REQUIRED))?;

        if !self.config.has_usable_credential() {
            debug!("No usable credential; returning mock food data");
            return Ok(vec![FoodSearchResult::mock(query)]);
        }

        let chat = ChatRequest::from_prompt(build_food_search_prompt(query));
        let result = with_upstream_timeout(
            self.provider.display_name(),
            self.config.timeout,
            self.provider.complete(&chat),
        )
        .await;

        let parsed = match result {
            Ok(response) => parse_food_results(&response.content).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        Ok(parsed.unwrap_or_else(|error| {
            warn!(%error, "Food search failed");
            vec![FoodSearchResult::failed(query)]
        }))
    }
}
