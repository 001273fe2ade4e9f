// ABOUTME: Recipe suggestion pipeline that turns pantry contents into recipes via the LLM
// ABOUTME: Every failure past input validation degrades to static backup recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Suggestion Pipeline
//!
//! ```text
//! validate -> credential gate -> prompt -> race(generate, timeout)
//!          -> strip fences / parse -> respond -> (detached) persist
//! ```
//!
//! Only input validation can fail the request. An absent credential, an
//! upstream error, a timeout, or unparseable output all produce
//! [`GenerationOutcome::Fallback`] with the reason recorded for logging.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use nutrismart_core::constants::{llm, messages};
use nutrismart_core::models::Recipe;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::fallback::fallback_recipes;
use super::parse::parse_recipes;
use super::persistence::{PersistenceTask, RecipeStore};
use super::prompt::build_recipe_prompt;
use super::RecommendationRequest;
use crate::config::environment::is_usable_api_key;
use crate::config::LlmConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::{ChatRequest, LlmProvider};
use crate::utils::route_timeout::with_upstream_timeout;

/// Settings the pipeline needs, injected at construction
#[derive(Clone)]
pub struct PipelineConfig {
    /// Generation credential
    pub api_key: Option<String>,
    /// Deadline for one generation call
    pub timeout: Duration,
}

impl PipelineConfig {
    /// Derive from the server's LLM settings
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
        }
    }

    /// Whether the credential is present and long enough to try
    #[must_use]
    pub fn has_usable_credential(&self) -> bool {
        is_usable_api_key(self.api_key.as_deref())
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Why backup recipes were served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No usable generation credential configured
    NoCredential,
    /// Generation exceeded the deadline
    Timeout,
    /// Provider returned an error
    UpstreamError,
    /// Provider answer could not be parsed into recipes
    MalformedOutput,
}

impl FallbackReason {
    /// Stable log label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoCredential => "no_credential",
            Self::Timeout => "timeout",
            Self::UpstreamError => "upstream_error",
            Self::MalformedOutput => "malformed_output",
        }
    }

    /// Classify a provider failure
    #[must_use]
    pub const fn from_provider_error(error: &AppError) -> Self {
        match error.code {
            ErrorCode::ExternalTimeout => Self::Timeout,
            _ => Self::UpstreamError,
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Records from the model answer, untouched
    Success(Vec<Value>),
    /// Backup recipes and the reason they were used
    Fallback {
        /// Backup recipes
        recipes: Vec<Recipe>,
        /// Why generation was skipped or failed
        reason: FallbackReason,
    },
}

/// Recipes as sent to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecipePayload {
    /// Model records, serialized exactly as received
    Generated(Vec<Value>),
    /// Backup recipes
    Backup(Vec<Recipe>),
}

impl GenerationOutcome {
    /// Number of recipes the caller receives
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        match self {
            Self::Success(records) => records.len(),
            Self::Fallback { recipes, .. } => recipes.len(),
        }
    }

    /// Consume into the response payload
    #[must_use]
    pub fn into_payload(self) -> RecipePayload {
        match self {
            Self::Success(records) => RecipePayload::Generated(records),
            Self::Fallback { recipes, .. } => RecipePayload::Backup(recipes),
        }
    }

    /// Fallback reason, if any
    #[must_use]
    pub const fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            Self::Success(_) => None,
            Self::Fallback { reason, .. } => Some(*reason),
        }
    }
}

/// A completed recommendation
#[derive(Debug)]
pub struct Suggestion {
    /// What the caller receives
    pub outcome: GenerationOutcome,
    /// Background save of AI recipes; `None` on fallback
    pub persistence: Option<PersistenceTask>,
}

/// Turns recommendation requests into recipes
#[derive(Clone)]
pub struct RecipeSuggestionPipeline {
    config: PipelineConfig,
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn RecipeStore>,
}

impl RecipeSuggestionPipeline {
    /// Assemble a pipeline from its collaborators
    #[must_use]
    pub fn new(
        config: PipelineConfig,
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn RecipeStore>,
    ) -> Self {
        Self {
            config,
            provider,
            store,
        }
    }

    /// Produce recipes for a request
    ///
    /// Must be called from within a tokio runtime; successful generations
    /// spawn their persistence task.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` ("Ingredients required") when the pantry is
    /// absent or blank. Nothing else fails the call.
    #[instrument(skip_all, fields(provider = self.provider.name()))]
    pub async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Suggestion> {
        let pantry = request
            .pantry
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::invalid_input(messages::INGREDIENTS_REQUIRED))?;

        if !self.config.has_usable_credential() {
            warn!(
                fallback_reason = %FallbackReason::NoCredential,
                "GEMINI_API_KEY missing or too short; serving backup recipes"
            );
            return Ok(Self::fallback(pantry, FallbackReason::NoCredential));
        }

        let prompt = build_recipe_prompt(request);
        let chat = ChatRequest::from_prompt(prompt).with_temperature(llm::RECIPE_TEMPERATURE);

        let text = match with_upstream_timeout(
            self.provider.display_name(),
            self.config.timeout,
            self.provider.complete(&chat),
        )
        .await
        {
            Ok(response) => {
                debug!(
                    model = %response.model,
                    finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
                    total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
                    "Model answered"
                );
                response.content
            }
            Err(e) => {
                let reason = FallbackReason::from_provider_error(&e);
                warn!(fallback_reason = %reason, error = %e, "Recipe generation failed; serving backup recipes");
                return Ok(Self::fallback(pantry, reason));
            }
        };

        let records = match parse_recipes(&text) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    fallback_reason = %FallbackReason::MalformedOutput,
                    error = %e,
                    output_chars = text.len(),
                    "Unusable model output; serving backup recipes"
                );
                return Ok(Self::fallback(pantry, FallbackReason::MalformedOutput));
            }
        };

        info!(count = records.len(), "Generated recipes");
        let persistence = PersistenceTask::spawn(Arc::clone(&self.store), records.clone());

        Ok(Suggestion {
            outcome: GenerationOutcome::Success(records),
            persistence: Some(persistence),
        })
    }

    fn fallback(pantry: &str, reason: FallbackReason) -> Suggestion {
        Suggestion {
            outcome: GenerationOutcome::Fallback {
                recipes: fallback_recipes(pantry),
                reason,
            },
            persistence: None,
        }
    }
}
