// ABOUTME: Integration tests for the recipe suggestion pipeline without HTTP
// ABOUTME: Asserts generation outcomes, fallback reasons and background persistence reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::mock_llm::{FailingRecipeStore, MockLlmProvider, TWO_RECIPES_JSON};
use helpers::test_utils::TEST_API_KEY;
use nutrismart_server::database::Database;
use nutrismart_server::errors::ErrorCode;
use nutrismart_server::llm::LlmProvider;
use nutrismart_server::recipes::{
    fallback_recipes, FallbackReason, GenerationOutcome, PipelineConfig, RecipePayload,
    RecipeStore, RecipeSuggestionPipeline, RecommendationRequest,
};
use serde_json::{json, Value};

fn config(api_key: Option<&str>, timeout: Duration) -> PipelineConfig {
    PipelineConfig {
        api_key: api_key.map(str::to_owned),
        timeout,
    }
}

fn request(pantry: &str) -> RecommendationRequest {
    RecommendationRequest {
        pantry: Some(pantry.to_owned()),
        user_goal: Some("balanced".to_owned()),
        budget: None,
    }
}

async fn memory_store() -> Arc<Database> {
    Arc::new(Database::new("sqlite::memory:").await.unwrap())
}

fn pipeline(
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn RecipeStore>,
    api_key: Option<&str>,
    timeout: Duration,
) -> RecipeSuggestionPipeline {
    RecipeSuggestionPipeline::new(config(api_key, timeout), provider, store)
}

#[tokio::test]
async fn test_fallback_reasons_follow_the_trigger() {
    let store: Arc<dyn RecipeStore> = memory_store().await;
    let cases: Vec<(Arc<MockLlmProvider>, Option<&str>, FallbackReason)> = vec![
        (
            Arc::new(MockLlmProvider::replying(TWO_RECIPES_JSON)),
            None,
            FallbackReason::NoCredential,
        ),
        (
            Arc::new(MockLlmProvider::failing(ErrorCode::ExternalServiceError)),
            Some(TEST_API_KEY),
            FallbackReason::UpstreamError,
        ),
        (
            Arc::new(MockLlmProvider::delayed(
                Duration::from_secs(30),
                TWO_RECIPES_JSON,
            )),
            Some(TEST_API_KEY),
            FallbackReason::Timeout,
        ),
        (
            Arc::new(MockLlmProvider::replying("[{\"name\": \"Half")),
            Some(TEST_API_KEY),
            FallbackReason::MalformedOutput,
        ),
    ];

    for (provider, api_key, expected) in cases {
        let pipeline = pipeline(
            provider,
            Arc::clone(&store),
            api_key,
            Duration::from_millis(100),
        );
        let suggestion = pipeline.recommend(&request("spinach eggs")).await.unwrap();

        assert_eq!(suggestion.outcome.fallback_reason(), Some(expected));
        assert!(suggestion.persistence.is_none());
        assert_eq!(
            suggestion.outcome.into_payload(),
            RecipePayload::Backup(fallback_recipes("spinach eggs"))
        );
    }
}

#[tokio::test]
async fn test_success_persists_each_recipe() {
    let store = memory_store().await;
    let provider = Arc::new(MockLlmProvider::replying(TWO_RECIPES_JSON));
    let pipeline = pipeline(
        provider,
        store.clone(),
        Some(TEST_API_KEY),
        Duration::from_secs(5),
    );

    let suggestion = pipeline.recommend(&request("chickpeas")).await.unwrap();
    assert!(matches!(suggestion.outcome, GenerationOutcome::Success(ref r) if r.len() == 2));

    let report = suggestion.persistence.unwrap().wait().await.unwrap();
    assert_eq!(report.saved, 2);
    assert_eq!(report.failed, 0);

    let stored = store.list_recent_recipes(10).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| r.generated_by_ai == Some(true)));
}

#[tokio::test]
async fn test_loose_records_are_returned_untouched_and_stored_leniently() {
    let answer = r#"[
        {"name": "Egg Rice", "time": "20m", "nutrition": {"calories": "520 kcal", "protein": "21g"},
         "instructions": ["Fry"], "servings": 2},
        {"name": "Plain Eggs", "nutrition": null, "instructions": "Boil"},
        {"time": "5m", "instructions": ["No name"]}
    ]"#;
    let store = memory_store().await;
    let pipeline = pipeline(
        Arc::new(MockLlmProvider::replying(answer)),
        store.clone(),
        Some(TEST_API_KEY),
        Duration::from_secs(5),
    );

    let suggestion = pipeline.recommend(&request("eggs rice")).await.unwrap();
    let expected: Vec<Value> = serde_json::from_str(answer).unwrap();
    assert_eq!(suggestion.outcome, GenerationOutcome::Success(expected));

    // The nameless record is served but cannot be stored
    let report = suggestion.persistence.unwrap().wait().await.unwrap();
    assert_eq!(report.saved, 2);
    assert_eq!(report.failed, 1);

    let stored = store.list_recent_recipes(10).await.unwrap();
    let egg_rice = stored.iter().find(|r| r.name == "Egg Rice").unwrap();
    assert_eq!(egg_rice.nutrition.calories, 520);
    let plain = stored.iter().find(|r| r.name == "Plain Eggs").unwrap();
    assert_eq!(plain.instructions, vec!["Boil"]);
    assert_eq!(serde_json::to_value(&plain.nutrition).unwrap()["calories"], json!(0));
}

#[tokio::test]
async fn test_store_failure_does_not_fail_the_suggestion() {
    let provider = Arc::new(MockLlmProvider::replying(TWO_RECIPES_JSON));
    let pipeline = pipeline(
        provider,
        Arc::new(FailingRecipeStore),
        Some(TEST_API_KEY),
        Duration::from_secs(5),
    );

    let suggestion = pipeline.recommend(&request("chickpeas")).await.unwrap();
    assert_eq!(suggestion.outcome.recipe_count(), 2);
    assert!(suggestion.outcome.fallback_reason().is_none());

    let report = suggestion.persistence.unwrap().wait().await.unwrap();
    assert_eq!(report.saved, 0);
    assert_eq!(report.failed, 2);
}

#[tokio::test]
async fn test_missing_pantry_is_invalid_input() {
    let provider = Arc::new(MockLlmProvider::replying(TWO_RECIPES_JSON));
    let pipeline = pipeline(
        provider.clone(),
        memory_store().await,
        Some(TEST_API_KEY),
        Duration::from_secs(5),
    );

    let err = pipeline
        .recommend(&RecommendationRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.message, "Ingredients required");
    assert_eq!(provider.call_count(), 0);
}
