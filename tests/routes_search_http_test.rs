// ABOUTME: HTTP integration tests for the food search endpoint
// ABOUTME: Covers the mock answer, parsed answers and the inline error record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use helpers::axum_test::AxumTestRequest;
use helpers::mock_llm::MockLlmProvider;
use helpers::test_utils::{test_app, test_resources, test_resources_with_timeout, TEST_API_KEY};
use nutrismart_server::errors::ErrorCode;
use serde_json::{json, Value};

async fn search(provider: Arc<MockLlmProvider>, api_key: Option<&str>, body: &Value) -> (u16, Value) {
    let resources = test_resources(provider, api_key).await;
    let response = AxumTestRequest::post("/api/search")
        .json(body)
        .send(test_app(&resources))
        .await;
    let status = response.status();
    (status, response.json())
}

#[tokio::test]
async fn test_no_credential_returns_mock_record() {
    let provider = Arc::new(MockLlmProvider::replying("[]"));
    let (status, body) = search(provider.clone(), None, &json!({ "query": "Avocado" })).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([{
            "name": "Avocado",
            "calories": 100,
            "benefits": "No API Key - Mock Data",
            "category": "Mock"
        }])
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_fenced_answer_is_parsed() {
    let answer = "```json\n[{\"name\": \"Banana\", \"calories\": 105, \"benefits\": \"Potassium\", \"category\": \"Fruit\"}]\n```";
    let provider = Arc::new(MockLlmProvider::replying(answer));
    let (status, body) = search(provider.clone(), Some(TEST_API_KEY), &json!({ "query": "banana" })).await;

    assert_eq!(status, 200);
    assert_eq!(body[0]["name"], "Banana");
    assert_eq!(body[0]["calories"], 105);
    assert_eq!(body[0]["category"], "Fruit");
    assert!(provider.last_prompt().unwrap().contains("banana"));
}

#[tokio::test]
async fn test_provider_failure_returns_error_record() {
    let provider = Arc::new(MockLlmProvider::failing(ErrorCode::ExternalServiceError));
    let (status, body) = search(provider, Some(TEST_API_KEY), &json!({ "query": "kiwi" })).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([{ "name": "kiwi", "calories": 0, "benefits": "Search Failed", "category": "Error" }])
    );
}

#[tokio::test]
async fn test_slow_provider_returns_error_record() {
    let answer = r#"[{"name": "Kiwi", "calories": 42, "benefits": "Vitamin C", "category": "Fruit"}]"#;
    let provider = Arc::new(MockLlmProvider::delayed(Duration::from_secs(30), answer));
    let resources = test_resources_with_timeout(provider.clone(), Some(TEST_API_KEY), 1).await;

    let started = Instant::now();
    let response = AxumTestRequest::post("/api/search")
        .json(&json!({ "query": "kiwi" }))
        .send(test_app(&resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!([{ "name": "kiwi", "calories": 0, "benefits": "Search Failed", "category": "Error" }])
    );
    assert_eq!(provider.call_count(), 1);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_unparseable_answer_returns_error_record() {
    let provider = Arc::new(MockLlmProvider::replying("I think kiwis are great"));
    let (status, body) = search(provider, Some(TEST_API_KEY), &json!({ "query": "kiwi" })).await;

    assert_eq!(status, 200);
    assert_eq!(body[0]["category"], "Error");
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let provider = Arc::new(MockLlmProvider::replying("[]"));
    let (status, body) = search(provider.clone(), Some(TEST_API_KEY), &json!({ "query": "  " })).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Query required");
    assert_eq!(provider.call_count(), 0);
}
