// ABOUTME: Scripted test doubles for the generation provider and the recipe store
// ABOUTME: Count calls and inject replies, failures and delays for pipeline tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use nutrismart_server::errors::{AppError, AppResult, ErrorCode};
use nutrismart_server::llm::{ChatRequest, ChatResponse, LlmProvider};
use nutrismart_server::models::Recipe;
use nutrismart_server::recipes::RecipeStore;

/// What the mock does when called
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this text
    Reply(String),
    /// Fail with this error code
    Fail(ErrorCode),
    /// Sleep, then return this text
    Delayed(Duration, String),
}

/// Generation provider that follows a script and counts calls
pub struct MockLlmProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
    last_prompt: std::sync::Mutex<Option<String>>,
}

impl MockLlmProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(MockBehavior::Reply(text.to_owned()))
    }

    pub fn failing(code: ErrorCode) -> Self {
        Self::new(MockBehavior::Fail(code))
    }

    pub fn delayed(delay: Duration, text: &str) -> Self {
        Self::new(MockBehavior::Delayed(delay, text.to_owned()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    fn response(text: &str) -> ChatResponse {
        ChatResponse {
            content: text.to_owned(),
            model: "mock-model".to_owned(),
            usage: None,
            finish_reason: Some("STOP".to_owned()),
        }
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() =
            request.messages.last().map(|m| m.content.clone());

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(Self::response(text)),
            MockBehavior::Fail(code) => Err(AppError::new(*code, "scripted failure")),
            MockBehavior::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(Self::response(text))
            }
        }
    }
}

/// Recipe store whose every call fails
pub struct FailingRecipeStore;

#[async_trait]
impl RecipeStore for FailingRecipeStore {
    async fn create_recipe(&self, _recipe: &Recipe) -> AppResult<()> {
        Err(AppError::database("store offline"))
    }

    async fn list_recent_recipes(&self, _limit: u32) -> AppResult<Vec<Recipe>> {
        Err(AppError::database("store offline"))
    }
}

/// Two recipes in the shape the model is asked for
pub const TWO_RECIPES_JSON: &str = r#"[
  {
    "name": "Garlic Chickpea Skillet",
    "time": "20 mins",
    "costPerServing": "$2.10",
    "nutrition": {"calories": 430, "protein": "18g", "carbs": "52g", "fats": "14g"},
    "missingIngredients": ["Lemon"],
    "instructions": ["Saute garlic.", "Add chickpeas.", "Season and serve."],
    "whyItWorks": "Fiber and plant protein keep you full."
  },
  {
    "name": "Tomato Rice Bowl",
    "time": "25 mins",
    "costPerServing": "$1.80",
    "nutrition": {"calories": 510, "protein": "12g", "carbs": "80g", "fats": "9g"},
    "missingIngredients": [],
    "instructions": ["Cook rice.", "Simmer tomatoes.", "Combine."],
    "whyItWorks": "Cheap, quick and filling."
  }
]"#;
