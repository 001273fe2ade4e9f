// ABOUTME: Test fixtures for assembling an in-memory NutriSmart server
// ABOUTME: Builds configuration, resources and routers around injected collaborators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use nutrismart_server::config::{
    AuthConfig, DatabaseConfig, Environment, HttpConfig, LlmConfig, ServerConfig,
};
use nutrismart_server::database::Database;
use nutrismart_server::llm::LlmProvider;
use nutrismart_server::recipes::RecipeStore;
use nutrismart_server::server::{build_router, ServerResources};

/// A key long enough to pass the credential gate
pub const TEST_API_KEY: &str = "test-gemini-key-0123456789";

/// Configuration for an isolated test server
pub fn test_config(api_key: Option<&str>, timeout_secs: u64) -> ServerConfig {
    ServerConfig {
        environment: Environment::Testing,
        http: HttpConfig {
            host: "127.0.0.1".to_owned(),
            port: 5000,
            cors_origins: vec!["*".to_owned()],
            body_limit_mb: 1,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_owned(),
            jwt_expiry_secs: 3600,
            bcrypt_cost: 4,
            secret_generated: false,
        },
        llm: LlmConfig {
            api_key: api_key.map(str::to_owned),
            model: "mock-model".to_owned(),
            base_url: "http://127.0.0.1:9".to_owned(),
            timeout_secs,
        },
    }
}

/// Resources backed by a fresh in-memory database
pub async fn test_resources(
    provider: Arc<dyn LlmProvider>,
    api_key: Option<&str>,
) -> Arc<ServerResources> {
    test_resources_with_timeout(provider, api_key, 5).await
}

/// Resources with a specific generation timeout
pub async fn test_resources_with_timeout(
    provider: Arc<dyn LlmProvider>,
    api_key: Option<&str>,
    timeout_secs: u64,
) -> Arc<ServerResources> {
    let config = test_config(api_key, timeout_secs);
    let database = Database::new(&config.database.url)
        .await
        .expect("Failed to open in-memory database");
    Arc::new(ServerResources::new(config, database, provider))
}

/// Resources whose recipe store is replaced by `store`
pub async fn test_resources_with_store(
    provider: Arc<dyn LlmProvider>,
    api_key: Option<&str>,
    store: Arc<dyn RecipeStore>,
) -> Arc<ServerResources> {
    let config = test_config(api_key, 5);
    let database = Database::new(&config.database.url)
        .await
        .expect("Failed to open in-memory database");
    Arc::new(ServerResources::with_recipe_store(
        config,
        Arc::new(database),
        provider,
        store,
    ))
}

/// Full application router over `resources`
pub fn test_app(resources: &Arc<ServerResources>) -> Router {
    build_router(Arc::clone(resources))
}
