// ABOUTME: Server assembly: shared resources, the axum router and the serve loop
// ABOUTME: Wires configuration, database, generation provider and auth into HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! [`ServerResources`] is the dependency container handed to every route group.
//! Collaborators are injected here once so handlers never read process-wide
//! state, and tests can swap the provider or the recipe store.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::llm::{GeminiProvider, LlmProvider};
use crate::middleware::setup_cors;
use crate::recipes::{
    FoodSearchQuery, PipelineConfig, RecipeStore, RecipeSuggestionPipeline, TrendingRecipesQuery,
};
use crate::routes::{AuthRoutes, HealthRoutes, RecipeRoutes, UserRoutes};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    pub config: Arc<ServerConfig>,
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub pipeline: Arc<RecipeSuggestionPipeline>,
    pub food_search: Arc<FoodSearchQuery>,
    pub trending: Arc<TrendingRecipesQuery>,
}

impl ServerResources {
    /// Open the database and build the production provider from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database.url).await?;

        // Built even without a key; the credential gate keeps it from being called
        let provider = GeminiProvider::new(config.llm.api_key.clone().unwrap_or_default())
            .with_default_model(config.llm.model.clone())
            .with_base_url(config.llm.base_url.clone());

        Ok(Self::new(config, database, Arc::new(provider)))
    }

    /// Assemble resources around an already-open database
    #[must_use]
    pub fn new(config: ServerConfig, database: Database, provider: Arc<dyn LlmProvider>) -> Self {
        let database = Arc::new(database);
        let store: Arc<dyn RecipeStore> = database.clone();
        Self::with_recipe_store(config, database, provider, store)
    }

    /// Assemble resources with a separate recipe store
    #[must_use]
    pub fn with_recipe_store(
        config: ServerConfig,
        database: Arc<Database>,
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn RecipeStore>,
    ) -> Self {
        let pipeline_config = PipelineConfig::from_llm_config(&config.llm);

        Self {
            auth_manager: Arc::new(AuthManager::new(&config.auth)),
            pipeline: Arc::new(RecipeSuggestionPipeline::new(
                pipeline_config.clone(),
                Arc::clone(&provider),
                Arc::clone(&store),
            )),
            food_search: Arc::new(FoodSearchQuery::new(pipeline_config, provider)),
            trending: Arc::new(TrendingRecipesQuery::new(store)),
            database,
            config: Arc::new(config),
        }
    }
}

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let body_limit = resources.config.http.body_limit_mb * 1024 * 1024;
    let cors = setup_cors(&resources.config.http);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run_server(resources: Arc<ServerResources>) -> Result<()> {
    let address = format!(
        "{}:{}",
        resources.config.http.host, resources.config.http.port
    );
    let app = build_router(resources);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
