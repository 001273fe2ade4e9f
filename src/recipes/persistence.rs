// ABOUTME: Recipe storage contract and the detached task that saves generated recipes
// ABOUTME: Model records are decoded and saved one by one; failures are logged and counted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use nutrismart_core::models::Recipe;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};

/// Document store for recipes
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert one recipe; the recipe must already carry its id and timestamp
    async fn create_recipe(&self, recipe: &Recipe) -> AppResult<()>;

    /// Most recently created recipes, newest first
    async fn list_recent_recipes(&self, limit: u32) -> AppResult<Vec<Recipe>>;
}

/// Outcome of a background save
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistenceReport {
    /// Recipes written
    pub saved: usize,
    /// Recipes whose write failed
    pub failed: usize,
}

/// Handle to a detached save of AI-generated recipes
///
/// Dropping the handle detaches the task; it keeps running to completion.
#[derive(Debug)]
pub struct PersistenceTask {
    handle: JoinHandle<PersistenceReport>,
}

impl PersistenceTask {
    /// Spawn a task that decodes, stamps and saves every model record
    ///
    /// Records that do not decode as a [`Recipe`] count as failed.
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<dyn RecipeStore>, records: Vec<Value>) -> Self {
        let handle = tokio::spawn(async move { save_all(store.as_ref(), records).await });
        Self { handle }
    }

    /// Wait for the save to finish
    ///
    /// # Errors
    ///
    /// Returns an internal error if the task panicked or was aborted
    pub async fn wait(self) -> AppResult<PersistenceReport> {
        self.handle
            .await
            .map_err(|e| AppError::internal(format!("Recipe persistence task failed: {e}")))
    }
}

fn decode_for_storage(record: Value) -> Option<Recipe> {
    match serde_json::from_value::<Recipe>(record) {
        Ok(recipe) => Some(recipe.stamped_for_storage()),
        Err(e) => {
            warn!(error = %e, "Generated record is not a storable recipe");
            None
        }
    }
}

async fn save_all(store: &dyn RecipeStore, records: Vec<Value>) -> PersistenceReport {
    let total = records.len();
    let stamped: Vec<Recipe> = records.into_iter().filter_map(decode_for_storage).collect();

    let results = join_all(stamped.iter().map(|recipe| async move {
        match store.create_recipe(recipe).await {
            Ok(()) => {
                debug!(recipe.name = %recipe.name, "Saved generated recipe");
                true
            }
            Err(e) => {
                warn!(recipe.name = %recipe.name, error = %e, "Failed to save generated recipe");
                false
            }
        }
    }))
    .await;

    let saved = results.iter().filter(|ok| **ok).count();
    let report = PersistenceReport {
        saved,
        failed: total - saved,
    };
    info!(saved = report.saved, failed = report.failed, "Recipe persistence finished");
    report
}
