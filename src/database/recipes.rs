// ABOUTME: Recipe persistence: JSON payload rows ordered by creation time
// ABOUTME: Implements the RecipeStore trait used by the suggestion pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::Utc;
use nutrismart_core::models::Recipe;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, Database};
use crate::errors::AppResult;
use crate::recipes::RecipeStore;

impl Database {
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                payload TEXT NOT NULL,
                generated_by_ai INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at DESC)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RecipeStore for Database {
    async fn create_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        let stored = Recipe {
            id: Some(recipe.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string())),
            created_at: Some(recipe.created_at.unwrap_or_else(Utc::now)),
            ..recipe.clone()
        };
        let payload = serde_json::to_string(&stored)?;

        sqlx::query(
            r"
            INSERT INTO recipes (id, name, payload, generated_by_ai, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(stored.id.as_deref())
        .bind(&stored.name)
        .bind(payload)
        .bind(stored.generated_by_ai.unwrap_or(false))
        .bind(stored.created_at.map(format_timestamp))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_recent_recipes(&self, limit: u32) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query(
            r"
            SELECT payload FROM recipes
            ORDER BY created_at DESC, rowid DESC
            LIMIT $1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> AppResult<Recipe> {
                let payload: String = row.try_get("payload")?;
                Ok(serde_json::from_str(&payload)?)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn recipe(name: &str) -> Recipe {
        serde_json::from_value(json!({ "name": name })).unwrap()
    }

    #[tokio::test]
    async fn test_recent_recipes_are_newest_first_and_limited() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let base = Utc::now();

        for (offset, name) in [(0, "oldest"), (1, "middle"), (2, "newest")] {
            let stamped = Recipe {
                created_at: Some(base + Duration::seconds(offset)),
                ..recipe(name)
            };
            db.create_recipe(&stamped).await.unwrap();
        }

        let names: Vec<String> = db
            .list_recent_recipes(2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["newest", "middle"]);
    }

    #[tokio::test]
    async fn test_create_fills_missing_identity() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        db.create_recipe(&recipe("Plain")).await.unwrap();

        let stored = db.list_recent_recipes(4).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].id.is_some());
        assert!(stored[0].created_at.is_some());
    }
}
