// ABOUTME: User management database operations
// ABOUTME: Handles registration, credential lookup, partial profile updates, and search history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use nutrismart_core::constants::profile::DEFAULT_BIO;
use nutrismart_core::models::{BudgetLevel, Goal, SearchHistoryEntry, UserProfile};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};

const USER_COLUMNS: &str = "id, username, email, password_hash, profile_image, bio, goals, \
                            allergies, budget_level, pantry, created_at";

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique display name
    pub username: String,
    /// Unique email
    pub email: Option<String>,
    /// bcrypt hash of the password
    pub password_hash: String,
}

/// A user row including the credential hash
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Public profile
    pub profile: UserProfile,
    /// bcrypt hash of the password
    pub password_hash: String,
}

/// How to find a user for an update
#[derive(Debug, Clone)]
pub enum UserLookup {
    /// Match on email
    Email(String),
    /// Match on username
    Username(String),
}

impl UserLookup {
    const fn column(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Username(_) => "username",
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::Email(v) | Self::Username(v) => v,
        }
    }
}

/// Partial profile update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// Avatar URL or data URI
    pub profile_image: Option<String>,
    /// Dietary goal
    pub goals: Option<Goal>,
    /// Grocery budget
    pub budget_level: Option<BudgetLevel>,
    /// Short bio
    pub bio: Option<String>,
    /// Ingredients kept on hand
    pub pantry: Option<Vec<String>>,
    /// Declared allergies
    pub allergies: Option<Vec<String>>,
}

impl Database {
    /// Create users and search history tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE,
                password_hash TEXT NOT NULL,
                profile_image TEXT,
                bio TEXT NOT NULL DEFAULT 'Ready to cook smarter!',
                goals TEXT NOT NULL DEFAULT 'balanced' CHECK (goals IN ('muscle', 'weight-loss', 'balanced', 'energy')),
                allergies TEXT NOT NULL DEFAULT '[]',
                budget_level TEXT NOT NULL DEFAULT 'medium' CHECK (budget_level IN ('low', 'medium', 'high')),
                pantry TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS search_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                query TEXT NOT NULL,
                searched_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_search_history_user ON search_history(user_id, searched_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new user with default profile values
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the username or email is taken
    pub async fn create_user(&self, user: &NewUser) -> AppResult<UserProfile> {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            username: user.username.clone(),
            email: user.email.clone(),
            profile_image: None,
            bio: DEFAULT_BIO.to_owned(),
            goals: Goal::default(),
            allergies: Vec::new(),
            budget_level: BudgetLevel::default(),
            pantry: Vec::new(),
            search_history: Vec::new(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, bio, goals, budget_level, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(profile.id.to_string())
        .bind(&profile.username)
        .bind(profile.email.as_deref())
        .bind(&user.password_hash)
        .bind(&profile.bio)
        .bind(profile.goals.as_str())
        .bind(profile.budget_level.as_str())
        .bind(format_timestamp(profile.created_at))
        .execute(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Whether a username or email is already registered
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn user_exists(&self, username: &str, email: Option<&str>) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = $1 OR ($2 IS NOT NULL AND email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Find a user, including the password hash
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn find_user(&self, lookup: &UserLookup) -> AppResult<Option<UserRecord>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {} = $1",
            lookup.column()
        );
        let row = sqlx::query(&sql)
            .bind(lookup.value())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.load_record(&row).await?)),
            None => Ok(None),
        }
    }

    /// Get a user's public profile by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn get_user_by_id(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.load_record(&row).await?.profile)),
            None => Ok(None),
        }
    }

    /// Apply a partial profile update
    ///
    /// Returns the updated profile, or `None` if no user matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_profile(
        &self,
        lookup: &UserLookup,
        update: &ProfileUpdate,
    ) -> AppResult<Option<UserProfile>> {
        let pantry = update.pantry.as_ref().map(serde_json::to_string).transpose()?;
        let allergies = update
            .allergies
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let sql = format!(
            r"
            UPDATE users SET
                profile_image = COALESCE($2, profile_image),
                goals = COALESCE($3, goals),
                budget_level = COALESCE($4, budget_level),
                bio = COALESCE($5, bio),
                pantry = COALESCE($6, pantry),
                allergies = COALESCE($7, allergies)
            WHERE {} = $1
            ",
            lookup.column()
        );

        let result = sqlx::query(&sql)
            .bind(lookup.value())
            .bind(update.profile_image.as_deref())
            .bind(update.goals.map(Goal::as_str))
            .bind(update.budget_level.map(BudgetLevel::as_str))
            .bind(update.bio.as_deref())
            .bind(pantry)
            .bind(allergies)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(self.find_user(lookup).await?.map(|record| record.profile))
    }

    /// Append a search to a user's history
    ///
    /// Returns `false` when no user has `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn append_search_history(&self, username: &str, query: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO search_history (user_id, query, searched_at)
            SELECT id, $2, $3 FROM users WHERE username = $1
            ",
        )
        .bind(username)
        .bind(query)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// A user's search history, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn search_history(&self, user_id: Uuid) -> AppResult<Vec<SearchHistoryEntry>> {
        let rows = sqlx::query(
            "SELECT query, searched_at FROM search_history WHERE user_id = $1 ORDER BY searched_at, id",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> AppResult<SearchHistoryEntry> {
                let searched_at: String = row.try_get("searched_at")?;
                Ok(SearchHistoryEntry {
                    query: row.try_get("query")?,
                    date: parse_timestamp(&searched_at)?,
                })
            })
            .collect()
    }

    async fn load_record(&self, row: &SqliteRow) -> AppResult<UserRecord> {
        let mut record = row_to_record(row)?;
        record.profile.search_history = self.search_history(record.profile.id).await?;
        Ok(record)
    }
}

fn row_to_record(row: &SqliteRow) -> AppResult<UserRecord> {
    let id: String = row.try_get("id")?;
    let goals: String = row.try_get("goals")?;
    let budget_level: String = row.try_get("budget_level")?;
    let allergies: String = row.try_get("allergies")?;
    let pantry: String = row.try_get("pantry")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(UserRecord {
        profile: UserProfile {
            id: Uuid::parse_str(&id)
                .map_err(|e| AppError::database(format!("Invalid stored user id {id:?}: {e}")))?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            profile_image: row.try_get("profile_image")?,
            bio: row.try_get("bio")?,
            goals: goals.parse()?,
            allergies: serde_json::from_str(&allergies)?,
            budget_level: budget_level.parse()?,
            pantry: serde_json::from_str(&pantry)?,
            search_history: Vec::new(),
            created_at: parse_timestamp(&created_at)?,
        },
        password_hash: row.try_get("password_hash")?,
    })
}
