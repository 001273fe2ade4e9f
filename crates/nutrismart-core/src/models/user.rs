// ABOUTME: User profile models with dietary goals, budget level, pantry, and search history
// ABOUTME: Public user shapes returned by auth and profile endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{AppError, ErrorCode};

/// Dietary goal selected on the profile page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    /// Muscle gain
    Muscle,
    /// Weight loss
    WeightLoss,
    /// Balanced diet
    #[default]
    Balanced,
    /// Energy and endurance
    Energy,
}

impl Goal {
    /// Wire and storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Muscle => "muscle",
            Self::WeightLoss => "weight-loss",
            Self::Balanced => "balanced",
            Self::Energy => "energy",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "muscle" => Ok(Self::Muscle),
            "weight-loss" => Ok(Self::WeightLoss),
            "balanced" => Ok(Self::Balanced),
            "energy" => Ok(Self::Energy),
            other => Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!("Unknown goal: {other}"),
            )),
        }
    }
}

/// Grocery budget tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    /// Tight budget
    Low,
    /// Moderate budget
    #[default]
    Medium,
    /// Generous budget
    High,
}

impl BudgetLevel {
    /// Wire and storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!("Unknown budget level: {other}"),
            )),
        }
    }
}

/// A past food search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    /// The query text
    pub query: String,
    /// When the search happened
    pub date: DateTime<Utc>,
}

/// Full public profile (never includes the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id
    pub id: Uuid,
    /// Unique display name
    pub username: String,
    /// Unique email, optional for legacy accounts
    pub email: Option<String>,
    /// Avatar URL or data URI
    pub profile_image: Option<String>,
    /// Short bio
    pub bio: String,
    /// Dietary goal
    pub goals: Goal,
    /// Declared allergies
    pub allergies: Vec<String>,
    /// Grocery budget
    pub budget_level: BudgetLevel,
    /// Ingredients kept on hand
    pub pantry: Vec<String>,
    /// Search history, oldest first
    pub search_history: Vec<SearchHistoryEntry>,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// Minimal user summary returned on registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: Uuid,
    /// Unique display name
    pub username: String,
    /// Email address
    pub email: Option<String>,
}

impl From<&UserProfile> for UserSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username.clone(),
            email: profile.email.clone(),
        }
    }
}
