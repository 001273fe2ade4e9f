// ABOUTME: Core data models for recipes, food search results, and user profiles
// ABOUTME: Re-exports the model types used across the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Recipe and food search records
pub mod recipe;
/// User profiles, goals, and budget levels
pub mod user;

pub use recipe::{FoodSearchResult, Nutrition, Recipe};
pub use user::{BudgetLevel, Goal, SearchHistoryEntry, UserProfile, UserSummary};
