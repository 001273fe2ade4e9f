// ABOUTME: Route module organization for NutriSmart HTTP endpoints
// ABOUTME: Provides route definitions organized by domain with thin handlers over services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the NutriSmart server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the recipe, auth and database layers.

/// Registration, login and session lookup
pub mod auth;
/// Liveness probe
pub mod health;
/// Recommendations, trending recipes and food search
pub mod recipes;
/// Profile updates and search history
pub mod users;

pub use auth::{AuthRoutes, AuthService};
pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;
pub use users::UserRoutes;
