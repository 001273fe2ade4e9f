// ABOUTME: Main library entry point for the NutriSmart recipe recommendation server
// ABOUTME: Exposes the recipe pipeline, auth, persistence and HTTP routes to the binary and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # NutriSmart Server
//!
//! REST backend for a recipe recommendation web app. It suggests recipes from a
//! pantry description using a generative text service, keeps the suggestions
//! that came from the model, and manages user accounts and profiles.
//!
//! ## Architecture
//!
//! - **Recipes**: suggestion pipeline with a deterministic fallback chain,
//!   trending query and food search
//! - **LLM**: provider trait with a Gemini implementation
//! - **Database**: `SQLite` through sqlx for recipes, users and search history
//! - **Routes**: axum handlers grouped by domain
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nutrismart_server::config::ServerConfig;
//! use nutrismart_server::server::{run_server, ServerResources};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::from_config(config).await?;
//!     run_server(Arc::new(resources)).await
//! }
//! ```

/// Password hashing and session tokens
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Shared constants
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// Unified error handling
pub mod errors;

/// Generative text providers
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Recipe suggestion, trending and food search
pub mod recipes;

/// HTTP route groups
pub mod routes;

/// Router assembly and serve loop
pub mod server;

/// Small shared helpers
pub mod utils;
