// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Answers liveness probes without touching the database or the generation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for load balancers and uptime probes

use nutrismart_core::constants::endpoints;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    ///
    /// Stateless so the probe keeps answering when the store or credential is
    /// unavailable.
    pub fn routes() -> axum::Router {
        use axum::{routing::get, Json, Router};

        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({ "status": "OK" }))
        }

        Router::new()
            .route(endpoints::HEALTH_CHECK, get(health_handler))
            .route(endpoints::API_HEALTH_CHECK, get(health_handler))
    }
}
