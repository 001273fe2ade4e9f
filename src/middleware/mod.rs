// ABOUTME: HTTP middleware shared by every route group
// ABOUTME: Currently the CORS layer; tracing and body limits come straight from tower-http
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
