// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains shared helpers for bearer tokens, JSON envelopes, and upstream timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Bearer token extraction
pub mod auth;
/// JSON response envelopes
pub mod json_responses;
/// Timeout wrappers for upstream calls
pub mod route_timeout;
