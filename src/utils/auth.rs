// ABOUTME: Generic authentication utilities for bearer token extraction and validation
// ABOUTME: Keeps Authorization header parsing in one place for routes and extractors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult, ErrorCode};

/// Extract bearer token from Authorization header string
///
/// # Errors
///
/// Returns an `AuthMalformed` error if:
/// - Authorization header doesn't start with "Bearer "
/// - Token is empty after extraction and trimming
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::AuthMalformed,
                "Invalid authorization header format",
            )
        })?
        .trim();

    if token.is_empty() {
        return Err(AppError::new(ErrorCode::AuthMalformed, "Empty bearer token"));
    }

    Ok(token)
}

/// Extract bearer token from optional Authorization header
///
/// # Errors
///
/// Returns `AuthRequired` when the header is missing, otherwise the errors of
/// [`extract_bearer_token`]
pub fn extract_bearer_token_from_option(auth_header: Option<&str>) -> AppResult<&str> {
    let header = auth_header.ok_or_else(AppError::auth_required)?;
    extract_bearer_token(header)
}
