// ABOUTME: Timeout utilities for upstream calls made while serving a request
// ABOUTME: Converts an elapsed deadline into an ExternalTimeout AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Execute an upstream operation with a deadline
///
/// The operation future is dropped when the deadline passes, which cancels
/// any in-flight HTTP request it owns.
///
/// # Errors
///
/// Returns an `ExternalTimeout` error naming `service` if the deadline passes,
/// otherwise the operation's own error
pub async fn with_upstream_timeout<F, T, E>(
    service: &str,
    duration: Duration,
    operation: F,
) -> AppResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    (timeout(duration, operation).await).map_or_else(
        |_| {
            Err(AppError::external_timeout(format!(
                "{service} after {}ms",
                duration.as_millis()
            )))
        },
        |result| result.map_err(Into::into),
    )
}
