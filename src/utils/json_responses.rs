// ABOUTME: JSON response envelopes shared by the REST handlers
// ABOUTME: Success bodies are `{success: true, data}` or `{success: true}`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// `{ "success": true, "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Always `true`
    pub success: bool,
    /// Payload
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wrap a payload
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "success": true }`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Acknowledged {
    /// Always `true`
    pub success: bool,
}

impl Acknowledged {
    /// Success acknowledgement
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}
