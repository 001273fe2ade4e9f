// ABOUTME: Unified error handling re-exported from the nutrismart-core crate
// ABOUTME: AppError, ErrorCode and the HTTP error envelope used by every handler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrismart_core::errors::*;
