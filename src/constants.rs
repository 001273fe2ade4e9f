// ABOUTME: System-wide constants re-exported from the nutrismart-core crate
// ABOUTME: Endpoint paths, defaults, limits and client-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrismart_core::constants::*;
