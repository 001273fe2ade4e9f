// ABOUTME: Core data models re-exported from the nutrismart-core crate
// ABOUTME: Recipes, nutrition facts, food search results and user profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrismart_core::models::*;
