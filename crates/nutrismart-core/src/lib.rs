// ABOUTME: Core types and constants for the NutriSmart recipe recommendation API
// ABOUTME: Foundation crate with error handling, recipe and user models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriSmart` Core
//!
//! Shared types for the `NutriSmart` server. This crate changes rarely, which
//! keeps incremental builds of the server crate fast.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the JSON error body
//! - **constants**: defaults and client-facing messages
//! - **models**: recipes, food search rows, and user profiles

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
