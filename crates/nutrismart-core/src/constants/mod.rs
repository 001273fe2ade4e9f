// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for recipe generation, auth, and server defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Health check alias under the API prefix
    pub const API_HEALTH_CHECK: &str = "/api/health";
    /// API base path
    pub const API_BASE: &str = "/api";
}

/// Network defaults
pub mod network {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    /// Default allowed CORS origin (the web client dev server)
    pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
    /// Default request body limit in megabytes
    pub const DEFAULT_BODY_LIMIT_MB: usize = 50;
}

/// Database defaults
pub mod database {
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/nutrismart.db";
}

/// Generative text service settings
pub mod llm {
    /// Minimum length for a generation credential to be considered usable
    pub const MIN_API_KEY_LENGTH: usize = 10;
    /// Default generation timeout in seconds
    pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 15;
    /// Default Gemini model
    pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
    /// Gemini REST API base URL
    pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Sampling temperature for recipe generation
    pub const RECIPE_TEMPERATURE: f32 = 0.7;
}

/// Recipe generation and listing
pub mod recipes {
    /// Number of recipes requested from the model per recommendation
    pub const RECIPES_PER_SUGGESTION: usize = 2;
    /// Number of recipes returned by the trending listing
    pub const TRENDING_RECIPE_LIMIT: u32 = 4;
    /// Placeholder used in prompts for an absent goal or budget
    pub const NOT_SPECIFIED: &str = "not specified";
}

/// Authentication defaults
pub mod auth {
    /// Default JWT lifetime in seconds (100 hours)
    pub const DEFAULT_JWT_EXPIRY_SECS: i64 = 360_000;
    /// Longest accepted JWT lifetime in seconds (one year)
    pub const MAX_JWT_EXPIRY_SECS: i64 = 31_536_000;
    /// Default bcrypt work factor
    pub const DEFAULT_BCRYPT_COST: u32 = 10;
    /// Length in bytes of a randomly generated development secret
    pub const GENERATED_SECRET_BYTES: usize = 32;
}

/// User profile defaults
pub mod profile {
    /// Bio assigned to newly registered users
    pub const DEFAULT_BIO: &str = "Ready to cook smarter!";
}

/// Canonical client-facing messages
pub mod messages {
    /// Recommendation request had no pantry contents
    pub const INGREDIENTS_REQUIRED: &str = "Ingredients required";
    /// Trending listing could not be read
    pub const FETCH_FAILED: &str = "Fetch failed";
    /// Food search query was empty
    pub const QUERY_REQUIRED: &str = "Query required";
    /// Login failed
    pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
    /// Registration conflict
    pub const USER_EXISTS: &str = "User already exists";
    /// Profile update without an identifier
    pub const IDENTIFIER_REQUIRED: &str = "Email or username required";
    /// Search history write failed
    pub const HISTORY_SAVE_FAILED: &str = "Failed to save search history";
}
