// ABOUTME: Sanitization and parsing of untrusted model output
// ABOUTME: Strips markdown code fences and decodes the remaining text as a JSON array
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrismart_core::models::FoodSearchResult;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Why a model answer could not be used
#[derive(Debug, Error)]
pub enum OutputParseError {
    /// Text was not a JSON array of the expected records
    #[error("model output is not a valid JSON array: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// Valid array with nothing in it
    #[error("model output contained no records")]
    Empty,
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker, then trim
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_owned()
}

fn parse_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, OutputParseError> {
    let cleaned = strip_code_fences(text);
    Ok(serde_json::from_str::<Vec<T>>(&cleaned)?)
}

/// Parse a recipe suggestion answer
///
/// Records are returned exactly as the model wrote them; only the enclosing
/// array is checked.
///
/// # Errors
///
/// Returns an error when the cleaned text is not a JSON array or the array
/// is empty
pub fn parse_recipes(text: &str) -> Result<Vec<Value>, OutputParseError> {
    let recipes: Vec<Value> = parse_array(text)?;
    if recipes.is_empty() {
        return Err(OutputParseError::Empty);
    }
    Ok(recipes)
}

/// Parse a nutrition lookup answer
///
/// An empty array is a valid "nothing found" answer.
///
/// # Errors
///
/// Returns an error when the cleaned text is not a JSON array of food rows
pub fn parse_food_results(text: &str) -> Result<Vec<FoodSearchResult>, OutputParseError> {
    parse_array(text)
}
