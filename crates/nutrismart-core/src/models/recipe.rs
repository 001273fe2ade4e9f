// ABOUTME: Recipe and food search records exchanged with clients and the generative model
// ABOUTME: Lenient deserialization accepts the loose shapes models tend to emit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Macro breakdown for a single serving
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    /// Energy in kilocalories
    #[serde(default, deserialize_with = "lenient_calories")]
    pub calories: i64,
    /// Protein, e.g. `"25g"`
    #[serde(default, deserialize_with = "lenient_text")]
    pub protein: String,
    /// Carbohydrates, e.g. `"40g"`
    #[serde(default, deserialize_with = "lenient_text")]
    pub carbs: String,
    /// Fats, e.g. `"15g"`
    #[serde(default, deserialize_with = "lenient_text")]
    pub fats: String,
}

impl Nutrition {
    /// Build a breakdown from literal values
    pub fn new(
        calories: i64,
        protein: impl Into<String>,
        carbs: impl Into<String>,
        fats: impl Into<String>,
    ) -> Self {
        Self {
            calories,
            protein: protein.into(),
            carbs: carbs.into(),
            fats: fats.into(),
        }
    }
}

/// A recipe suggestion
///
/// Only `name` is mandatory when decoding; every other field falls back to an
/// empty default so a partially filled model answer still yields a usable card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Display name
    pub name: String,
    /// Preparation time, e.g. `"15m"`
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: String,
    /// Cost estimate, e.g. `"$2.50"`
    #[serde(default, deserialize_with = "lenient_text")]
    pub cost_per_serving: String,
    /// Per-serving macros
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrition: Nutrition,
    /// Ingredients the user still has to buy
    #[serde(default, deserialize_with = "lenient_list")]
    pub missing_ingredients: Vec<String>,
    /// Ordered preparation steps
    #[serde(default, deserialize_with = "lenient_list")]
    pub instructions: Vec<String>,
    /// Why this recipe suits the request
    #[serde(default, rename = "whyItWorks", alias = "rationale")]
    pub rationale: String,
    /// Full ingredient list when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the recipe came from the generative model
    #[serde(
        default,
        rename = "generatedByAI",
        alias = "aiGenerated",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_by_ai: Option<bool>,
    /// Persistence timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Persistence identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Recipe {
    /// Copy of this recipe stamped for storage as model output
    ///
    /// Assigns a fresh id and creation time and marks the recipe as AI generated.
    #[must_use]
    pub fn stamped_for_storage(&self) -> Self {
        Self {
            generated_by_ai: Some(true),
            created_at: Some(Utc::now()),
            id: Some(Uuid::new_v4().to_string()),
            ..self.clone()
        }
    }
}

/// One row of a nutrition lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSearchResult {
    /// Food name
    pub name: String,
    /// Energy in kilocalories
    #[serde(default, deserialize_with = "lenient_calories")]
    pub calories: i64,
    /// Short summary of health benefits
    #[serde(default, deserialize_with = "lenient_text")]
    pub benefits: String,
    /// Food group
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
}

impl FoodSearchResult {
    /// Placeholder row returned when no usable credential is configured
    pub fn mock(query: impl Into<String>) -> Self {
        Self {
            name: query.into(),
            calories: 100,
            benefits: "No API Key - Mock Data".to_owned(),
            category: "Mock".to_owned(),
        }
    }

    /// Placeholder row returned when the lookup failed
    pub fn failed(query: impl Into<String>) -> Self {
        Self {
            name: query.into(),
            calories: 0,
            benefits: "Search Failed".to_owned(),
            category: "Error".to_owned(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
    Null(()),
}

/// Accepts `450`, `450.4`, `"450"` and `"450 kcal"`; null becomes zero
fn lenient_calories<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Int(value) => Ok(value),
        NumberOrText::Float(value) => Ok(value.round() as i64),
        NumberOrText::Null(()) => Ok(0),
        NumberOrText::Text(text) => parse_leading_number(&text).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&text), &"a calorie count")
        }),
    }
}

fn parse_leading_number(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(trimmed.len(), |(idx, _)| idx);
    trimmed[..end].parse::<f64>().ok().map(|v| v.round() as i64)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrText {
    List(Vec<String>),
    Text(String),
    Null(()),
}

/// Accepts a string list, a single string (one item) or null (empty)
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ListOrText::deserialize(deserializer)? {
        ListOrText::List(items) => items,
        ListOrText::Text(text) => vec![text],
        ListOrText::Null(()) => Vec::new(),
    })
}

/// Accepts strings and bare numbers (`25` becomes `"25"`); null becomes empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Text(text) => text,
        NumberOrText::Int(value) => value.to_string(),
        NumberOrText::Float(value) => value.to_string(),
        NumberOrText::Null(()) => String::new(),
    })
}
