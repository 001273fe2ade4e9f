// ABOUTME: Prompt construction for recipe suggestions and nutrition lookups
// ABOUTME: Prompts are pure functions of the request so identical requests produce identical prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrismart_core::constants::recipes::{NOT_SPECIFIED, RECIPES_PER_SUGGESTION};

use super::RecommendationRequest;

/// Output schema shown to the model, one example object
const RECIPE_SCHEMA: &str = r#"[{ "name": "string", "time": "30m", "costPerServing": "$3", "nutrition": {"calories": 500, "protein": "30g", "carbs": "40g", "fats": "15g"}, "missingIngredients": ["string"], "instructions": ["string"], "whyItWorks": "string" }]"#;

fn or_not_specified(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

/// Build the recipe suggestion prompt
#[must_use]
pub fn build_recipe_prompt(request: &RecommendationRequest) -> String {
    let pantry = request.pantry.as_deref().map_or("", str::trim);
    let goal = or_not_specified(request.user_goal.as_deref());
    let budget = or_not_specified(request.budget.as_deref());

    format!(
        "Act as a nutritionist.\n\
         Context: Pantry: {pantry}, Goal: {goal}, Budget: {budget}.\n\
         Task: Generate exactly {RECIPES_PER_SUGGESTION} distinct recipes.\n\
         Output: Valid JSON array only. NO markdown, no code fences, no commentary.\n\
         Schema: {RECIPE_SCHEMA}"
    )
}

/// Build the nutrition lookup prompt for a free-text food query
#[must_use]
pub fn build_food_search_prompt(query: &str) -> String {
    format!(
        "Search food: \"{}\". Return JSON array: [{{\"name\": \"string\", \"calories\": number, \"benefits\": \"string\", \"category\": \"string\"}}]",
        query.trim()
    )
}
