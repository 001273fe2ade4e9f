// ABOUTME: Static backup recipes served whenever AI generation is unavailable or fails
// ABOUTME: Pure and infallible so the recommendation endpoint always has something to return
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrismart_core::models::{Nutrition, Recipe};

fn backup_recipe(
    name: String,
    time: &str,
    cost: &str,
    nutrition: Nutrition,
    missing: &[&str],
    steps: &[&str],
    rationale: &str,
) -> Recipe {
    Recipe {
        name,
        time: time.to_owned(),
        cost_per_serving: cost.to_owned(),
        nutrition,
        missing_ingredients: missing.iter().map(|&s| s.to_owned()).collect(),
        instructions: steps.iter().map(|&s| s.to_owned()).collect(),
        rationale: rationale.to_owned(),
        ingredients: None,
        image: None,
        generated_by_ai: Some(false),
        created_at: None,
        id: None,
    }
}

/// Two backup recipes built from the pantry text
///
/// The first is named after the first whitespace-delimited pantry token.
#[must_use]
pub fn fallback_recipes(pantry: &str) -> Vec<Recipe> {
    let lead = pantry.split_whitespace().next().unwrap_or_default();

    vec![
        backup_recipe(
            format!("Simple {lead} Stir Fry"),
            "15m",
            "$2.50",
            Nutrition::new(450, "25g", "40g", "15g"),
            &["Soy Sauce", "Garlic"],
            &["Chop ingredients", "Sauté in pan", "Serve hot"],
            "A quick, balanced meal using your available ingredients (Backup Recipe).",
        ),
        backup_recipe(
            "Quick Comfort Bowl".to_owned(),
            "10m",
            "$1.50",
            Nutrition::new(300, "10g", "50g", "5g"),
            &["Salt", "Pepper"],
            &["Mix ingredients in a bowl", "Season to taste", "Enjoy"],
            "Easy preparation for a busy day (Backup Recipe).",
        ),
    ]
}
