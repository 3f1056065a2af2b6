//! Keyword heuristic that guesses a quality score and a calorie count from a
//! free-text meal description.
//!
//! Each keyword category applies at most once, so the result depends only on
//! which categories match, never on how often or in which order.

use serde::Serialize;

use crate::meals::repo_types::MealType;

const BASE_SCORE: f64 = 3.0;
const BASE_CALORIES: f64 = 500.0;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;
pub const MIN_CALORIES: i32 = 100;
pub const MAX_CALORIES: i32 = 1500;

struct Rule {
    keywords: &'static [&'static str],
    score: f64,
    calories: f64,
}

const RULES: &[Rule] = &[
    // vegetables, fruit, salad
    Rule {
        keywords: &["légumes", "fruits", "salade"],
        score: 1.0,
        calories: -100.0,
    },
    // fried / fast food
    Rule {
        keywords: &["frit", "burger", "pizza"],
        score: -1.0,
        calories: 200.0,
    },
    // lean protein
    Rule {
        keywords: &["poisson", "poulet"],
        score: 0.5,
        calories: 0.0,
    },
    // sugar
    Rule {
        keywords: &["sucre", "gâteau", "bonbon"],
        score: -0.5,
        calories: 150.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub quality_score: i32,
    pub calories_estimate: i32,
}

pub fn estimate(description: &str, meal_type: MealType) -> Estimate {
    let text = description.to_lowercase();

    let mut score = BASE_SCORE;
    let mut calories = BASE_CALORIES;
    for rule in RULES {
        if rule.keywords.iter().any(|k| text.contains(k)) {
            score += rule.score;
            calories += rule.calories;
        }
    }

    calories = match meal_type {
        MealType::Breakfast => (calories * 0.7).round(),
        MealType::Snack => (calories * 0.4).round(),
        MealType::Lunch | MealType::Dinner => calories,
    };

    Estimate {
        quality_score: (score.round() as i32).clamp(MIN_SCORE, MAX_SCORE),
        calories_estimate: (calories as i32).clamp(MIN_CALORIES, MAX_CALORIES),
    }
}
