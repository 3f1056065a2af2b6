use serde::{Deserialize, Serialize};
use time::Date;

use super::repo_types::{Meal, MealType};

/// Body of `POST /meals` and `PUT /meals/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MealRequest {
    #[serde(default, with = "crate::dates::iso_date::option")]
    pub date: Option<Date>,
    pub meal_type: MealType,
    pub description: String,
    pub photo_url: Option<String>,
    pub quality_score: Option<i32>,
    pub calories_estimate: Option<i32>,
    pub protein_grams: Option<f32>,
    pub carbs_grams: Option<f32>,
    pub fat_grams: Option<f32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MealRange {
    #[serde(default, with = "crate::dates::iso_date::option")]
    pub from: Option<Date>,
    #[serde(default, with = "crate::dates::iso_date::option")]
    pub to: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub description: String,
    pub meal_type: MealType,
}

#[derive(Debug, Serialize)]
pub struct MealDetails {
    #[serde(flatten)]
    pub meal: Meal,
    pub meal_type_label: &'static str,
}

impl From<Meal> for MealDetails {
    fn from(meal: Meal) -> Self {
        Self {
            meal_type_label: meal.meal_type.label(),
            meal,
        }
    }
}
