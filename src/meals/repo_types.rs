use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Display label used in shared posts and meal details.
    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "🌅 Petit-déjeuner",
            MealType::Lunch => "🍽️ Déjeuner",
            MealType::Dinner => "🌙 Dîner",
            MealType::Snack => "🍪 Collation",
        }
    }
}

/// Row of the `meals` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "crate::dates::iso_date")]
    pub date: Date,
    pub meal_type: MealType,
    pub description: String,
    pub photo_url: Option<String>,
    pub quality_score: Option<i32>,
    pub calories_estimate: Option<i32>,
    pub protein_grams: Option<f32>,
    pub carbs_grams: Option<f32>,
    pub fat_grams: Option<f32>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Meal {
    pub fn has_macros(&self) -> bool {
        self.protein_grams.is_some() || self.carbs_grams.is_some() || self.fat_grams.is_some()
    }
}

/// Editable columns, shared by insert and full-row update.
#[derive(Debug, Clone)]
pub struct MealFields {
    pub date: Date,
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
