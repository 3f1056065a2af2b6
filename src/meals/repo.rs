use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{Meal, MealFields};

const MEAL_COLUMNS: &str = "id, user_id, date, meal_type, description, photo_url, quality_score, \
     calories_estimate, protein_grams, carbs_grams, fat_grams, notes, created_at, updated_at";

/// Meals of one user with `from <= date <= to`; either bound may be open.
pub async fn list_in_range(
    db: &PgPool,
    user_id: Uuid,
    from: Option<Date>,
    to: Option<Date>,
) -> sqlx::Result<Vec<Meal>> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE user_id = $1
           AND ($2::date IS NULL OR date >= $2)
           AND ($3::date IS NULL OR date <= $3)
         ORDER BY date ASC, created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
}

/// Meals of one user on or after `since`, newest date first.
pub async fn list_since_desc(db: &PgPool, user_id: Uuid, since: Date) -> sqlx::Result<Vec<Meal>> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        SELECT {MEAL_COLUMNS}
          FROM meals
         WHERE user_id = $1 AND date >= $2
         ORDER BY date DESC, created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(since)
    .fetch_all(db)
    .await
}

pub async fn find(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> sqlx::Result<Option<Meal>> {
    sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1 AND user_id = $2"
    ))
    .bind(meal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

pub async fn insert(db: &PgPool, user_id: Uuid, f: &MealFields) -> sqlx::Result<Meal> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        INSERT INTO meals (user_id, date, meal_type, description, photo_url, quality_score,
                           calories_estimate, protein_grams, carbs_grams, fat_grams, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(f.date)
    .bind(f.meal_type)
    .bind(&f.description)
    .bind(&f.photo_url)
    .bind(f.quality_score)
    .bind(f.calories_estimate)
    .bind(f.protein_grams)
    .bind(f.carbs_grams)
    .bind(f.fat_grams)
    .bind(&f.notes)
    .fetch_one(db)
    .await
}

/// Overwrites every editable column. `None` when the meal is absent or not owned.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    meal_id: Uuid,
    f: &MealFields,
) -> sqlx::Result<Option<Meal>> {
    sqlx::query_as::<_, Meal>(&format!(
        r#"
        UPDATE meals
           SET date = $3, meal_type = $4, description = $5, photo_url = $6,
               quality_score = $7, calories_estimate = $8, protein_grams = $9,
               carbs_grams = $10, fat_grams = $11, notes = $12, updated_at = now()
         WHERE id = $1 AND user_id = $2
        RETURNING {MEAL_COLUMNS}
        "#
    ))
    .bind(meal_id)
    .bind(user_id)
    .bind(f.date)
    .bind(f.meal_type)
    .bind(&f.description)
    .bind(&f.photo_url)
    .bind(f.quality_score)
    .bind(f.calories_estimate)
    .bind(f.protein_grams)
    .bind(f.carbs_grams)
    .bind(f.fat_grams)
    .bind(&f.notes)
    .fetch_optional(db)
    .await
}

/// Returns whether a row was deleted.
pub async fn delete(db: &PgPool, user_id: Uuid, meal_id: Uuid) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
        .bind(meal_id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
