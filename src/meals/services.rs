use time::Date;

use super::{dto::MealRequest, repo_types::MealFields};
use crate::{
    error::AppError,
    nutrition::estimator,
    validation::{optional_media_url, optional_text, required_text},
};

const MAX_DESCRIPTION_LEN: usize = 2000;
const MAX_NOTES_LEN: usize = 2000;

/// Validated fields for a new meal. The date defaults to `today`, and a
/// missing score or calorie count is filled from the description heuristic.
pub fn prepare_new(req: MealRequest, today: Date) -> Result<MealFields, AppError> {
    let mut fields = validate(req, today)?;
    if fields.quality_score.is_none() || fields.calories_estimate.is_none() {
        let guess = estimator::estimate(&fields.description, fields.meal_type);
        fields.quality_score.get_or_insert(guess.quality_score);
        fields.calories_estimate.get_or_insert(guess.calories_estimate);
    }
    Ok(fields)
}

/// Validated fields for a full-row overwrite. The date is mandatory and
/// nothing is estimated: the caller's values win, including `null`s.
pub fn prepare_update(req: MealRequest) -> Result<MealFields, AppError> {
    let Some(date) = req.date else {
        return Err(AppError::BadRequest("date is required".into()));
    };
    validate(req, date)
}

fn validate(req: MealRequest, default_date: Date) -> Result<MealFields, AppError> {
    let description = required_text("description", &req.description, MAX_DESCRIPTION_LEN)?;

    if let Some(score) = req.quality_score {
        if !(estimator::MIN_SCORE..=estimator::MAX_SCORE).contains(&score) {
            return Err(AppError::BadRequest(
                "quality_score must be between 1 and 5".into(),
            ));
        }
    }
    if req.calories_estimate.is_some_and(|c| c < 0) {
        return Err(AppError::BadRequest(
            "calories_estimate must not be negative".into(),
        ));
    }
    for (name, grams) in [
        ("protein_grams", req.protein_grams),
        ("carbs_grams", req.carbs_grams),
        ("fat_grams", req.fat_grams),
    ] {
        if grams.is_some_and(|g| !g.is_finite() || g < 0.0) {
            return Err(AppError::BadRequest(format!("{name} must not be negative")));
        }
    }

    let notes = optional_text(req.notes);
    if notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
        return Err(AppError::BadRequest(format!(
            "notes must be {MAX_NOTES_LEN} characters or less"
        )));
    }

    Ok(MealFields {
        date: req.date.unwrap_or(default_date),
        meal_type: req.meal_type,
        description,
        photo_url: optional_media_url("photo_url", req.photo_url)?,
        quality_score: req.quality_score,
        calories_estimate: req.calories_estimate,
        protein_grams: req.protein_grams,
        carbs_grams: req.carbs_grams,
        fat_grams: req.fat_grams,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::repo_types::MealType;
    use time::macros::date;

    fn request(description: &str) -> MealRequest {
        MealRequest {
            date: None,
            meal_type: MealType::Lunch,
            description: description.into(),
            photo_url: None,
            quality_score: None,
            calories_estimate: None,
            protein_grams: None,
            carbs_grams: None,
            fat_grams: None,
            notes: None,
        }
    }

    #[test]
    fn new_meal_is_filled_from_estimator() {
        let fields = prepare_new(request("  salade niçoise "), date!(2024 - 05 - 10)).unwrap();
        assert_eq!(fields.description, "salade niçoise");
        assert_eq!(fields.date, date!(2024 - 05 - 10));
        assert_eq!(fields.quality_score, Some(4));
        assert_eq!(fields.calories_estimate, Some(400));
    }

    #[test]
    fn explicit_values_are_kept() {
        let mut req = request("pizza");
        req.quality_score = Some(5);
        let fields = prepare_new(req, date!(2024 - 05 - 10)).unwrap();
        assert_eq!(fields.quality_score, Some(5));
        assert_eq!(fields.calories_estimate, Some(700));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut req = request("pâtes");
        req.quality_score = Some(6);
        assert!(prepare_new(req, date!(2024 - 05 - 10)).is_err());

        let mut req = request("pâtes");
        req.protein_grams = Some(-1.0);
        assert!(prepare_new(req, date!(2024 - 05 - 10)).is_err());

        let mut req = request("pâtes");
        req.calories_estimate = Some(-10);
        assert!(prepare_new(req, date!(2024 - 05 - 10)).is_err());

        assert!(prepare_new(request("   "), date!(2024 - 05 - 10)).is_err());
    }

    #[test]
    fn update_requires_date_and_skips_estimation() {
        assert!(prepare_update(request("salade")).is_err());

        let mut req = request("salade");
        req.date = Some(date!(2024 - 04 - 01));
        let fields = prepare_update(req).unwrap();
        assert_eq!(fields.date, date!(2024 - 04 - 01));
        assert_eq!(fields.quality_score, None);
        assert_eq!(fields.calories_estimate, None);
    }

    #[test]
    fn photo_url_must_be_http_or_inline_image() {
        let mut req = request("soupe");
        req.photo_url = Some("data:image/jpeg;base64,/9j/4AAQ".into());
        assert!(prepare_new(req, date!(2024 - 05 - 10)).is_ok());

        let mut req = request("soupe");
        req.photo_url = Some("file:///etc/passwd".into());
        assert!(prepare_new(req, date!(2024 - 05 - 10)).is_err());
    }

    #[test]
    fn request_parses_iso_date() {
        let req: MealRequest = serde_json::from_str(
            r#"{"date":"2024-05-10","meal_type":"snack","description":"pomme"}"#,
        )
        .unwrap();
        assert_eq!(req.date, Some(date!(2024 - 05 - 10)));
        assert_eq!(req.meal_type, MealType::Snack);

        let req: MealRequest =
            serde_json::from_str(r#"{"meal_type":"dinner","description":"soupe"}"#).unwrap();
        assert_eq!(req.date, None);
    }
}
