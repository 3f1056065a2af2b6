//! Turns a logged meal into the text of a feed post.

use super::repo_types::{MediaType, NewPost};
use crate::meals::repo_types::Meal;

pub fn compose_content(meal: &Meal, comment: Option<&str>) -> String {
    let mut content = format!("{}\n\n{}", meal.meal_type.label(), meal.description);

    if let Some(comment) = comment.map(str::trim).filter(|c| !c.is_empty()) {
        content.push_str(&format!("\n\n💬 {comment}"));
    }

    if let Some(score) = meal.quality_score.filter(|s| *s > 0) {
        let stars = "⭐".repeat(score as usize);
        content.push_str(&format!("\n\n{stars} Qualité: {score}/5"));
    }

    let mut nutrition = Vec::new();
    if let Some(kcal) = meal.calories_estimate.filter(|c| *c > 0) {
        nutrition.push(format!("{kcal} kcal"));
    }
    for (prefix, grams) in [
        ("P", meal.protein_grams),
        ("G", meal.carbs_grams),
        ("L", meal.fat_grams),
    ] {
        if let Some(g) = grams.filter(|g| *g > 0.0) {
            nutrition.push(format!("{prefix}: {g}g"));
        }
    }
    if !nutrition.is_empty() {
        content.push_str(&format!("\n📊 {}", nutrition.join(" • ")));
    }

    content
}

/// Post for a shared meal; the meal photo becomes the post media.
pub fn post_from_meal(meal: &Meal, comment: Option<&str>) -> NewPost {
    NewPost {
        meal_id: Some(meal.id),
        content: compose_content(meal, comment),
        media_url: meal.photo_url.clone(),
        media_type: meal.photo_url.as_ref().map(|_| MediaType::Photo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::repo_types::MealType;
    use crate::nutrition::stats::tests::meal;
    use time::macros::date;

    #[test]
    fn bare_meal_has_label_and_description() {
        let mut m = meal(date!(2024 - 05 - 01), None, None);
        m.meal_type = MealType::Breakfast;
        m.description = "Porridge".into();
        assert_eq!(compose_content(&m, None), "🌅 Petit-déjeuner\n\nPorridge");
    }

    #[test]
    fn full_meal_lists_comment_score_and_nutrition() {
        let mut m = meal(date!(2024 - 05 - 01), Some(4), Some(450));
        m.meal_type = MealType::Dinner;
        m.description = "Saumon et légumes".into();
        m.protein_grams = Some(32.0);
        m.carbs_grams = None;
        m.fat_grams = Some(12.5);

        let content = compose_content(&m, Some("  Trop bon !  "));
        assert_eq!(
            content,
            "🌙 Dîner\n\nSaumon et légumes\n\n💬 Trop bon !\n\n⭐⭐⭐⭐ Qualité: 4/5\n📊 450 kcal • P: 32g • L: 12.5g"
        );
    }

    #[test]
    fn blank_comment_and_zero_values_are_omitted() {
        let mut m = meal(date!(2024 - 05 - 01), None, Some(0));
        m.description = "Eau".into();
        m.protein_grams = Some(0.0);
        assert_eq!(compose_content(&m, Some("   ")), "🍽️ Déjeuner\n\nEau");
    }

    #[test]
    fn photo_becomes_media() {
        let mut m = meal(date!(2024 - 05 - 01), None, None);
        let post = post_from_meal(&m, None);
        assert_eq!(post.media_url, None);
        assert_eq!(post.media_type, None);
        assert_eq!(post.meal_id, Some(m.id));

        m.photo_url = Some("https://cdn.example.com/m.jpg".into());
        let post = post_from_meal(&m, None);
        assert_eq!(post.media_type, Some(MediaType::Photo));
    }
}
