//! Per-day and per-period nutrition summaries over a trailing window.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::meals::repo_types::Meal;

/// Trend threshold between the recent and the older half of the period.
const TREND_MARGIN: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
}

impl Period {
    pub fn days(self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
        }
    }

    /// First date included in the window ending at `today`.
    pub fn start(self, today: Date) -> Date {
        today - Duration::days(self.days())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    #[serde(with = "crate::dates::iso_date")]
    pub date: Date,
    pub avg_quality: Option<f64>,
    pub total_calories: i64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub has_macros: bool,
    pub meal_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStats {
    pub days: Vec<DailyStats>,
    pub overall_avg_quality: f64,
    pub overall_quality_dots: u8,
    pub avg_calories_per_day: f64,
    pub avg_protein_per_day: Option<f64>,
    pub avg_carbs_per_day: Option<f64>,
    pub avg_fat_per_day: Option<f64>,
    pub total_meals: usize,
    pub trend: Trend,
}

#[derive(Default)]
struct DayAcc {
    qualities: Vec<i32>,
    calories: i64,
    protein: f64,
    carbs: f64,
    fat: f64,
    has_macros: bool,
    count: usize,
}

/// Groups meals by date, newest date first.
pub fn daily_stats(meals: &[Meal]) -> Vec<DailyStats> {
    let mut by_date: BTreeMap<Date, DayAcc> = BTreeMap::new();
    for meal in meals {
        let acc = by_date.entry(meal.date).or_default();
        if let Some(q) = meal.quality_score {
            acc.qualities.push(q);
        }
        if let Some(c) = meal.calories_estimate {
            acc.calories += i64::from(c);
        }
        acc.protein += f64::from(meal.protein_grams.unwrap_or(0.0));
        acc.carbs += f64::from(meal.carbs_grams.unwrap_or(0.0));
        acc.fat += f64::from(meal.fat_grams.unwrap_or(0.0));
        acc.has_macros |= meal.has_macros();
        acc.count += 1;
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, acc)| DailyStats {
            date,
            avg_quality: mean(acc.qualities.iter().map(|q| f64::from(*q))),
            total_calories: acc.calories,
            total_protein: acc.protein,
            total_carbs: acc.carbs,
            total_fat: acc.fat,
            has_macros: acc.has_macros,
            meal_count: acc.count,
        })
        .collect()
}

pub fn summarize(meals: &[Meal]) -> PeriodStats {
    let days = daily_stats(meals);

    // Unweighted over days: a day with one meal counts as much as a day with five.
    let overall_avg_quality = mean(days.iter().filter_map(|d| d.avg_quality)).unwrap_or(0.0);
    let avg_calories_per_day = mean(
        days.iter()
            .filter(|d| d.total_calories > 0)
            .map(|d| d.total_calories as f64),
    )
    .unwrap_or(0.0);

    let macro_days = || days.iter().filter(|d| d.has_macros);
    let avg_protein_per_day = mean(macro_days().map(|d| d.total_protein));
    let avg_carbs_per_day = mean(macro_days().map(|d| d.total_carbs));
    let avg_fat_per_day = mean(macro_days().map(|d| d.total_fat));

    let total_meals = days.iter().map(|d| d.meal_count).sum();
    let trend = trend(&days);

    PeriodStats {
        overall_quality_dots: quality_dots(overall_avg_quality),
        days,
        overall_avg_quality,
        avg_calories_per_day,
        avg_protein_per_day,
        avg_carbs_per_day,
        avg_fat_per_day,
        total_meals,
        trend,
    }
}

/// Compares the recent half of `days` (date-descending) with the older half.
/// Days without a score weigh in as 0.
pub fn trend(days: &[DailyStats]) -> Trend {
    if days.len() < 2 {
        return Trend::Stable;
    }
    let (recent, older) = days.split_at(days.len() / 2);
    let half_mean = |half: &[DailyStats]| {
        mean(half.iter().map(|d| d.avg_quality.unwrap_or(0.0))).unwrap_or(0.0)
    };
    let (recent_avg, older_avg) = (half_mean(recent), half_mean(older));

    if recent_avg > older_avg + TREND_MARGIN {
        Trend::Up
    } else if recent_avg < older_avg - TREND_MARGIN {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Number of filled dots (0..=5) for an average quality.
pub fn quality_dots(avg: f64) -> u8 {
    avg.round().clamp(0.0, 5.0) as u8
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::meals::repo_types::MealType;
    use time::{macros::date, OffsetDateTime};
    use uuid::Uuid;

    pub(crate) fn meal(date: Date, quality: Option<i32>, calories: Option<i32>) -> Meal {
        Meal {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date,
            meal_type: MealType::Lunch,
            description: "repas".into(),
            photo_url: None,
            quality_score: quality,
            calories_estimate: calories,
            protein_grams: None,
            carbs_grams: None,
            fat_grams: None,
            notes: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn day(d: Date, avg: Option<f64>) -> DailyStats {
        DailyStats {
            date: d,
            avg_quality: avg,
            total_calories: 0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            has_macros: false,
            meal_count: 1,
        }
    }

    #[test]
    fn groups_by_date_newest_first() {
        let meals = vec![
            meal(date!(2024 - 05 - 01), Some(4), Some(500)),
            meal(date!(2024 - 05 - 03), Some(2), None),
            meal(date!(2024 - 05 - 01), Some(2), Some(300)),
        ];
        let days = daily_stats(&meals);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date!(2024 - 05 - 03));
        assert_eq!(days[1].date, date!(2024 - 05 - 01));
        assert_eq!(days[1].avg_quality, Some(3.0));
        assert_eq!(days[1].total_calories, 800);
        assert_eq!(days[1].meal_count, 2);
        assert_eq!(days[0].total_calories, 0);
    }

    #[test]
    fn overall_quality_is_mean_of_daily_means() {
        // Day A: 5, 5, 5, 1 -> 4.0; day B: 2 -> 2.0.
        // Mean of day means = 3.0; a meal-weighted mean would be 3.6.
        let a = date!(2024 - 05 - 02);
        let b = date!(2024 - 05 - 01);
        let meals = vec![
            meal(a, Some(5), None),
            meal(a, Some(5), None),
            meal(a, Some(5), None),
            meal(a, Some(1), None),
            meal(b, Some(2), None),
        ];
        let stats = summarize(&meals);
        assert!((stats.overall_avg_quality - 3.0).abs() < 1e-9);
        assert_eq!(stats.overall_quality_dots, 3);
        assert_eq!(stats.total_meals, 5);
    }

    #[test]
    fn days_without_scores_are_skipped_in_overall_average() {
        let meals = vec![
            meal(date!(2024 - 05 - 02), None, Some(600)),
            meal(date!(2024 - 05 - 01), Some(4), Some(400)),
        ];
        let stats = summarize(&meals);
        assert_eq!(stats.overall_avg_quality, 4.0);
        assert_eq!(stats.avg_calories_per_day, 500.0);
    }

    #[test]
    fn calorie_average_ignores_days_without_calories() {
        let meals = vec![
            meal(date!(2024 - 05 - 03), Some(3), Some(900)),
            meal(date!(2024 - 05 - 02), Some(3), None),
            meal(date!(2024 - 05 - 01), Some(3), Some(300)),
        ];
        assert_eq!(summarize(&meals).avg_calories_per_day, 600.0);
    }

    #[test]
    fn macro_averages_use_days_with_macro_data() {
        let mut with_macros = meal(date!(2024 - 05 - 02), None, None);
        with_macros.protein_grams = Some(30.0);
        with_macros.fat_grams = Some(10.0);
        let meals = vec![with_macros, meal(date!(2024 - 05 - 01), Some(3), None)];

        let stats = summarize(&meals);
        assert_eq!(stats.avg_protein_per_day, Some(30.0));
        assert_eq!(stats.avg_carbs_per_day, Some(0.0));
        assert_eq!(stats.avg_fat_per_day, Some(10.0));
        assert!(stats.days[0].has_macros);
        assert!(!stats.days[1].has_macros);
    }

    #[test]
    fn no_macro_data_yields_none() {
        let stats = summarize(&[meal(date!(2024 - 05 - 01), Some(3), Some(400))]);
        assert_eq!(stats.avg_protein_per_day, None);
    }

    #[test]
    fn empty_period_is_stable_and_zeroed() {
        let stats = summarize(&[]);
        assert!(stats.days.is_empty());
        assert_eq!(stats.overall_avg_quality, 0.0);
        assert_eq!(stats.avg_calories_per_day, 0.0);
        assert_eq!(stats.total_meals, 0);
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn trend_compares_recent_half_with_older_half() {
        let d = date!(2024 - 05 - 10);
        let up = [
            day(d, Some(4.5)),
            day(d, Some(4.0)),
            day(d, Some(3.0)),
            day(d, Some(3.5)),
        ];
        assert_eq!(trend(&up), Trend::Up);

        let down = [day(d, Some(2.0)), day(d, Some(3.0))];
        assert_eq!(trend(&down), Trend::Down);

        // Within the margin stays stable.
        let flat = [day(d, Some(3.5)), day(d, Some(3.4))];
        assert_eq!(trend(&flat), Trend::Stable);
    }

    #[test]
    fn trend_with_odd_count_puts_extra_day_in_older_half() {
        let d = date!(2024 - 05 - 10);
        // recent = [4.0], older = [3.0, 5.0] -> 4.0 vs 4.0
        let days = [day(d, Some(4.0)), day(d, Some(3.0)), day(d, Some(5.0))];
        assert_eq!(trend(&days), Trend::Stable);
    }

    #[test]
    fn trend_needs_two_days() {
        let d = date!(2024 - 05 - 10);
        assert_eq!(trend(&[day(d, Some(5.0))]), Trend::Stable);
        assert_eq!(trend(&[]), Trend::Stable);
    }

    #[test]
    fn unscored_days_drag_trend_down() {
        let d = date!(2024 - 05 - 10);
        let days = [day(d, None), day(d, Some(3.0))];
        assert_eq!(trend(&days), Trend::Down);
    }

    #[test]
    fn period_windows() {
        let today = date!(2024 - 05 - 31);
        assert_eq!(Period::Week.start(today), date!(2024 - 05 - 24));
        assert_eq!(Period::Month.start(today), date!(2024 - 05 - 01));
    }
}
