//! Month grid: meals bucketed per day, at most three shown per cell.

use serde::Serialize;
use time::{Date, Month};
use uuid::Uuid;

use super::stats::quality_dots;
use crate::dates::{self, iso_date};
use crate::meals::repo_types::{Meal, MealType};

pub const MAX_MEALS_PER_DAY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMeal {
    pub id: Uuid,
    pub meal_type: MealType,
    pub description: String,
    pub photo_url: Option<String>,
    pub quality_score: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meals: Vec<CalendarMeal>,
    /// Meals beyond the displayed ones.
    pub overflow: usize,
    pub average_quality: Option<f64>,
    pub quality_dots: u8,
    pub is_today: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u8,
    /// Empty cells before the 1st, weeks starting on Sunday.
    pub leading_blank_days: u8,
    pub days: Vec<CalendarDay>,
    pub previous: MonthRef,
    pub next: MonthRef,
}

pub fn build_month(
    year: i32,
    month: Month,
    meals: &[Meal],
    today: Date,
) -> Result<CalendarMonth, time::error::ComponentRange> {
    let (first, last) = dates::month_bounds(year, month)?;

    let mut days = Vec::with_capacity(usize::from(last.day()));
    let mut date = first;
    loop {
        days.push(build_day(date, meals, today));
        match date.next_day() {
            Some(next) if next <= last => date = next,
            _ => break,
        }
    }

    let (py, pm) = dates::shift_month(year, month, false);
    let (ny, nm) = dates::shift_month(year, month, true);

    Ok(CalendarMonth {
        year,
        month: month as u8,
        leading_blank_days: first.weekday().number_days_from_sunday(),
        days,
        previous: MonthRef {
            year: py,
            month: pm as u8,
        },
        next: MonthRef {
            year: ny,
            month: nm as u8,
        },
    })
}

fn build_day(date: Date, meals: &[Meal], today: Date) -> CalendarDay {
    let day_meals: Vec<&Meal> = meals.iter().filter(|m| m.date == date).collect();

    let scores: Vec<i32> = day_meals.iter().filter_map(|m| m.quality_score).collect();
    let average_quality = (!scores.is_empty())
        .then(|| scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64);

    CalendarDay {
        date,
        overflow: day_meals.len().saturating_sub(MAX_MEALS_PER_DAY),
        meals: day_meals
            .into_iter()
            .take(MAX_MEALS_PER_DAY)
            .map(|m| CalendarMeal {
                id: m.id,
                meal_type: m.meal_type,
                description: m.description.clone(),
                photo_url: m.photo_url.clone(),
                quality_score: m.quality_score,
            })
            .collect(),
        quality_dots: average_quality.map(quality_dots).unwrap_or(0),
        average_quality,
        is_today: date == today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::stats::tests::meal;
    use time::macros::date;

    #[test]
    fn grid_starts_on_the_right_weekday() {
        // 2024-09-01 is a Sunday, 2024-05-01 a Wednesday.
        let sept = build_month(2024, Month::September, &[], date!(2024 - 09 - 10)).unwrap();
        assert_eq!(sept.leading_blank_days, 0);
        assert_eq!(sept.days.len(), 30);

        let may = build_month(2024, Month::May, &[], date!(2024 - 05 - 10)).unwrap();
        assert_eq!(may.leading_blank_days, 3);
        assert_eq!(may.days.len(), 31);
        assert!(may.days[9].is_today);
        assert_eq!(may.previous, MonthRef { year: 2024, month: 4 });
        assert_eq!(may.next, MonthRef { year: 2024, month: 6 });
    }

    #[test]
    fn caps_displayed_meals_and_counts_overflow() {
        let d = date!(2024 - 05 - 07);
        let meals: Vec<Meal> = (0..5).map(|_| meal(d, Some(3), None)).collect();
        let month = build_month(2024, Month::May, &meals, date!(2024 - 06 - 01)).unwrap();

        let cell = &month.days[6];
        assert_eq!(cell.date, d);
        assert_eq!(cell.meals.len(), MAX_MEALS_PER_DAY);
        assert_eq!(cell.overflow, 2);
        assert_eq!(cell.meals[0].id, meals[0].id);

        assert!(month.days[5].meals.is_empty());
        assert_eq!(month.days[5].overflow, 0);
    }

    #[test]
    fn average_quality_drives_rounded_dots() {
        let d = date!(2024 - 05 - 02);
        let meals = vec![
            meal(d, Some(4), None),
            meal(d, Some(3), None),
            meal(d, None, None),
        ];
        let month = build_month(2024, Month::May, &meals, date!(2024 - 06 - 01)).unwrap();
        let cell = &month.days[1];
        assert_eq!(cell.average_quality, Some(3.5));
        assert_eq!(cell.quality_dots, 4);

        let empty = &month.days[0];
        assert_eq!(empty.average_quality, None);
        assert_eq!(empty.quality_dots, 0);
    }

    #[test]
    fn meals_from_other_months_are_ignored() {
        let meals = vec![meal(date!(2024 - 06 - 01), Some(5), None)];
        let month = build_month(2024, Month::May, &meals, date!(2024 - 06 - 01)).unwrap();
        assert!(month.days.iter().all(|d| d.meals.is_empty()));
    }
}
