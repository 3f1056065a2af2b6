use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use time::Month;
use tracing::{debug, instrument};

use super::{
    calendar::{self, CalendarMonth},
    stats::{self, Period, PeriodStats},
};
use crate::{
    auth::AuthUser,
    dates,
    error::{AppError, AppResult},
    meals::repo as meals_repo,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/calendar", get(get_calendar))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<StatsQuery>,
) -> AppResult<Json<PeriodStats>> {
    let since = q.period.start(dates::today());
    let meals = meals_repo::list_since_desc(&state.db, user_id, since).await?;
    debug!(%user_id, meals = meals.len(), "computing period stats");
    Ok(Json(stats::summarize(&meals)))
}

#[instrument(skip(state))]
pub async fn get_calendar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<CalendarQuery>,
) -> AppResult<Json<CalendarMonth>> {
    let today = dates::today();
    let (year, month) = resolve_month(&q, today)?;
    let (first, last) = dates::month_bounds(year, month)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let meals = meals_repo::list_in_range(&state.db, user_id, Some(first), Some(last)).await?;
    let grid = calendar::build_month(year, month, &meals, today)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(grid))
}

fn resolve_month(q: &CalendarQuery, today: time::Date) -> AppResult<(i32, Month)> {
    let year = q.year.unwrap_or(today.year());
    if !(1900..=9999).contains(&year) {
        return Err(AppError::BadRequest("year out of range".into()));
    }
    let month = match q.month {
        Some(m) => Month::try_from(m).map_err(|_| AppError::BadRequest("month must be 1-12".into()))?,
        None => today.month(),
    };
    Ok((year, month))
}
