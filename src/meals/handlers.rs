use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{EstimateRequest, MealDetails, MealRange, MealRequest},
    repo,
    repo_types::Meal,
    services,
};
use crate::{
    auth::AuthUser,
    dates,
    error::{AppError, AppResult},
    nutrition::estimator::{self, Estimate},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/:id", get(get_meal))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/estimate", post(estimate_meal))
        .route("/meals/:id", axum::routing::put(update_meal).delete(delete_meal))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(range): Query<MealRange>,
) -> AppResult<Json<Vec<Meal>>> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::BadRequest("from must not be after to".into()));
        }
    }
    let meals = repo::list_in_range(&state.db, user_id, range.from, range.to).await?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MealDetails>> {
    let meal = repo::find(&state.db, user_id, id)
        .await?
        .ok_or(AppError::NotFound("Meal"))?;
    Ok(Json(meal.into()))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<MealRequest>,
) -> AppResult<(StatusCode, HeaderMap, Json<MealDetails>)> {
    let fields = services::prepare_new(body, dates::today())?;
    let meal = repo::insert(&state.db, user_id, &fields).await?;
    info!(%user_id, meal_id = %meal.id, "meal created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/meals/{}", meal.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(meal.into())))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MealRequest>,
) -> AppResult<Json<MealDetails>> {
    let fields = services::prepare_update(body)?;
    let meal = repo::update(&state.db, user_id, id, &fields)
        .await?
        .ok_or(AppError::NotFound("Meal"))?;
    info!(%user_id, meal_id = %meal.id, "meal updated");
    Ok(Json(meal.into()))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !repo::delete(&state.db, user_id, id).await? {
        return Err(AppError::NotFound("Meal"));
    }
    info!(%user_id, meal_id = %id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Pure estimate, nothing is stored.
#[instrument(skip(body))]
pub async fn estimate_meal(
    AuthUser(_user_id): AuthUser,
    Json(body): Json<EstimateRequest>,
) -> Json<Estimate> {
    Json(estimator::estimate(&body.description, body.meal_type))
}
