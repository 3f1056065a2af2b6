use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{ProfileFields, UpsertProfileRequest},
    repo_types::Profile,
};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/me", get(get_me).put(put_me))
        .route("/profiles/:id", get(get_profile))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Profile>> {
    let profile = Profile::find(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("Profile"))?;
    Ok(Json(profile))
}

#[instrument(skip(state, payload))]
pub async fn put_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpsertProfileRequest>,
) -> AppResult<Json<Profile>> {
    let fields = ProfileFields::try_from(payload)?;
    let profile = match Profile::upsert(&state.db, user_id, &fields).await {
        Ok(p) => p,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            warn!(username = %fields.username, "username already taken");
            return Err(AppError::Conflict("Username already taken".into()));
        }
        Err(e) => return Err(e.into()),
    };
    info!(%user_id, username = %profile.username, "profile saved");
    Ok(Json(profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    let profile = Profile::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Profile"))?;
    Ok(Json(profile))
}
