use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{
        CreateCommentRequest, CreatePostRequest, FeedQuery, LikeResponse, ShareMealRequest,
        MAX_COMMENT_LEN,
    },
    events::{self, FeedEvent},
    repo,
    repo_types::{CommentView, FeedPost, NewPost},
    share,
};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    meals::repo as meals_repo,
    state::AppState,
    validation::required_text,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/feed", get(list_feed))
        .route("/feed/events", get(feed_events))
        .route("/posts/:id/comments", get(list_comments))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", delete(delete_post))
        .route("/posts/:id/like", post(toggle_like))
        .route("/posts/:id/comments", post(add_comment))
        .route("/meals/:id/share", post(share_meal))
}

#[instrument(skip(state))]
pub async fn list_feed(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<FeedQuery>,
) -> AppResult<Json<Vec<FeedPost>>> {
    let limit = q.effective_limit(state.config.feed_limit);
    let posts = repo::list_feed(&state.db, user_id, limit).await?;
    Ok(Json(posts))
}

/// Server-Sent Events stream of feed changes.
pub async fn feed_events(State(state): State<AppState>) -> impl IntoResponse {
    info!(subscribers = state.feed.subscriber_count() + 1, "feed subscriber connected");
    events::sse(&state.feed)
}

#[instrument(skip(state, body))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<FeedPost>)> {
    let new_post = NewPost::try_from(body)?;
    let post = publish_new_post(&state, user_id, &new_post).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[instrument(skip(state, headers, body))]
pub async fn share_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(meal_id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, Json<FeedPost>)> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let body = ShareMealRequest::from_body(content_type, &body)?;
    let meal = meals_repo::find(&state.db, user_id, meal_id)
        .await?
        .ok_or(AppError::NotFound("Meal"))?;

    let new_post = share::post_from_meal(&meal, body.comment.as_deref());
    let post = publish_new_post(&state, user_id, &new_post).await?;
    info!(%user_id, %meal_id, post_id = %post.id, "meal shared");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn publish_new_post(state: &AppState, user_id: Uuid, new_post: &NewPost) -> AppResult<FeedPost> {
    let post_id = repo::insert_post(&state.db, user_id, new_post).await?;
    let post = repo::find_feed_post(&state.db, user_id, post_id)
        .await?
        .ok_or(AppError::NotFound("Post"))?;
    info!(%user_id, %post_id, "post created");
    state.feed.publish(FeedEvent::PostCreated { post: post.clone() });
    Ok(post)
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let author = repo::post_author(&state.db, post_id)
        .await?
        .ok_or(AppError::NotFound("Post"))?;
    if author != user_id {
        warn!(%user_id, %post_id, "delete of someone else's post refused");
        return Err(AppError::Forbidden);
    }
    if repo::delete_post(&state.db, post_id).await? {
        state.feed.publish(FeedEvent::PostDeleted { post_id });
        info!(%user_id, %post_id, "post deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<LikeResponse>> {
    let like = repo::toggle_like(&state.db, post_id, user_id)
        .await?
        .ok_or(AppError::NotFound("Post"))?;
    state.feed.publish(FeedEvent::PostUpdated {
        post_id,
        likes_count: like.likes_count,
    });
    Ok(Json(LikeResponse {
        liked: like.liked,
        likes_count: like.likes_count,
    }))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<Vec<CommentView>>> {
    if !repo::post_exists(&state.db, post_id).await? {
        return Err(AppError::NotFound("Post"));
    }
    Ok(Json(repo::list_comments(&state.db, post_id).await?))
}

#[instrument(skip(state, body))]
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(body): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentView>)> {
    let content = required_text("content", &body.content, MAX_COMMENT_LEN)?;
    if !repo::post_exists(&state.db, post_id).await? {
        return Err(AppError::NotFound("Post"));
    }
    let comment = repo::insert_comment(&state.db, post_id, user_id, &content).await?;
    state.feed.publish(FeedEvent::CommentAdded {
        post_id,
        comment: comment.clone(),
    });
    Ok((StatusCode::CREATED, Json(comment)))
}
