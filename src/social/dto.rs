use axum::Json;
use serde::{Deserialize, Serialize};

use super::repo_types::{MediaType, NewPost};
use crate::{
    error::AppError,
    validation::{optional_media_url, required_text},
};

pub const MAX_POST_LEN: usize = 2000;
pub const MAX_COMMENT_LEN: usize = 500;
pub const MAX_FEED_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

impl FeedQuery {
    /// Requested limit clamped to `1..=MAX_FEED_LIMIT`, `default` when absent.
    pub fn effective_limit(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, MAX_FEED_LIMIT)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
}

impl TryFrom<CreatePostRequest> for NewPost {
    type Error = AppError;

    fn try_from(req: CreatePostRequest) -> Result<Self, Self::Error> {
        let content = required_text("content", &req.content, MAX_POST_LEN)?;
        let media_url = optional_media_url("media_url", req.media_url)?;
        let media_type = match (&media_url, req.media_type) {
            (None, Some(_)) => {
                return Err(AppError::BadRequest(
                    "media_type requires media_url".into(),
                ))
            }
            (Some(_), None) => Some(MediaType::Photo),
            (_, t) => t,
        };
        Ok(NewPost {
            meal_id: None,
            content,
            media_url,
            media_type,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ShareMealRequest {
    pub comment: Option<String>,
}

impl ShareMealRequest {
    /// The body is optional: an empty one shares without a comment. A
    /// non-empty body must be JSON and must parse.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        if !content_type.is_some_and(is_json_content_type) {
            return Err(AppError::UnsupportedMediaType);
        }
        let Json(req) = Json::<Self>::from_bytes(body)?;
        Ok(req)
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub likes_count: i32,
}
