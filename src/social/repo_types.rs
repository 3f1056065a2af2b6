use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "media_type", rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
}

/// Feed item: a `social_posts` row joined with its author and counters.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub meal_id: Option<Uuid>,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
    pub likes_count: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub username: String,
    pub avatar_url: Option<String>,
    pub comment_count: i64,
    pub liked_by_me: bool,
}

/// A `post_comments` row joined with its author's username.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub username: String,
}

/// Columns of a post being inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub meal_id: Option<Uuid>,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
}
