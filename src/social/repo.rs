use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{CommentView, FeedPost, NewPost};

const FEED_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.meal_id, p.content, p.media_url, p.media_type,
           p.likes_count, p.created_at, pr.username, pr.avatar_url,
           (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comment_count,
           EXISTS (SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = $1)
               AS liked_by_me
      FROM social_posts p
      JOIN profiles pr ON pr.id = p.user_id
"#;

/// Newest posts first, as seen by `viewer`.
pub async fn list_feed(db: &PgPool, viewer: Uuid, limit: i64) -> sqlx::Result<Vec<FeedPost>> {
    sqlx::query_as::<_, FeedPost>(&format!(
        "{FEED_SELECT} ORDER BY p.created_at DESC LIMIT $2"
    ))
    .bind(viewer)
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn find_feed_post(
    db: &PgPool,
    viewer: Uuid,
    post_id: Uuid,
) -> sqlx::Result<Option<FeedPost>> {
    sqlx::query_as::<_, FeedPost>(&format!("{FEED_SELECT} WHERE p.id = $2"))
        .bind(viewer)
        .bind(post_id)
        .fetch_optional(db)
        .await
}

pub async fn insert_post(db: &PgPool, user_id: Uuid, post: &NewPost) -> sqlx::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO social_posts (user_id, meal_id, content, media_url, media_type)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(post.meal_id)
    .bind(&post.content)
    .bind(&post.media_url)
    .bind(post.media_type)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn post_author(db: &PgPool, post_id: Uuid) -> sqlx::Result<Option<Uuid>> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT user_id FROM social_posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(|(user_id,)| user_id))
}

pub async fn delete_post(db: &PgPool, post_id: Uuid) -> sqlx::Result<bool> {
    let res = sqlx::query("DELETE FROM social_posts WHERE id = $1")
        .bind(post_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub likes_count: i32,
}

/// Flips the `(post, user)` like and keeps `likes_count` in step, in one
/// transaction. `None` when the post does not exist.
pub async fn toggle_like(db: &PgPool, post_id: Uuid, user_id: Uuid) -> sqlx::Result<Option<LikeState>> {
    let mut tx = db.begin().await?;

    let locked: Option<(i32,)> =
        sqlx::query_as("SELECT likes_count FROM social_posts WHERE id = $1 FOR UPDATE")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
    if locked.is_none() {
        return Ok(None);
    }

    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    if !removed {
        sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    let delta: i32 = if removed { -1 } else { 1 };
    let (likes_count,): (i32,) = sqlx::query_as(
        r#"
        UPDATE social_posts
           SET likes_count = GREATEST(likes_count + $2, 0)
         WHERE id = $1
        RETURNING likes_count
        "#,
    )
    .bind(post_id)
    .bind(delta)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(LikeState {
        liked: !removed,
        likes_count,
    }))
}

pub async fn post_exists(db: &PgPool, post_id: Uuid) -> sqlx::Result<bool> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM social_posts WHERE id = $1)")
            .bind(post_id)
            .fetch_one(db)
            .await?;
    Ok(exists)
}

/// Oldest first, as a thread reads.
pub async fn list_comments(db: &PgPool, post_id: Uuid) -> sqlx::Result<Vec<CommentView>> {
    sqlx::query_as::<_, CommentView>(
        r#"
        SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, pr.username
          FROM post_comments c
          JOIN profiles pr ON pr.id = c.user_id
         WHERE c.post_id = $1
         ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(db)
    .await
}

pub async fn insert_comment(
    db: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> sqlx::Result<CommentView> {
    sqlx::query_as::<_, CommentView>(
        r#"
        WITH c AS (
            INSERT INTO post_comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at
        )
        SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, pr.username
          FROM c
          JOIN profiles pr ON pr.id = c.user_id
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(db)
    .await
}
