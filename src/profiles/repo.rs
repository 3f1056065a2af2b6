use sqlx::PgPool;
use uuid::Uuid;

use super::{dto::ProfileFields, repo_types::Profile};

impl Profile {
    pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, username, full_name, avatar_url, bio, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Creates the caller's profile or overwrites its editable fields.
    pub async fn upsert(db: &PgPool, id: Uuid, f: &ProfileFields) -> sqlx::Result<Profile> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, username, full_name, avatar_url, bio)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
               SET username = EXCLUDED.username,
                   full_name = EXCLUDED.full_name,
                   avatar_url = EXCLUDED.avatar_url,
                   bio = EXCLUDED.bio,
                   updated_at = now()
            RETURNING id, username, full_name, avatar_url, bio, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&f.username)
        .bind(&f.full_name)
        .bind(&f.avatar_url)
        .bind(&f.bio)
        .fetch_one(db)
        .await
    }
}
