use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::UnsupportedMediaType => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }
            AppError::Json(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Database(sqlx::Error::RowNotFound) => {
                (StatusCode::NOT_FOUND, "Not found".into())
            }
            AppError::Database(sqlx::Error::Database(db)) => match db.code().as_deref() {
                Some(PG_UNIQUE_VIOLATION) => (StatusCode::CONFLICT, "Already exists".into()),
                Some(PG_FOREIGN_KEY_VIOLATION) => foreign_key_violation(db.constraint()),
                _ => {
                    tracing::error!(error = %db, "database error");
                    internal()
                }
            },
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                internal()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                internal()
            }
        }
    }
}

/// The missing parent decides the answer: a vanished post is a 404, a
/// missing profile row means the caller has not created one yet.
fn foreign_key_violation(constraint: Option<&str>) -> (StatusCode, String) {
    match constraint {
        Some(c) if c.ends_with("_post_id_fkey") => (StatusCode::NOT_FOUND, "Post not found".into()),
        Some(c) if c.ends_with("_meal_id_fkey") => (StatusCode::NOT_FOUND, "Meal not found".into()),
        _ => (StatusCode::BAD_REQUEST, "profile required".into()),
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.status_and_message().into_response()
    }
}
