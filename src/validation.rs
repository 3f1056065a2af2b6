use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[a-z0-9_.]{3,30}$").unwrap();
    static ref MEDIA_URL_RE: Regex =
        Regex::new(r"^(https?://\S+|data:image/[a-z0-9.+-]+;base64,[A-Za-z0-9+/=]+)$").unwrap();
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Remote `http(s)` URL or an inline `data:image/...;base64,` URL.
pub(crate) fn is_valid_media_url(url: &str) -> bool {
    MEDIA_URL_RE.is_match(url)
}

/// Trims `value` and rejects it when empty or longer than `max` characters.
pub(crate) fn required_text(field: &str, value: &str, max: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be {max} characters or less"
        )));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn optional_media_url(field: &str, url: Option<String>) -> Result<Option<String>, AppError> {
    match optional_text(url) {
        Some(u) if !is_valid_media_url(&u) => {
            Err(AppError::BadRequest(format!("{field} must be an http(s) or data:image URL")))
        }
        other => Ok(other),
    }
}
