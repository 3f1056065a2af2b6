use serde::Deserialize;

use crate::{
    error::AppError,
    validation::{is_valid_username, optional_media_url, optional_text},
};

const MAX_FULL_NAME_LEN: usize = 100;
const MAX_BIO_LEN: usize = 500;

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// Validated profile columns.
#[derive(Debug)]
pub struct ProfileFields {
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

impl TryFrom<UpsertProfileRequest> for ProfileFields {
    type Error = AppError;

    fn try_from(req: UpsertProfileRequest) -> Result<Self, Self::Error> {
        let username = req.username.trim().to_lowercase();
        if !is_valid_username(&username) {
            return Err(AppError::BadRequest(
                "username must be 3-30 characters of a-z, 0-9, '_' or '.'".into(),
            ));
        }

        let full_name = optional_text(req.full_name);
        if full_name.as_ref().is_some_and(|n| n.chars().count() > MAX_FULL_NAME_LEN) {
            return Err(AppError::BadRequest("full_name is too long".into()));
        }
        let bio = optional_text(req.bio);
        if bio.as_ref().is_some_and(|b| b.chars().count() > MAX_BIO_LEN) {
            return Err(AppError::BadRequest("bio is too long".into()));
        }

        Ok(Self {
            username,
            full_name,
            avatar_url: optional_media_url("avatar_url", req.avatar_url)?,
            bio,
        })
    }
}
