use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::user;
use crate::error::AppError;

/// Account row in the admin panel's user table.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserItem {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub is_admin: bool,
}

impl From<user::Model> for AdminUserItem {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            is_admin: user.is_admin,
        }
    }
}

/// Request body for the admin's URL-based video create.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddVideoRequest {
    #[schema(example = "Big Buck Bunny")]
    pub title: String,
    pub description: Option<String>,
    /// External playback URL.
    pub url: String,
    pub thumbnail: Option<String>,
    /// Category slug. Defaults to "movies".
    pub category: Option<String>,
    /// Defaults to `true`.
    pub featured: Option<bool>,
}

pub fn validate_add_video(payload: &AddVideoRequest) -> Result<(), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    if payload.url.trim().is_empty() {
        return Err(AppError::Validation(
            "Provide a video URL for the new video".into(),
        ));
    }
    Ok(())
}

/// Request body for the admin's partial video update. Empty strings are
/// treated like absent fields; `featured` toggles on any explicit value.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub featured: Option<bool>,
    pub category: Option<String>,
}
