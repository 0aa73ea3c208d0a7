use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::ChannelSummary;

/// Request body for account registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    #[schema(example = "Alice")]
    pub firstname: String,
    #[schema(example = "Wonder")]
    pub lastname: String,
    /// Unique handle shown on the channel page.
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (at least 6 characters). Stored only as an Argon2 hash.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_signup_request(payload: &SignupRequest) -> Result<(), AppError> {
    if payload.firstname.trim().is_empty() || payload.lastname.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide your firstname and lastname".into(),
        ));
    }
    let username = payload.username.trim();
    if username.is_empty() || username.chars().count() > 32 {
        return Err(AppError::Validation(
            "Username must be 1-32 characters".into(),
        ));
    }
    let email = payload.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "Please provide a valid email address".into(),
        ));
    }
    if payload.password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

/// Request body for login. `email` also matches against usernames, so either
/// identifier logs in.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Email address or username.
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "Please provide an email/username and password".into(),
        ));
    }
    Ok(())
}

/// Current authenticated user's account, as returned by `/auth/me`.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeData {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub channel_description: Option<String>,
    pub is_admin: bool,
    pub is_owner: bool,
    /// Channels this account subscribes to.
    pub channels: Vec<ChannelSummary>,
}
