use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::user;
use crate::models::shared::double_option;

/// Minimal channel identity attached to videos and comments under the `User` key.
#[derive(Clone, Serialize, utoipa::ToSchema)]
pub struct ChannelSummary {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
}

impl From<&user::Model> for ChannelSummary {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Channel entry on a profile page, with its audience size.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCard {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
    pub subscribers_count: u64,
}

/// Channel entry in search results and recommendations.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListItem {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
    pub channel_description: Option<String>,
    pub subscribers_count: u64,
    pub videos_count: u64,
    pub is_subscribed: bool,
    /// Only present in search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_me: Option<bool>,
}

/// Video card on a profile page.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileVideo {
    pub id: Uuid,
    pub thumbnail: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub views: u64,
}

/// Viewer-independent part of a profile response. This is what the profile
/// cache stores; viewer flags are layered on fresh per request.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCore {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub cover: Option<String>,
    pub avatar: Option<String>,
    pub email: String,
    pub channel_description: Option<String>,
    pub subscribers_count: u64,
    /// Channels this user subscribes to.
    pub channels: Vec<ChannelCard>,
    /// This user's uploads, newest first.
    pub videos: Vec<ProfileVideo>,
}

/// Full profile response.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[serde(flatten)]
    pub core: ProfileCore,
    pub is_me: bool,
    pub is_subscribed: bool,
}

/// Request body for editing the caller's own account.
///
/// Nullable columns use [`double_option`] so an explicit `null` clears the
/// field while an absent key leaves it untouched.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(nullable)]
    pub channel_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(nullable)]
    pub avatar: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(nullable)]
    pub cover: Option<Option<String>>,
}

/// Account fields echoed back after an edit. Role flags are deliberately
/// not included.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditUserData {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub channel_description: Option<String>,
    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub email: String,
}

impl From<user::Model> for EditUserData {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            username: user.username,
            channel_description: user.channel_description,
            avatar: user.avatar,
            cover: user.cover,
            email: user.email,
        }
    }
}

/// Result of an owner toggling another account's admin flag.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatusData {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
}
