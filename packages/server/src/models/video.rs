use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::video::{self, UPLOAD_TYPE_FILE};
use crate::error::AppError;
use crate::models::user::ChannelSummary;

/// Thumbnail used for file uploads that provide no thumbnail of their own.
pub const PLACEHOLDER_THUMBNAIL_URL: &str =
    "https://via.placeholder.com/320x180.png?text=Video+Thumbnail";

/// Streaming path for a stored video file.
pub fn video_file_url(id: Uuid) -> String {
    format!("/api/v1/videos/{id}/file")
}

/// Serving path for a stored thumbnail image.
pub fn thumbnail_file_url(id: Uuid) -> String {
    format!("/api/v1/videos/{id}/thumbnail")
}

/// All video columns except the two blobs. Every listing and detail query
/// selects exactly these, so the payload bytes never leave the database for
/// metadata reads.
#[derive(Clone, FromQueryResult)]
pub struct VideoRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub user_id: Uuid,
    pub category: String,
    pub featured: bool,
    pub upload_type: String,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub thumbnail_file_name: Option<String>,
    pub thumbnail_file_size: Option<i64>,
    pub thumbnail_mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full video metadata, as returned by upload and the admin endpoints.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub user_id: Uuid,
    pub category: String,
    pub featured: bool,
    pub upload_type: String,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub thumbnail_file_name: Option<String>,
    pub thumbnail_file_size: Option<i64>,
    pub thumbnail_mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Present for file uploads; points at the streaming endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file_url: Option<String>,
    /// Present when a thumbnail blob is stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_url: Option<String>,
}

impl From<VideoRow> for VideoResponse {
    fn from(row: VideoRow) -> Self {
        let video_file_url =
            (row.upload_type == UPLOAD_TYPE_FILE).then(|| video_file_url(row.id));
        let thumbnail_file_url = row
            .thumbnail_file_size
            .is_some()
            .then(|| thumbnail_file_url(row.id));
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            url: row.url,
            thumbnail: row.thumbnail,
            user_id: row.user_id,
            category: row.category,
            featured: row.featured,
            upload_type: row.upload_type,
            file_name: row.file_name,
            file_size: row.file_size,
            mime_type: row.mime_type,
            thumbnail_file_name: row.thumbnail_file_name,
            thumbnail_file_size: row.thumbnail_file_size,
            thumbnail_mime_type: row.thumbnail_mime_type,
            created_at: row.created_at,
            video_file_url,
            thumbnail_file_url,
        }
    }
}

impl From<video::Model> for VideoResponse {
    fn from(model: video::Model) -> Self {
        VideoRow {
            id: model.id,
            title: model.title,
            description: model.description,
            url: model.url,
            thumbnail: model.thumbnail,
            user_id: model.user_id,
            category: model.category,
            featured: model.featured,
            upload_type: model.upload_type,
            file_name: model.file_name,
            file_size: model.file_size,
            mime_type: model.mime_type,
            thumbnail_file_name: model.thumbnail_file_name,
            thumbnail_file_size: model.thumbnail_file_size,
            thumbnail_mime_type: model.thumbnail_mime_type,
            created_at: model.created_at,
        }
        .into()
    }
}

/// Card in the home feed of recommended videos.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoListItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_url: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub featured: bool,
    #[serde(rename = "User")]
    pub user: ChannelSummary,
    pub views: u64,
}

impl VideoListItem {
    pub fn from_row(row: VideoRow, user: ChannelSummary, views: u64) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            thumbnail: row.thumbnail,
            thumbnail_file_url: row
                .thumbnail_file_size
                .is_some()
                .then(|| thumbnail_file_url(row.id)),
            user_id: row.user_id,
            created_at: row.created_at,
            category: row.category,
            featured: row.featured,
            user,
            views,
        }
    }
}

/// Card in video search results.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub upload_type: String,
    #[serde(rename = "User")]
    pub user: ChannelSummary,
    pub views: u64,
}

impl VideoSearchItem {
    pub fn from_row(row: VideoRow, user: ChannelSummary, views: u64) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            thumbnail: row.thumbnail,
            thumbnail_file_url: row
                .thumbnail_file_size
                .is_some()
                .then(|| thumbnail_file_url(row.id)),
            created_at: row.created_at,
            category: row.category,
            upload_type: row.upload_type,
            user,
            views,
        }
    }
}

/// Card in the subscription feed.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedVideo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub category: String,
    #[serde(rename = "User")]
    pub user: ChannelSummary,
    pub views: u64,
}

impl FeedVideo {
    pub fn from_row(row: VideoRow, user: ChannelSummary, views: u64) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            thumbnail: row.thumbnail,
            created_at: row.created_at,
            category: row.category,
            user,
            views,
        }
    }
}

/// Card in the liked-videos and watch-history lists.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryVideo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
    pub category: String,
    #[serde(rename = "User")]
    pub user: ChannelSummary,
    pub views: u64,
}

impl LibraryVideo {
    pub fn from_row(row: VideoRow, user: ChannelSummary, views: u64) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
            thumbnail: row.thumbnail,
            url: row.url,
            category: row.category,
            user,
            views,
        }
    }
}

/// Request body for commenting on a video.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddCommentRequest {
    #[schema(example = "Great video!")]
    pub text: String,
}

pub fn validate_comment_request(payload: &AddCommentRequest) -> Result<(), AppError> {
    if payload.text.trim().is_empty() {
        return Err(AppError::Validation("Comment text is required".into()));
    }
    Ok(())
}

/// Comment with its author, newest first on the watch page.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "User")]
    pub user: ChannelSummary,
}

/// Viewer-independent part of the watch page. This is what the video cache
/// stores; the per-viewer flags are computed fresh per request.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetailCore {
    #[serde(flatten)]
    pub video: VideoResponse,
    #[serde(rename = "User")]
    pub user: ChannelSummary,
    pub comments: Vec<CommentWithAuthor>,
    pub comments_count: u64,
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub views: u64,
    /// Audience size of the uploader's channel.
    pub subscribers_count: u64,
}

/// Full watch-page response.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    #[serde(flatten)]
    pub core: VideoDetailCore,
    pub is_liked: bool,
    pub is_disliked: bool,
    pub is_viewed: bool,
    pub is_subscribed: bool,
    pub is_video_mine: bool,
}

/// `data` payload when an anonymous request hits the view endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ViewSkipped {
    #[schema(example = "View not recorded - user not authenticated")]
    pub message: &'static str,
}
