use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub description: Option<String>,

    /// External playback URL. NULL for file uploads.
    pub url: Option<String>,
    /// External thumbnail URL. NULL when a thumbnail blob is stored instead.
    pub thumbnail: Option<String>,

    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// Category slug. Joined against `category.slug`, not an enum.
    pub category: String,
    pub featured: bool,

    /// Either "url" or "file".
    pub upload_type: String,

    /// Video bytes for file uploads. NULL for URL videos.
    pub video_file: Option<Vec<u8>>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,

    pub thumbnail_file: Option<Vec<u8>>,
    pub thumbnail_file_name: Option<String>,
    pub thumbnail_file_size: Option<i64>,
    pub thumbnail_mime_type: Option<String>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

/// `upload_type` value for videos hosted at an external URL.
pub const UPLOAD_TYPE_URL: &str = "url";
/// `upload_type` value for videos whose bytes live in `video_file`.
pub const UPLOAD_TYPE_FILE: &str = "file";
