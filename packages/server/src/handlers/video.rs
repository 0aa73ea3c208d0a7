use std::collections::HashMap;

use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, OnConflict};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::entity::video::{self, UPLOAD_TYPE_FILE, UPLOAD_TYPE_URL};
use crate::entity::{category, comment, subscription, user, video_like, view};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthUser, OptionalAuthUser};
use crate::extractors::json::AppJson;
use crate::models::shared::{ApiResponse, EmptyData, ListQuery, SearchQuery, escape_like};
use crate::models::user::ChannelSummary;
use crate::models::video::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Videos",
    operation_id = "recommendedVideos",
    summary = "List recommended videos",
    description = "Returns the home feed: featured videos first, newest first within each group. Supports pagination and an optional category slug filter.",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of video cards", body = ApiResponse<Vec<VideoListItem>>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn recommended_videos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<VideoListItem>>>, AppError> {
    let mut select = video::Entity::find();
    if let Some(slug) = query.category_filter() {
        select = select.filter(video::Column::Category.eq(slug));
    }

    let rows = select
        .order_by_desc(video::Column::Featured)
        .order_by_desc(video::Column::CreatedAt)
        .select_only()
        .columns(metadata_columns())
        .offset(Some(query.offset()))
        .limit(Some(query.limit()))
        .into_model::<VideoRow>()
        .all(&state.db)
        .await?;

    let items = attach_listing_context(&state.db, rows, VideoListItem::from_row).await?;
    Ok(Json(ApiResponse::new(items)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Videos",
    operation_id = "newVideo",
    summary = "Upload a video",
    description = "Multipart form. Text fields: `title` (required), `description`, `category` (slug, defaults to \"movies\"), `url`, `thumbnail`. File fields: `videoFile` stores the bytes in the database and nulls `url`; `thumbnailFile` does the same for the thumbnail. URL videos must provide a thumbnail URL or image; file videos without one get a placeholder thumbnail.",
    responses(
        (status = 200, description = "Created video metadata", body = ApiResponse<VideoResponse>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, multipart), fields(user_id = %auth_user.id()))]
pub async fn new_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<VideoResponse>>, AppError> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut category: Option<String> = None;
    let mut url: Option<String> = None;
    let mut thumbnail_url: Option<String> = None;
    let mut video_file: Option<UploadedFile> = None;
    let mut thumbnail_file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("title") => title = Some(read_text(field, "title").await?),
            Some("description") => description = Some(read_text(field, "description").await?),
            Some("category") => category = Some(read_text(field, "category").await?),
            Some("url") => url = Some(read_text(field, "url").await?),
            Some("thumbnail") => thumbnail_url = Some(read_text(field, "thumbnail").await?),
            Some("videoFile") => {
                video_file =
                    Some(read_file(field, state.config.uploads.max_video_bytes).await?);
            }
            Some("thumbnailFile") => {
                thumbnail_file =
                    Some(read_file(field, state.config.uploads.max_thumbnail_bytes).await?);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".into()))?;
    let category = category
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.trim().to_lowercase())
        .unwrap_or_else(|| "movies".to_string());
    ensure_category_exists(&state.db, &category).await?;

    let url = url.filter(|u| !u.trim().is_empty());
    let mut thumbnail_url = thumbnail_url.filter(|t| !t.trim().is_empty());

    let mut new_video = video::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.trim().to_string()),
        description: Set(description.filter(|d| !d.is_empty())),
        user_id: Set(auth_user.id()),
        category: Set(category),
        featured: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    if let Some(file) = video_file {
        let size = i64::try_from(file.bytes.len()).unwrap_or(i64::MAX);
        new_video.upload_type = Set(UPLOAD_TYPE_FILE.to_string());
        new_video.url = Set(None);
        new_video.file_name = Set(file.file_name);
        new_video.file_size = Set(Some(size));
        new_video.mime_type = Set(file.content_type);
        new_video.video_file = Set(Some(file.bytes));
        if thumbnail_url.is_none() && thumbnail_file.is_none() {
            thumbnail_url = Some(PLACEHOLDER_THUMBNAIL_URL.to_string());
        }
    } else {
        let url = url.ok_or_else(|| {
            AppError::Validation("Provide a video URL or upload a video file".into())
        })?;
        if thumbnail_url.is_none() && thumbnail_file.is_none() {
            return Err(AppError::Validation(
                "Provide a thumbnail URL or upload a thumbnail image".into(),
            ));
        }
        new_video.upload_type = Set(UPLOAD_TYPE_URL.to_string());
        new_video.url = Set(Some(url.trim().to_string()));
    }

    if let Some(thumb) = thumbnail_file {
        let size = i64::try_from(thumb.bytes.len()).unwrap_or(i64::MAX);
        new_video.thumbnail_file_name = Set(thumb.file_name);
        new_video.thumbnail_file_size = Set(Some(size));
        new_video.thumbnail_mime_type = Set(thumb.content_type);
        new_video.thumbnail_file = Set(Some(thumb.bytes));
    }
    new_video.thumbnail = Set(thumbnail_url);

    let model = new_video.insert(&state.db).await?;
    state.video_cache.clear();

    Ok(Json(ApiResponse::new(VideoResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "Videos",
    operation_id = "searchVideos",
    summary = "Search videos",
    description = "Case-insensitive substring match against title and description. LIKE wildcards in the term are escaped.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching videos", body = ApiResponse<Vec<VideoSearchItem>>),
        (status = 400, description = "Missing search term", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn search_videos(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<VideoSearchItem>>>, AppError> {
    let term = query.searchterm.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(AppError::Validation("Please enter the searchterm".into()));
    }

    let pattern = format!("%{}%", escape_like(term).to_lowercase());
    let rows = video::Entity::find()
        .filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(video::Column::Title)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(video::Column::Description)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                ),
        )
        .select_only()
        .columns(metadata_columns())
        .into_model::<VideoRow>()
        .all(&state.db)
        .await?;

    let items = attach_listing_context(&state.db, rows, VideoSearchItem::from_row).await?;
    Ok(Json(ApiResponse::new(items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Videos",
    operation_id = "getVideo",
    summary = "Get the watch page for a video",
    description = "Full metadata with uploader, comments (newest first), engagement counts, and per-viewer flags. The viewer-independent part is served from a short cache when one is configured; the flags are always computed fresh.",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Watch page payload", body = ApiResponse<VideoDetail>),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
)]
#[instrument(skip(viewer, state), fields(video_id = %id))]
pub async fn get_video(
    OptionalAuthUser(viewer): OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VideoDetail>>, AppError> {
    let video_id = parse_video_id(&id)?;

    let core = match state.video_cache.get(&video_id) {
        Some(core) => core,
        None => {
            let core = load_video_core(&state.db, &id).await?;
            state.video_cache.insert(video_id, core.clone());
            core
        }
    };

    let flags = viewer_flags(&state.db, viewer.as_ref(), video_id, core.video.user_id).await?;
    Ok(Json(ApiResponse::new(VideoDetail {
        core,
        is_liked: flags.is_liked,
        is_disliked: flags.is_disliked,
        is_viewed: flags.is_viewed,
        is_subscribed: flags.is_subscribed,
        is_video_mine: flags.is_video_mine,
    })))
}

#[utoipa::path(
    get,
    path = "/{id}/like",
    tag = "Videos",
    operation_id = "likeVideo",
    summary = "Toggle a like",
    description = "No reaction becomes a like, a like toggles off, a dislike flips to a like. One reaction row per viewer and video.",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Reaction updated", body = ApiResponse<EmptyData>),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(video_id = %id, user_id = %auth_user.id()))]
pub async fn like_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, AppError> {
    react_to_video(&state, auth_user.id(), &id, video_like::LIKE).await?;
    Ok(Json(ApiResponse::new(EmptyData {})))
}

#[utoipa::path(
    get,
    path = "/{id}/dislike",
    tag = "Videos",
    operation_id = "dislikeVideo",
    summary = "Toggle a dislike",
    description = "Mirror of the like toggle: no reaction becomes a dislike, a dislike toggles off, a like flips to a dislike.",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Reaction updated", body = ApiResponse<EmptyData>),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(video_id = %id, user_id = %auth_user.id()))]
pub async fn dislike_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, AppError> {
    react_to_video(&state, auth_user.id(), &id, video_like::DISLIKE).await?;
    Ok(Json(ApiResponse::new(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = "Videos",
    operation_id = "addComment",
    summary = "Comment on a video",
    request_body = AddCommentRequest,
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Created comment with its author", body = ApiResponse<CommentWithAuthor>),
        (status = 400, description = "Empty comment", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(video_id = %id, user_id = %auth_user.id()))]
pub async fn add_comment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<AddCommentRequest>,
) -> Result<Json<ApiResponse<CommentWithAuthor>>, AppError> {
    validate_comment_request(&payload)?;
    let row = find_video_row(&state.db, &id).await?;

    let model = comment::ActiveModel {
        id: Set(Uuid::new_v4()),
        text: Set(payload.text),
        user_id: Set(auth_user.id()),
        video_id: Set(row.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    state.video_cache.invalidate(&row.id);

    Ok(Json(ApiResponse::new(CommentWithAuthor {
        id: model.id,
        text: model.text,
        created_at: model.created_at,
        user: ChannelSummary::from(&auth_user.user),
    })))
}

#[utoipa::path(
    get,
    path = "/{id}/view",
    tag = "Videos",
    operation_id = "addView",
    summary = "Record a view",
    description = "Counts at most one view per account and video. Anonymous requests succeed without recording anything; a repeat view is a 400.",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "View recorded (or skipped for anonymous viewers)", body = ApiResponse<EmptyData>),
        (status = 400, description = "Already viewed", body = ErrorBody),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
)]
#[instrument(skip(viewer, state), fields(video_id = %id))]
pub async fn add_view(
    OptionalAuthUser(viewer): OptionalAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let row = find_video_row(&state.db, &id).await?;

    let Some(viewer) = viewer else {
        return Ok(Json(ApiResponse::new(ViewSkipped {
            message: "View not recorded - user not authenticated",
        }))
        .into_response());
    };

    let inserted = view::ActiveModel {
        user_id: Set(viewer.id),
        video_id: Set(row.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await;

    if let Err(e) = inserted {
        return Err(match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::Validation("You already viewed this video".into())
            }
            _ => AppError::from(e),
        });
    }

    state.video_cache.invalidate(&row.id);
    Ok(Json(ApiResponse::new(EmptyData {})).into_response())
}

/// Body limit layer for the multipart upload route, sized from configuration
/// with a little slack for the text fields.
pub fn upload_body_limit(uploads: &UploadConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(uploads.max_video_bytes + uploads.max_thumbnail_bytes + 64 * 1024)
}

struct UploadedFile {
    bytes: Vec<u8>,
    file_name: Option<String>,
    content_type: Option<String>,
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))
}

async fn read_file(mut field: Field<'_>, max_size: usize) -> Result<UploadedFile, AppError> {
    let file_name = field.file_name().map(|s| s.to_string());
    let content_type = field.content_type().map(|s| s.to_string());

    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        if bytes.len() + chunk.len() > max_size {
            return Err(AppError::Validation(format!(
                "File exceeds maximum size of {max_size} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(UploadedFile {
        bytes,
        file_name,
        content_type,
    })
}

/// Every video column except the two blobs.
pub(crate) fn metadata_columns() -> [video::Column; 16] {
    [
        video::Column::Id,
        video::Column::Title,
        video::Column::Description,
        video::Column::Url,
        video::Column::Thumbnail,
        video::Column::UserId,
        video::Column::Category,
        video::Column::Featured,
        video::Column::UploadType,
        video::Column::FileName,
        video::Column::FileSize,
        video::Column::MimeType,
        video::Column::ThumbnailFileName,
        video::Column::ThumbnailFileSize,
        video::Column::ThumbnailMimeType,
        video::Column::CreatedAt,
    ]
}

fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("No video found for ID - {raw}")))
}

/// Fetch a video's metadata row by its raw path parameter. Unparseable and
/// unknown ids get the same 404 so the message can echo the raw value.
pub(crate) async fn find_video_row<C: ConnectionTrait>(
    db: &C,
    raw_id: &str,
) -> Result<VideoRow, AppError> {
    let id = parse_video_id(raw_id)?;
    video::Entity::find_by_id(id)
        .select_only()
        .columns(metadata_columns())
        .into_model::<VideoRow>()
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No video found for ID - {raw_id}")))
}

pub(crate) async fn ensure_category_exists<C: ConnectionTrait>(
    db: &C,
    slug: &str,
) -> Result<(), AppError> {
    let found = category::Entity::find()
        .filter(category::Column::Slug.eq(slug))
        .count(db)
        .await?;
    if found == 0 {
        return Err(AppError::Validation(format!("Unknown category - '{slug}'")));
    }
    Ok(())
}

/// Per-video view counts in one grouped query.
pub(crate) async fn view_counts<C: ConnectionTrait>(
    db: &C,
    video_ids: &[Uuid],
) -> Result<HashMap<Uuid, u64>, AppError> {
    if video_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, i64)> = view::Entity::find()
        .filter(view::Column::VideoId.is_in(video_ids.iter().copied()))
        .select_only()
        .column(view::Column::VideoId)
        .column_as(view::Column::UserId.count(), "cnt")
        .group_by(view::Column::VideoId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
}

/// Channel summaries for a set of user ids.
pub(crate) async fn channel_summaries<C: ConnectionTrait>(
    db: &C,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, ChannelSummary>, AppError> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let users = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids.iter().copied()))
        .all(db)
        .await?;
    Ok(users
        .iter()
        .map(|u| (u.id, ChannelSummary::from(u)))
        .collect())
}

/// Attach uploader summaries and view counts to listing rows, preserving
/// query order.
pub(crate) async fn attach_listing_context<C, T>(
    db: &C,
    rows: Vec<VideoRow>,
    build: fn(VideoRow, ChannelSummary, u64) -> T,
) -> Result<Vec<T>, AppError>
where
    C: ConnectionTrait,
{
    let user_ids: Vec<Uuid> = rows.iter().map(|r| r.user_id).collect();
    let video_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let uploaders = channel_summaries(db, &user_ids).await?;
    let views = view_counts(db, &video_ids).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let user = uploaders.get(&row.user_id)?.clone();
            let views = views.get(&row.id).copied().unwrap_or(0);
            Some(build(row, user, views))
        })
        .collect())
}

async fn load_video_core<C: ConnectionTrait>(
    db: &C,
    raw_id: &str,
) -> Result<VideoDetailCore, AppError> {
    let row = find_video_row(db, raw_id).await?;
    let video_id = row.id;
    let uploader_id = row.user_id;

    let uploader = user::Entity::find_by_id(uploader_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Uploader missing for video {video_id}")))?;

    let comments = comments_with_authors(db, video_id).await?;
    let comments_count = comments.len() as u64;

    let likes_count = video_like::Entity::find()
        .filter(video_like::Column::VideoId.eq(video_id))
        .filter(video_like::Column::Value.eq(video_like::LIKE))
        .count(db)
        .await?;
    let dislikes_count = video_like::Entity::find()
        .filter(video_like::Column::VideoId.eq(video_id))
        .filter(video_like::Column::Value.eq(video_like::DISLIKE))
        .count(db)
        .await?;
    let views = view::Entity::find()
        .filter(view::Column::VideoId.eq(video_id))
        .count(db)
        .await?;
    let subscribers_count = subscription::Entity::find()
        .filter(subscription::Column::ChannelId.eq(uploader_id))
        .count(db)
        .await?;

    Ok(VideoDetailCore {
        video: row.into(),
        user: ChannelSummary::from(&uploader),
        comments,
        comments_count,
        likes_count,
        dislikes_count,
        views,
        subscribers_count,
    })
}

async fn comments_with_authors<C: ConnectionTrait>(
    db: &C,
    video_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, AppError> {
    let comments = comment::Entity::find()
        .filter(comment::Column::VideoId.eq(video_id))
        .order_by_desc(comment::Column::CreatedAt)
        .all(db)
        .await?;

    let author_ids: Vec<Uuid> = comments.iter().map(|c| c.user_id).collect();
    let authors = channel_summaries(db, &author_ids).await?;

    Ok(comments
        .into_iter()
        .filter_map(|c| {
            let user = authors.get(&c.user_id)?.clone();
            Some(CommentWithAuthor {
                id: c.id,
                text: c.text,
                created_at: c.created_at,
                user,
            })
        })
        .collect())
}

#[derive(Default)]
struct ViewerFlags {
    is_liked: bool,
    is_disliked: bool,
    is_viewed: bool,
    is_subscribed: bool,
    is_video_mine: bool,
}

async fn viewer_flags<C: ConnectionTrait>(
    db: &C,
    viewer: Option<&user::Model>,
    video_id: Uuid,
    uploader_id: Uuid,
) -> Result<ViewerFlags, AppError> {
    let Some(viewer) = viewer else {
        return Ok(ViewerFlags::default());
    };

    let reaction = video_like::Entity::find_by_id((viewer.id, video_id))
        .one(db)
        .await?;
    let is_viewed = view::Entity::find_by_id((viewer.id, video_id))
        .one(db)
        .await?
        .is_some();
    let is_subscribed = subscription::Entity::find_by_id((viewer.id, uploader_id))
        .one(db)
        .await?
        .is_some();

    Ok(ViewerFlags {
        is_liked: reaction
            .as_ref()
            .is_some_and(|r| r.value == video_like::LIKE),
        is_disliked: reaction
            .as_ref()
            .is_some_and(|r| r.value == video_like::DISLIKE),
        is_viewed,
        is_subscribed,
        is_video_mine: viewer.id == uploader_id,
    })
}

async fn react_to_video(
    state: &AppState,
    user_id: Uuid,
    raw_id: &str,
    wanted: i16,
) -> Result<(), AppError> {
    let row = find_video_row(&state.db, raw_id).await?;
    let video_id = row.id;

    match video_like::Entity::find_by_id((user_id, video_id))
        .one(&state.db)
        .await?
    {
        // Repeating the same reaction toggles it off.
        Some(existing) if existing.value == wanted => {
            video_like::Entity::delete_by_id((user_id, video_id))
                .exec(&state.db)
                .await?;
        }
        // The opposite reaction flips in place.
        Some(existing) => {
            let mut active: video_like::ActiveModel = existing.into();
            active.value = Set(wanted);
            active.update(&state.db).await?;
        }
        // No reaction yet. The upsert absorbs a concurrent first reaction.
        None => {
            let active = video_like::ActiveModel {
                user_id: Set(user_id),
                video_id: Set(video_id),
                value: Set(wanted),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };
            video_like::Entity::insert(active)
                .on_conflict(
                    OnConflict::columns([
                        video_like::Column::UserId,
                        video_like::Column::VideoId,
                    ])
                    .update_column(video_like::Column::Value)
                    .to_owned(),
                )
                .exec_without_returning(&state.db)
                .await?;
        }
    }

    state.video_cache.invalidate(&video_id);
    Ok(())
}
