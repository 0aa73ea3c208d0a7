use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::video::UPLOAD_TYPE_URL;
use crate::entity::{comment, subscription, user, video, video_like, view};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::admin::{
    AddVideoRequest, AdminUserItem, UpdateVideoRequest, validate_add_video,
};
use crate::models::shared::{ApiResponse, EmptyData};
use crate::models::video::{VideoResponse, VideoRow};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/users",
    tag = "Admin",
    operation_id = "adminGetUsers",
    summary = "List all accounts",
    responses(
        (status = 200, description = "All accounts", body = ApiResponse<Vec<AdminUserItem>>),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id()))]
pub async fn get_users(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AdminUserItem>>>, AppError> {
    auth_user.require_admin()?;

    let users = user::Entity::find().all(&state.db).await?;
    Ok(Json(ApiResponse::new(
        users.into_iter().map(AdminUserItem::from).collect(),
    )))
}

#[utoipa::path(
    delete,
    path = "/users/{username}",
    tag = "Admin",
    operation_id = "adminRemoveUser",
    summary = "Remove an account",
    description = "Deletes the account and everything hanging off it: uploads with their engagement rows, comments, reactions, views, and subscriptions in both directions, all in one transaction. The owner account cannot be removed.",
    params(("username" = String, Path, description = "Username of the account to remove")),
    responses(
        (status = 200, description = "Account removed", body = ApiResponse<EmptyData>),
        (status = 400, description = "Target is the owner", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Unknown username", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id(), target = %username))]
pub async fn remove_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, AppError> {
    auth_user.require_admin()?;

    let txn = state.db.begin().await?;

    let target = user::Entity::find()
        .filter(user::Column::Username.eq(username.as_str()))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user found for username - '{username}'")))?;
    if target.is_owner {
        return Err(AppError::Validation(
            "The owner account cannot be removed".into(),
        ));
    }

    let video_ids: Vec<Uuid> = video::Entity::find()
        .filter(video::Column::UserId.eq(target.id))
        .select_only()
        .column(video::Column::Id)
        .into_tuple()
        .all(&txn)
        .await?;
    for id in &video_ids {
        delete_video_rows(&txn, *id).await?;
    }

    comment::Entity::delete_many()
        .filter(comment::Column::UserId.eq(target.id))
        .exec(&txn)
        .await?;
    video_like::Entity::delete_many()
        .filter(video_like::Column::UserId.eq(target.id))
        .exec(&txn)
        .await?;
    view::Entity::delete_many()
        .filter(view::Column::UserId.eq(target.id))
        .exec(&txn)
        .await?;
    subscription::Entity::delete_many()
        .filter(
            Condition::any()
                .add(subscription::Column::SubscriberId.eq(target.id))
                .add(subscription::Column::ChannelId.eq(target.id)),
        )
        .exec(&txn)
        .await?;

    user::Entity::delete_by_id(target.id).exec(&txn).await?;
    txn.commit().await?;

    state.profile_cache.clear();
    state.video_cache.clear();

    Ok(Json(ApiResponse::new(EmptyData {})))
}

#[utoipa::path(
    get,
    path = "/videos",
    tag = "Admin",
    operation_id = "adminGetVideos",
    summary = "List all videos",
    responses(
        (status = 200, description = "All videos, metadata only", body = ApiResponse<Vec<VideoResponse>>),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id()))]
pub async fn get_videos(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VideoResponse>>>, AppError> {
    auth_user.require_admin()?;

    let rows = video::Entity::find()
        .order_by_desc(video::Column::CreatedAt)
        .select_only()
        .columns(super::video::metadata_columns())
        .into_model::<VideoRow>()
        .all(&state.db)
        .await?;

    Ok(Json(ApiResponse::new(
        rows.into_iter().map(VideoResponse::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/videos",
    tag = "Admin",
    operation_id = "adminAddVideo",
    summary = "Add a URL video",
    description = "Creates a URL-based video owned by the acting admin. File uploads go through the regular multipart endpoint.",
    request_body = AddVideoRequest,
    responses(
        (status = 200, description = "Created video", body = ApiResponse<VideoResponse>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user_id = %auth_user.id()))]
pub async fn add_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<AddVideoRequest>,
) -> Result<Json<ApiResponse<VideoResponse>>, AppError> {
    auth_user.require_admin()?;
    validate_add_video(&payload)?;

    let category = payload
        .category
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.trim().to_lowercase())
        .unwrap_or_else(|| "movies".to_string());
    super::video::ensure_category_exists(&state.db, &category).await?;

    let model = video::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description.filter(|d| !d.is_empty())),
        url: Set(Some(payload.url.trim().to_string())),
        thumbnail: Set(payload.thumbnail.filter(|t| !t.trim().is_empty())),
        user_id: Set(auth_user.id()),
        category: Set(category),
        featured: Set(payload.featured.unwrap_or(true)),
        upload_type: Set(UPLOAD_TYPE_URL.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    state.video_cache.clear();

    Ok(Json(ApiResponse::new(VideoResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/videos/{id}",
    tag = "Admin",
    operation_id = "adminUpdateVideo",
    summary = "Update a video",
    description = "Partial update of title, description, url, thumbnail, featured, and category. Absent fields keep their value.",
    request_body = UpdateVideoRequest,
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Updated video", body = ApiResponse<VideoResponse>),
        (status = 400, description = "Unknown category", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user_id = %auth_user.id(), video_id = %id))]
pub async fn update_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateVideoRequest>,
) -> Result<Json<ApiResponse<VideoResponse>>, AppError> {
    auth_user.require_admin()?;

    let row = super::video::find_video_row(&state.db, &id).await?;
    let video_id = row.id;

    let mut active = video::ActiveModel {
        id: Unchanged(video_id),
        ..Default::default()
    };
    if let Some(v) = payload.title.filter(|s| !s.trim().is_empty()) {
        active.title = Set(v.trim().to_string());
    }
    if let Some(v) = payload.description.filter(|s| !s.trim().is_empty()) {
        active.description = Set(Some(v));
    }
    if let Some(v) = payload.url.filter(|s| !s.trim().is_empty()) {
        active.url = Set(Some(v.trim().to_string()));
    }
    if let Some(v) = payload.thumbnail.filter(|s| !s.trim().is_empty()) {
        active.thumbnail = Set(Some(v.trim().to_string()));
    }
    if let Some(v) = payload.featured {
        active.featured = Set(v);
    }
    if let Some(v) = payload.category.filter(|s| !s.trim().is_empty()) {
        let slug = v.trim().to_lowercase();
        super::video::ensure_category_exists(&state.db, &slug).await?;
        active.category = Set(slug);
    }

    active.update(&state.db).await?;
    state.video_cache.invalidate(&video_id);

    let updated = super::video::find_video_row(&state.db, &id).await?;
    Ok(Json(ApiResponse::new(VideoResponse::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/videos/{id}",
    tag = "Admin",
    operation_id = "adminRemoveVideo",
    summary = "Remove a video",
    description = "Deletes the video with its comments, reactions, and views in one transaction.",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video removed", body = ApiResponse<EmptyData>),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id(), video_id = %id))]
pub async fn remove_video(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, AppError> {
    auth_user.require_admin()?;

    let txn = state.db.begin().await?;
    let row = super::video::find_video_row(&txn, &id).await?;
    delete_video_rows(&txn, row.id).await?;
    txn.commit().await?;

    state.video_cache.invalidate(&row.id);
    state.profile_cache.clear();

    Ok(Json(ApiResponse::new(EmptyData {})))
}

/// Delete a video and its dependent engagement rows.
async fn delete_video_rows<C: ConnectionTrait>(db: &C, video_id: Uuid) -> Result<(), AppError> {
    comment::Entity::delete_many()
        .filter(comment::Column::VideoId.eq(video_id))
        .exec(db)
        .await?;
    video_like::Entity::delete_many()
        .filter(video_like::Column::VideoId.eq(video_id))
        .exec(db)
        .await?;
    view::Entity::delete_many()
        .filter(view::Column::VideoId.eq(video_id))
        .exec(db)
        .await?;
    video::Entity::delete_by_id(video_id).exec(db).await?;
    Ok(())
}
