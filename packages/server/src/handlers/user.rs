use std::collections::{HashMap, HashSet};

use axum::Json;
use axum::extract::{Path, Query, State};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, OnConflict};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{subscription, user, video, video_like, view};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::shared::{ApiResponse, EmptyData, SearchQuery, escape_like};
use crate::models::user::{
    AdminStatusData, ChannelCard, ChannelListItem, ChannelSummary, EditUserData, EditUserRequest,
    ProfileCore, ProfileData, ProfileVideo,
};
use crate::models::video::{FeedVideo, LibraryVideo, VideoRow};
use crate::state::AppState;

#[utoipa::path(
    put,
    path = "/",
    tag = "Users",
    operation_id = "editUser",
    summary = "Edit the current account",
    description = "Partial update of profile fields. Nullable fields (avatar, cover, channel description) clear on an explicit null and keep their value when absent. Role flags cannot be changed here.",
    request_body = EditUserRequest,
    responses(
        (status = 200, description = "Updated account fields", body = ApiResponse<EditUserData>),
        (status = 400, description = "Duplicate username or email", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user_id = %auth_user.id()))]
pub async fn edit_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<EditUserRequest>,
) -> Result<Json<ApiResponse<EditUserData>>, AppError> {
    let mut active: user::ActiveModel = auth_user.user.into();

    if let Some(v) = payload.firstname.filter(|s| !s.trim().is_empty()) {
        active.firstname = Set(v.trim().to_string());
    }
    if let Some(v) = payload.lastname.filter(|s| !s.trim().is_empty()) {
        active.lastname = Set(v.trim().to_string());
    }
    if let Some(v) = payload.username.filter(|s| !s.trim().is_empty()) {
        active.username = Set(v.trim().to_string());
    }
    if let Some(v) = payload.email.filter(|s| !s.trim().is_empty()) {
        active.email = Set(v.trim().to_string());
    }
    if let Some(v) = payload.channel_description {
        active.channel_description = Set(v);
    }
    if let Some(v) = payload.avatar {
        active.avatar = Set(v);
    }
    if let Some(v) = payload.cover {
        active.cover = Set(v);
    }

    let updated = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Validation("Username or email is already taken".into())
        }
        _ => AppError::from(e),
    })?;

    // Other profiles embed this user's channel card, so drop them all.
    state.profile_cache.clear();

    Ok(Json(ApiResponse::new(EditUserData::from(updated))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    operation_id = "recommendChannels",
    summary = "Recommend channels",
    description = "Up to ten channels other than the caller's, with audience and upload counts.",
    responses(
        (status = 200, description = "Recommended channels", body = ApiResponse<Vec<ChannelListItem>>),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id()))]
pub async fn recommend_channels(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ChannelListItem>>>, AppError> {
    let me = auth_user.id();

    let users = user::Entity::find()
        .filter(user::Column::Id.ne(me))
        .limit(Some(10))
        .all(&state.db)
        .await?;

    let items = channel_list_items(&state.db, me, users, false).await?;
    Ok(Json(ApiResponse::new(items)))
}

#[utoipa::path(
    get,
    path = "/likedVideos",
    tag = "Users",
    operation_id = "getLikedVideos",
    summary = "List videos the caller liked",
    description = "Only current likes count; a like that was toggled off or flipped to a dislike no longer appears. Oldest like first.",
    responses(
        (status = 200, description = "Liked videos", body = ApiResponse<Vec<LibraryVideo>>),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id()))]
pub async fn liked_videos(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LibraryVideo>>>, AppError> {
    let ordered_ids: Vec<Uuid> = video_like::Entity::find()
        .filter(video_like::Column::UserId.eq(auth_user.id()))
        .filter(video_like::Column::Value.eq(crate::entity::video_like::LIKE))
        .order_by_asc(video_like::Column::CreatedAt)
        .select_only()
        .column(video_like::Column::VideoId)
        .into_tuple()
        .all(&state.db)
        .await?;

    let items = library_videos(&state.db, &ordered_ids).await?;
    Ok(Json(ApiResponse::new(items)))
}

#[utoipa::path(
    get,
    path = "/history",
    tag = "Users",
    operation_id = "getHistory",
    summary = "List videos the caller has viewed",
    description = "Watch history in view order, oldest first.",
    responses(
        (status = 200, description = "Viewed videos", body = ApiResponse<Vec<LibraryVideo>>),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id()))]
pub async fn history(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LibraryVideo>>>, AppError> {
    let ordered_ids: Vec<Uuid> = view::Entity::find()
        .filter(view::Column::UserId.eq(auth_user.id()))
        .order_by_asc(view::Column::CreatedAt)
        .select_only()
        .column(view::Column::VideoId)
        .into_tuple()
        .all(&state.db)
        .await?;

    let items = library_videos(&state.db, &ordered_ids).await?;
    Ok(Json(ApiResponse::new(items)))
}

#[utoipa::path(
    get,
    path = "/feed",
    tag = "Users",
    operation_id = "getFeed",
    summary = "Get the subscription feed",
    description = "Videos from channels the caller subscribes to, newest first.",
    responses(
        (status = 200, description = "Feed videos", body = ApiResponse<Vec<FeedVideo>>),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id()))]
pub async fn get_feed(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<FeedVideo>>>, AppError> {
    let channel_ids = subscribed_channel_ids(&state.db, auth_user.id()).await?;
    if channel_ids.is_empty() {
        return Ok(Json(ApiResponse::new(Vec::new())));
    }

    let rows = video::Entity::find()
        .filter(video::Column::UserId.is_in(channel_ids.iter().copied()))
        .order_by_desc(video::Column::CreatedAt)
        .select_only()
        .columns(super::video::metadata_columns())
        .into_model::<VideoRow>()
        .all(&state.db)
        .await?;

    let items = super::video::attach_listing_context(&state.db, rows, FeedVideo::from_row).await?;
    Ok(Json(ApiResponse::new(items)))
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "Users",
    operation_id = "searchUsers",
    summary = "Search channels",
    description = "Case-insensitive substring match against usernames.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching channels", body = ApiResponse<Vec<ChannelListItem>>),
        (status = 400, description = "Missing search term", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, query), fields(user_id = %auth_user.id()))]
pub async fn search_users(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<ChannelListItem>>>, AppError> {
    let term = query.searchterm.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(AppError::Validation("Please enter your search term".into()));
    }

    let pattern = format!("%{}%", escape_like(term).to_lowercase());
    let users = user::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(user::Column::Username)))
                .like(LikeExpr::new(pattern).escape('\\')),
        )
        .all(&state.db)
        .await?;

    let items = channel_list_items(&state.db, auth_user.id(), users, true).await?;
    Ok(Json(ApiResponse::new(items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getProfile",
    summary = "Get a channel profile",
    description = "Channel page: account fields, audience size, subscribed channels with their audiences, and uploads with view counts. The viewer-independent part is cached briefly; `isMe` and `isSubscribed` are always fresh.",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile payload", body = ApiResponse<ProfileData>),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(target = %id, user_id = %auth_user.id()))]
pub async fn get_profile(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProfileData>>, AppError> {
    let target_id = Uuid::parse_str(&id)
        .map_err(|_| AppError::NotFound(format!("No user found for ID - {id}")))?;

    let core = match state.profile_cache.get(&target_id) {
        Some(core) => core,
        None => {
            let core = load_profile_core(&state.db, &id, target_id).await?;
            state.profile_cache.insert(target_id, core.clone());
            core
        }
    };

    let viewer_id = auth_user.id();
    let is_me = viewer_id == target_id;
    let is_subscribed = subscription::Entity::find_by_id((viewer_id, target_id))
        .one(&state.db)
        .await?
        .is_some();

    Ok(Json(ApiResponse::new(ProfileData {
        core,
        is_me,
        is_subscribed,
    })))
}

#[utoipa::path(
    get,
    path = "/{id}/togglesubscribe",
    tag = "Users",
    operation_id = "toggleSubscribe",
    summary = "Subscribe to or unsubscribe from a channel",
    params(("id" = String, Path, description = "Channel user ID")),
    responses(
        (status = 200, description = "Subscription toggled", body = ApiResponse<EmptyData>),
        (status = 400, description = "Tried to subscribe to own channel", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(target = %id, user_id = %auth_user.id()))]
pub async fn toggle_subscribe(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, AppError> {
    let me = auth_user.id();
    let channel = find_channel_user(&state.db, &id).await?;
    if channel.id == me {
        return Err(AppError::Validation(
            "You cannot to subscribe to your own channel".into(),
        ));
    }

    match subscription::Entity::find_by_id((me, channel.id))
        .one(&state.db)
        .await?
    {
        Some(_) => {
            subscription::Entity::delete_by_id((me, channel.id))
                .exec(&state.db)
                .await?;
        }
        None => {
            let active = subscription::ActiveModel {
                subscriber_id: Set(me),
                channel_id: Set(channel.id),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };
            let insert = subscription::Entity::insert(active)
                .on_conflict(
                    OnConflict::columns([
                        subscription::Column::SubscriberId,
                        subscription::Column::ChannelId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&state.db)
                .await;
            match insert {
                Ok(_) => {}
                // A concurrent subscribe already created the row.
                Err(DbErr::RecordNotInserted) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    state.profile_cache.clear();
    Ok(Json(ApiResponse::new(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/{id}/toggle-admin",
    tag = "Users",
    operation_id = "toggleAdmin",
    summary = "Toggle another account's admin flag",
    description = "Owner only. The owner's own flag cannot be toggled, so there is always at least one admin.",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "New admin status", body = ApiResponse<AdminStatusData>),
        (status = 400, description = "Target is the owner", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not the owner", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(target = %id, user_id = %auth_user.id()))]
pub async fn toggle_admin(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AdminStatusData>>, AppError> {
    auth_user.require_owner()?;

    let target = find_channel_user(&state.db, &id).await?;
    if target.is_owner {
        return Err(AppError::Validation(
            "The owner's admin status cannot be changed".into(),
        ));
    }

    let next = !target.is_admin;
    let mut active: user::ActiveModel = target.into();
    active.is_admin = Set(next);
    let updated = active.update(&state.db).await?;

    Ok(Json(ApiResponse::new(AdminStatusData {
        id: updated.id,
        username: updated.username,
        is_admin: updated.is_admin,
    })))
}

/// Channels a user subscribes to, in subscription order.
pub(crate) async fn subscribed_channels<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<ChannelSummary>, AppError> {
    let channel_ids: Vec<Uuid> = subscription::Entity::find()
        .filter(subscription::Column::SubscriberId.eq(user_id))
        .order_by_asc(subscription::Column::CreatedAt)
        .select_only()
        .column(subscription::Column::ChannelId)
        .into_tuple()
        .all(db)
        .await?;

    let summaries = super::video::channel_summaries(db, &channel_ids).await?;
    Ok(channel_ids
        .iter()
        .filter_map(|id| summaries.get(id).cloned())
        .collect())
}

async fn subscribed_channel_ids<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<Uuid>, AppError> {
    Ok(subscription::Entity::find()
        .filter(subscription::Column::SubscriberId.eq(user_id))
        .select_only()
        .column(subscription::Column::ChannelId)
        .into_tuple()
        .all(db)
        .await?)
}

/// Per-channel subscriber counts in one grouped query.
async fn subscriber_counts<C: ConnectionTrait>(
    db: &C,
    channel_ids: &[Uuid],
) -> Result<HashMap<Uuid, u64>, AppError> {
    if channel_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, i64)> = subscription::Entity::find()
        .filter(subscription::Column::ChannelId.is_in(channel_ids.iter().copied()))
        .select_only()
        .column(subscription::Column::ChannelId)
        .column_as(subscription::Column::SubscriberId.count(), "cnt")
        .group_by(subscription::Column::ChannelId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
}

/// Per-uploader video counts in one grouped query.
async fn video_counts<C: ConnectionTrait>(
    db: &C,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, u64>, AppError> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, i64)> = video::Entity::find()
        .filter(video::Column::UserId.is_in(user_ids.iter().copied()))
        .select_only()
        .column(video::Column::UserId)
        .column_as(video::Column::Id.count(), "cnt")
        .group_by(video::Column::UserId)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
}

async fn channel_list_items<C: ConnectionTrait>(
    db: &C,
    viewer_id: Uuid,
    users: Vec<user::Model>,
    with_is_me: bool,
) -> Result<Vec<ChannelListItem>, AppError> {
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let subscribers = subscriber_counts(db, &ids).await?;
    let videos = video_counts(db, &ids).await?;
    let my_subscriptions: HashSet<Uuid> = subscribed_channel_ids(db, viewer_id)
        .await?
        .into_iter()
        .collect();

    Ok(users
        .into_iter()
        .map(|u| ChannelListItem {
            subscribers_count: subscribers.get(&u.id).copied().unwrap_or(0),
            videos_count: videos.get(&u.id).copied().unwrap_or(0),
            is_subscribed: my_subscriptions.contains(&u.id),
            is_me: with_is_me.then(|| u.id == viewer_id),
            id: u.id,
            username: u.username,
            avatar: u.avatar,
            channel_description: u.channel_description,
        })
        .collect())
}

/// Videos for the library lists, re-ordered to match the relation order.
async fn library_videos<C: ConnectionTrait>(
    db: &C,
    ordered_ids: &[Uuid],
) -> Result<Vec<LibraryVideo>, AppError> {
    if ordered_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = video::Entity::find()
        .filter(video::Column::Id.is_in(ordered_ids.iter().copied()))
        .select_only()
        .columns(super::video::metadata_columns())
        .into_model::<VideoRow>()
        .all(db)
        .await?;

    let items = super::video::attach_listing_context(db, rows, LibraryVideo::from_row).await?;
    let mut by_id: HashMap<Uuid, LibraryVideo> = items.into_iter().map(|i| (i.id, i)).collect();
    Ok(ordered_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect())
}

async fn load_profile_core<C: ConnectionTrait>(
    db: &C,
    raw_id: &str,
    target_id: Uuid,
) -> Result<ProfileCore, AppError> {
    let target = user::Entity::find_by_id(target_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No user found for ID - {raw_id}")))?;

    let subscribers_count = subscription::Entity::find()
        .filter(subscription::Column::ChannelId.eq(target.id))
        .count(db)
        .await?;
    let channels = channel_cards(db, target.id).await?;
    let videos = profile_videos(db, target.id).await?;

    Ok(ProfileCore {
        id: target.id,
        firstname: target.firstname,
        lastname: target.lastname,
        username: target.username,
        cover: target.cover,
        avatar: target.avatar,
        email: target.email,
        channel_description: target.channel_description,
        subscribers_count,
        channels,
        videos,
    })
}

/// Channels a user subscribes to, each with its audience size.
async fn channel_cards<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<ChannelCard>, AppError> {
    let channel_ids = subscribed_channel_ids(db, user_id).await?;
    if channel_ids.is_empty() {
        return Ok(Vec::new());
    }

    let users = user::Entity::find()
        .filter(user::Column::Id.is_in(channel_ids.iter().copied()))
        .all(db)
        .await?;
    let counts = subscriber_counts(db, &channel_ids).await?;

    Ok(users
        .into_iter()
        .map(|u| ChannelCard {
            subscribers_count: counts.get(&u.id).copied().unwrap_or(0),
            id: u.id,
            username: u.username,
            avatar: u.avatar,
        })
        .collect())
}

async fn profile_videos<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<ProfileVideo>, AppError> {
    let rows = video::Entity::find()
        .filter(video::Column::UserId.eq(user_id))
        .order_by_desc(video::Column::CreatedAt)
        .select_only()
        .columns(super::video::metadata_columns())
        .into_model::<VideoRow>()
        .all(db)
        .await?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let views = super::video::view_counts(db, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| ProfileVideo {
            views: views.get(&row.id).copied().unwrap_or(0),
            id: row.id,
            thumbnail: row.thumbnail,
            title: row.title,
            created_at: row.created_at,
            category: row.category,
        })
        .collect())
}

async fn find_channel_user<C: ConnectionTrait>(
    db: &C,
    raw_id: &str,
) -> Result<user::Model, AppError> {
    let not_found = || AppError::NotFound(format!("No user found for ID - '{raw_id}'"));
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
    user::Entity::find_by_id(id).one(db).await?.ok_or_else(not_found)
}
