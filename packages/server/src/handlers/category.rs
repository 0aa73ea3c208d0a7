use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{category, video};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::category::{
    CategoryData, CreateCategoryRequest, ReorderCategoriesRequest, UpdateCategoryRequest,
    validate_create_category,
};
use crate::models::shared::{ApiMessage, ApiResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Categories",
    operation_id = "getAllCategories",
    summary = "List categories",
    description = "All categories in rail order.",
    responses(
        (status = 200, description = "Categories ordered by position then name", body = ApiResponse<Vec<CategoryData>>),
    ),
)]
#[instrument(skip(state))]
pub async fn get_all_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryData>>>, AppError> {
    let categories = ordered_categories(&state.db).await?;
    Ok(Json(ApiResponse::new(categories)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Categories",
    operation_id = "createCategory",
    summary = "Create a category",
    description = "Admin only. The slug is lowercased; the new category lands at the end of the rail.",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Created category", body = ApiResponse<CategoryData>),
        (status = 400, description = "Missing fields or duplicate name/slug", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user_id = %auth_user.id()))]
pub async fn create_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    let (name, slug) = validate_create_category(&payload)?;

    let txn = state.db.begin().await?;

    let max_order: Option<i32> = category::Entity::find()
        .select_only()
        .column_as(category::Column::Order.max(), "max_order")
        .into_tuple()
        .one(&txn)
        .await?
        .flatten();

    let model = category::ActiveModel {
        name: Set(name),
        slug: Set(slug),
        order: Set(max_order.unwrap_or(0) + 1),
        is_default: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Validation("Category name or slug already exists".into())
        }
        _ => AppError::from(e),
    })?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CategoryData::from(model))),
    ))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Categories",
    operation_id = "updateCategory",
    summary = "Rename a category",
    description = "Admin only. Videos keep referencing the slug by value, so renaming the display name never touches video rows; changing the slug orphans them deliberately.",
    request_body = UpdateCategoryRequest,
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Updated category", body = ApiResponse<CategoryData>),
        (status = 400, description = "Duplicate name/slug", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Unknown category", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user_id = %auth_user.id()))]
pub async fn update_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryData>>, AppError> {
    auth_user.require_admin()?;

    let existing = find_category(&state.db, id).await?;
    let mut active: category::ActiveModel = existing.into();

    if let Some(name) = payload.name.filter(|n| !n.trim().is_empty()) {
        active.name = Set(name.trim().to_string());
    }
    if let Some(slug) = payload.slug.filter(|s| !s.trim().is_empty()) {
        active.slug = Set(slug.trim().to_lowercase());
    }

    let updated = active.update(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Validation("Category name or slug already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok(Json(ApiResponse::new(CategoryData::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    operation_id = "deleteCategory",
    summary = "Delete a category",
    description = "Admin only. Default categories cannot be deleted, and neither can a category that still has videos; the reference check and the delete run in one transaction.",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiMessage),
        (status = 400, description = "Default category or category still in use", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Unknown category", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state), fields(user_id = %auth_user.id()))]
pub async fn delete_category(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiMessage>, AppError> {
    auth_user.require_admin()?;

    let txn = state.db.begin().await?;

    let existing = find_category(&txn, id).await?;
    if existing.is_default {
        return Err(AppError::Validation("Cannot delete default category".into()));
    }

    let video_count = video::Entity::find()
        .filter(video::Column::Category.eq(existing.slug.as_str()))
        .count(&txn)
        .await?;
    if video_count > 0 {
        return Err(AppError::Validation(format!(
            "Cannot delete category with {video_count} video(s). Please move or delete videos first."
        )));
    }

    category::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    Ok(Json(ApiMessage::new("Category deleted successfully")))
}

#[utoipa::path(
    post,
    path = "/reorder",
    tag = "Categories",
    operation_id = "reorderCategories",
    summary = "Reorder the category rail",
    description = "Admin only. Applies each {id, order} pair in one transaction and returns the rail in its new order.",
    request_body = ReorderCategoriesRequest,
    responses(
        (status = 200, description = "Categories in their new order", body = ApiResponse<Vec<CategoryData>>),
        (status = 400, description = "Empty reorder list", body = ErrorBody),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user, state, payload), fields(user_id = %auth_user.id()))]
pub async fn reorder_categories(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderCategoriesRequest>,
) -> Result<Json<ApiResponse<Vec<CategoryData>>>, AppError> {
    auth_user.require_admin()?;
    if payload.categories.is_empty() {
        return Err(AppError::Validation("Categories must be an array".into()));
    }

    let txn = state.db.begin().await?;

    for entry in &payload.categories {
        category::Entity::update_many()
            .filter(category::Column::Id.eq(entry.id))
            .col_expr(category::Column::Order, Expr::value(entry.order))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    let categories = ordered_categories(&state.db).await?;
    Ok(Json(ApiResponse::new(categories)))
}

async fn ordered_categories<C: ConnectionTrait>(db: &C) -> Result<Vec<CategoryData>, AppError> {
    let rows = category::Entity::find()
        .order_by_asc(category::Column::Order)
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(CategoryData::from).collect())
}

async fn find_category<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<category::Model, AppError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))
}
