use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::category;
use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub order: i32,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl From<category::Model> for CategoryData {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            order: model.order,
            is_default: model.is_default,
            created_at: model.created_at,
        }
    }
}

/// Request body for creating a category. Both fields are required; they are
/// options only so the handler can answer with the proper message instead of
/// a serde error.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Documentaries")]
    pub name: Option<String>,
    /// Stored lowercased.
    #[schema(example = "documentaries")]
    pub slug: Option<String>,
}

pub fn validate_create_category(
    payload: &CreateCategoryRequest,
) -> Result<(String, String), AppError> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    let slug = payload.slug.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() || slug.is_empty() {
        return Err(AppError::Validation("Name and slug are required".into()));
    }
    Ok((name.to_owned(), slug.to_lowercase()))
}

/// Request body for renaming a category. Absent fields keep their value.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReorderEntry {
    pub id: i32,
    pub order: i32,
}

/// Request body for reordering the category rail.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReorderCategoriesRequest {
    pub categories: Vec<ReorderEntry>,
}
