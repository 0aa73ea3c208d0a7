use serde::{Deserialize, Deserializer, Serialize};

/// Success envelope wrapping every data-bearing response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ApiResponse<T> {
    /// Always `true` on the success path.
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success envelope for endpoints that reply with a message instead of data.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ApiMessage {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Category deleted successfully")]
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `data: {}` payload for acknowledge-only endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EmptyData {}

pub const DEFAULT_PAGE_SIZE: u64 = 12;
pub const MAX_PAGE_SIZE: u64 = 50;

/// Common query parameters for paginated video listings.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number (1-based). Defaults to 1.
    pub page: Option<u64>,
    /// Page size. Defaults to 12, capped at 50.
    pub limit: Option<u64>,
    /// Category slug filter. Absent or "all" means no filter.
    pub category: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> u64 {
        Ord::max(self.page.unwrap_or(1), 1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the requested page. Saturates so an absurd page number
    /// yields an empty page instead of an overflow, and stays within the
    /// signed range Postgres accepts for OFFSET.
    pub fn offset(&self) -> u64 {
        (self.page() - 1)
            .saturating_mul(self.limit())
            .min(i64::MAX as u64)
    }

    /// Category filter, with "all" meaning none.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all")
    }
}

/// Query parameter for the search endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub searchterm: Option<String>,
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// `/api/health` payload. Deliberately not wrapped in the envelope.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthData {
    #[schema(example = "OK")]
    pub status: &'static str,
    #[schema(example = "Server is running")]
    pub message: &'static str,
    /// RFC 3339 server time.
    pub timestamp: String,
    #[schema(example = "development")]
    pub environment: String,
}
