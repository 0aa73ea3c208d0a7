use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::models::shared::HealthData;
use crate::state::AppState;

/// Fallback thumbnail, served inline so it works without any asset files.
const PLACEHOLDER_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="800" height="450" viewBox="0 0 800 450">
  <defs>
    <linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="#1e293b"/>
      <stop offset="100%" stop-color="#334155"/>
    </linearGradient>
  </defs>
  <rect width="800" height="450" fill="url(#g)"/>
  <g fill="#e2e8f0" font-family="Inter,Segoe UI,Arial" text-anchor="middle">
    <text x="400" y="230" font-size="36" font-weight="700">Ruzmovie</text>
    <text x="400" y="270" font-size="18" opacity="0.8">No thumbnail</text>
  </g>
</svg>"##;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Misc",
    operation_id = "healthCheck",
    summary = "Liveness check",
    responses(
        (status = 200, description = "Server is up", body = HealthData),
    ),
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "OK",
        message: "Server is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
        environment: state.config.server.environment.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/placeholder-thumbnail.jpg",
    tag = "Misc",
    operation_id = "placeholderThumbnail",
    summary = "Placeholder thumbnail image",
    responses(
        (status = 200, description = "Inline SVG placeholder", content_type = "image/svg+xml"),
    ),
)]
pub async fn placeholder_thumbnail() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], PLACEHOLDER_SVG)
}
