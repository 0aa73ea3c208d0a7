use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::video::{self, UPLOAD_TYPE_FILE};
use crate::error::{AppError, ErrorBody};
use crate::models::video::PLACEHOLDER_THUMBNAIL_URL;
use crate::state::AppState;
use crate::utils::range::parse_range_header;

/// Stored media never changes once written, so clients may cache it forever.
const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(FromQueryResult)]
struct VideoFileRow {
    video_file: Option<Vec<u8>>,
    file_name: Option<String>,
    mime_type: Option<String>,
    upload_type: String,
}

#[derive(FromQueryResult)]
struct ThumbnailRow {
    thumbnail_file: Option<Vec<u8>>,
    thumbnail_file_name: Option<String>,
    thumbnail_mime_type: Option<String>,
    thumbnail: Option<String>,
}

#[utoipa::path(
    get,
    path = "/{id}/file",
    tag = "Streaming",
    operation_id = "getVideoFile",
    summary = "Stream a stored video file",
    description = "Serves the database-stored bytes of a file upload. A valid single `Range` header gets a 206 with the requested slice and a `Content-Range`; an invalid or unsatisfiable range falls back to the full body with a 200. URL videos have no stored file and answer 404.",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Full video bytes"),
        (status = 206, description = "Requested byte range"),
        (status = 404, description = "Unknown video or no stored file", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(video_id = %id))]
pub async fn get_video_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let row = fetch_file_row(&state.db, &id).await?;

    if row.upload_type != UPLOAD_TYPE_FILE {
        return Err(AppError::NotFound("Video file not available".into()));
    }
    let Some(bytes) = row.video_file else {
        return Err(AppError::NotFound("Video file not available".into()));
    };

    let total = bytes.len() as u64;
    let content_type = row.mime_type.unwrap_or_else(|| "video/mp4".to_string());
    let disposition = content_disposition_value(row.file_name.as_deref().unwrap_or("video"));

    let range = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| parse_range_header(v, total));

    let response = match range {
        Some(r) => Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_TYPE, &content_type)
            .header(header::CONTENT_LENGTH, r.len().to_string())
            .header(
                header::CONTENT_RANGE,
                format!("bytes {}-{}/{}", r.start, r.end, total),
            )
            .header(header::CONTENT_DISPOSITION, &disposition)
            .header(header::ACCEPT_RANGES, "bytes")
            .header(header::CACHE_CONTROL, ASSET_CACHE_CONTROL)
            .body(Body::from(
                bytes[r.start as usize..=r.end as usize].to_vec(),
            )),
        None => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, &content_type)
            .header(header::CONTENT_LENGTH, total.to_string())
            .header(header::CONTENT_DISPOSITION, &disposition)
            .header(header::ACCEPT_RANGES, "bytes")
            .header(header::CACHE_CONTROL, ASSET_CACHE_CONTROL)
            .body(Body::from(bytes)),
    }
    .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;

    Ok(response)
}

#[utoipa::path(
    get,
    path = "/{id}/thumbnail",
    tag = "Streaming",
    operation_id = "getThumbnailFile",
    summary = "Serve a video's thumbnail",
    description = "Serves the stored thumbnail blob when one exists, otherwise redirects to the thumbnail URL, otherwise redirects to a placeholder image.",
    params(("id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Stored thumbnail bytes"),
        (status = 302, description = "Redirect to the thumbnail URL or placeholder"),
        (status = 404, description = "Unknown video", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(video_id = %id))]
pub async fn get_thumbnail_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let row = fetch_thumbnail_row(&state.db, &id).await?;

    if let Some(bytes) = row.thumbnail_file {
        let content_type = row
            .thumbnail_mime_type
            .unwrap_or_else(|| "image/jpeg".to_string());
        let disposition =
            content_disposition_value(row.thumbnail_file_name.as_deref().unwrap_or("thumbnail"));
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, bytes.len().to_string())
            .header(header::CONTENT_DISPOSITION, disposition)
            .header(header::CACHE_CONTROL, ASSET_CACHE_CONTROL)
            .body(Body::from(bytes))
            .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))?;
        return Ok(response);
    }

    if let Some(url) = row.thumbnail.filter(|u| !u.is_empty()) {
        return redirect(&url);
    }
    redirect(PLACEHOLDER_THUMBNAIL_URL)
}

fn redirect(location: &str) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

async fn fetch_file_row<C: ConnectionTrait>(db: &C, raw_id: &str) -> Result<VideoFileRow, AppError> {
    let id = parse_id(raw_id)?;
    video::Entity::find_by_id(id)
        .select_only()
        .column(video::Column::VideoFile)
        .column(video::Column::FileName)
        .column(video::Column::MimeType)
        .column(video::Column::UploadType)
        .into_model::<VideoFileRow>()
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No video found for ID - {raw_id}")))
}

async fn fetch_thumbnail_row<C: ConnectionTrait>(
    db: &C,
    raw_id: &str,
) -> Result<ThumbnailRow, AppError> {
    let id = parse_id(raw_id)?;
    video::Entity::find_by_id(id)
        .select_only()
        .column(video::Column::ThumbnailFile)
        .column(video::Column::ThumbnailFileName)
        .column(video::Column::ThumbnailMimeType)
        .column(video::Column::Thumbnail)
        .into_model::<ThumbnailRow>()
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No video found for ID - {raw_id}")))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("No video found for ID - {raw}")))
}

fn content_disposition_value(filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => String::from(b as char),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("inline; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
