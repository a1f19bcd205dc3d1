// ============================================================================
// Folio API - Resume Handlers
// File: crates/folio-api/src/handlers/resume.rs
// ============================================================================
//! Request and redeem emailed resume download links

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use folio_shared::constants::{MSG_DOWNLOAD_FAILED, MSG_LINK_SENT, MSG_LINK_SEND_FAILED};
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use super::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestResumeBody {
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /api/request-resume
pub async fn request_resume(
    State(state): State<AppState>,
    payload: Result<Json<RequestResumeBody>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    // An unreadable body is treated like a missing address.
    let email = payload
        .ok()
        .and_then(|Json(body)| body.email)
        .unwrap_or_default();

    state
        .resume
        .request_link(&email)
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_LINK_SEND_FAILED))?;

    Ok(Json(MessageResponse::new(MSG_LINK_SENT)))
}

/// GET /api/download-resume/{token}
pub async fn download_resume(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let download = state
        .resume
        .redeem(&token)
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_DOWNLOAD_FAILED))?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", download.filename))
        .map_err(|e| {
            tracing::error!("Unusable download filename {:?}: {}", download.filename, e);
            ApiError::InternalError(MSG_DOWNLOAD_FAILED.to_string())
        })?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.content_type.as_str())
        .header(header::CONTENT_DISPOSITION, disposition);
    if let Some(length) = download.length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(Body::from_stream(ReaderStream::new(download.file)))
        .map_err(|e| {
            tracing::error!("Failed to build download response: {}", e);
            ApiError::InternalError(MSG_DOWNLOAD_FAILED.to_string())
        })
}
