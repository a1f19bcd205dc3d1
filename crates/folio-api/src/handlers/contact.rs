//! Contact form relay handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use folio_core::ContactSubmission;
use folio_shared::constants::{MSG_CONTACT_FAILED, MSG_CONTACT_SENT, MSG_FIELDS_REQUIRED};
use serde::Deserialize;

use super::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactBody {
    pub name: String,
    pub email: String,
    pub message: String,
    pub recaptcha_token: Option<String>,
}

impl From<ContactBody> for ContactSubmission {
    fn from(body: ContactBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            message: body.message,
            recaptcha_token: body.recaptcha_token,
        }
    }
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactBody>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Unreadable contact payload: {}", rejection);
        ApiError::BadRequest(MSG_FIELDS_REQUIRED.to_string())
    })?;

    state
        .contact
        .submit(body.into())
        .await
        .map_err(|e| ApiError::from_domain(e, MSG_CONTACT_FAILED))?;

    Ok(Json(MessageResponse::new(MSG_CONTACT_SENT)))
}
