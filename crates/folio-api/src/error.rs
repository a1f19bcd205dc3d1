//! HTTP error mapping
//!
//! Every failure leaves the service as `{ "message": ... }`. Internal detail
//! is logged here and never echoed to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::DomainError;
use folio_shared::constants::{MSG_CAPTCHA_FAILED, MSG_INVALID_LINK};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl ApiError {
    /// Map a workflow failure. Upstream and server-side failures all answer
    /// with `failure_message`.
    pub fn from_domain(err: DomainError, failure_message: &str) -> Self {
        match err {
            DomainError::ValidationError(msg) => ApiError::BadRequest(msg),
            DomainError::CaptchaRejected => ApiError::BadRequest(MSG_CAPTCHA_FAILED.to_string()),
            DomainError::InvalidLink(cause) => {
                tracing::debug!("Download link rejected: {:?}", cause);
                ApiError::Unauthorized(MSG_INVALID_LINK.to_string())
            }
            other => {
                tracing::error!("Request failed: {}", other);
                ApiError::InternalError(failure_message.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MailError;
    use folio_security::TokenError;

    #[test]
    fn every_link_failure_reads_the_same() {
        for cause in [
            TokenError::Malformed,
            TokenError::BadSignature,
            TokenError::Expired,
            TokenError::Replayed,
        ] {
            match ApiError::from_domain(DomainError::InvalidLink(cause), "unused") {
                ApiError::Unauthorized(msg) => assert_eq!(msg, "Invalid or expired download link"),
                other => panic!("unexpected mapping: {:?}", other),
            }
        }
    }

    #[test]
    fn upstream_failures_hide_their_detail() {
        let err = DomainError::MailDelivery(MailError::TransportError("535 auth rejected".into()));
        match ApiError::from_domain(err, "Failed to send download link") {
            ApiError::InternalError(msg) => assert_eq!(msg, "Failed to send download link"),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn statuses() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InternalError("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
