//! Domain errors

use folio_security::TokenError;
use thiserror::Error;

use crate::captcha::CaptchaError;
use crate::mail::MailError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Covers malformed, tampered, expired and replayed links alike.
    #[error("Invalid download link: {0}")]
    InvalidLink(TokenError),

    #[error("Captcha rejected")]
    CaptchaRejected,

    #[error("Captcha verification unavailable: {0}")]
    CaptchaUnavailable(#[from] CaptchaError),

    #[error("Mail delivery failed: {0}")]
    MailDelivery(#[from] MailError),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Resume artifact unavailable: {0}")]
    ArtifactUnavailable(String),
}
