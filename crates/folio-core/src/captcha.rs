//! Captcha verification collaborator

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptchaError {
    #[error("Captcha verifier unreachable: {0}")]
    NetworkError(String),

    #[error("Unexpected captcha verifier response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(false)` means the verifier answered and refused the proof.
    async fn verify(&self, proof: &str) -> Result<bool, CaptchaError>;
}
