//! Google reCAPTCHA siteverify client

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{CaptchaError, CaptchaVerifier};
use folio_shared::config::CaptchaSettings;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: Client,
    secret: String,
    verify_url: Url,
}

impl RecaptchaVerifier {
    pub fn new(settings: &CaptchaSettings) -> Result<Self, CaptchaError> {
        let verify_url = Url::parse(&settings.verify_url).map_err(|e| {
            CaptchaError::NetworkError(format!("invalid verify url '{}': {}", settings.verify_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| CaptchaError::NetworkError(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            secret: settings.secret_key.clone(),
            verify_url,
        })
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, proof: &str) -> Result<bool, CaptchaError> {
        let mut url = self.verify_url.clone();
        url.query_pairs_mut()
            .append_pair("secret", &self.secret)
            .append_pair("response", proof);

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| CaptchaError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CaptchaError::NetworkError(format!(
                "siteverify answered {}",
                response.status()
            )));
        }

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| CaptchaError::InvalidResponse(e.to_string()))?;

        if body.success {
            debug!("reCAPTCHA proof accepted");
        } else {
            warn!("reCAPTCHA verification failed: {:?}", body.error_codes);
        }
        Ok(body.success)
    }
}
