// ============================================================================
// Folio Core - Resume Delivery Service
// File: crates/folio-core/src/services/resume_delivery.rs
// ============================================================================
//! Emailed, time-boxed resume download links
//!
//! `request_link` mints a token for the address and mails a link to the
//! frontend download page; `redeem` checks the token and hands back the
//! resume file. Every valid token gets the same file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use folio_security::{LinkTokenService, RedemptionLedger, TokenError};
use folio_shared::{constants::MSG_EMAIL_REQUIRED, utils::{join_url, mask_email}, AppConfig};
use tokio::fs::File;
use tracing::{error, info, warn};

use crate::error::DomainError;
use crate::mail::{send_with_timeout, MailTransport, OutboundMail};
use crate::templates::MailTemplates;

#[derive(Debug, Clone)]
pub struct ResumeDeliveryConfig {
    pub link_base_url: String,
    pub link_path: String,
    pub sender: String,
    pub owner_name: String,
    pub artifact_path: PathBuf,
    pub artifact_filename: String,
    pub mail_timeout: Duration,
    pub single_use: bool,
}

impl From<&AppConfig> for ResumeDeliveryConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            link_base_url: config.links.base_url.clone(),
            link_path: config.links.path.clone(),
            sender: config.mail.sender_address().to_string(),
            owner_name: config.mail.owner_name.clone(),
            artifact_path: PathBuf::from(&config.resume.path),
            artifact_filename: config.resume.filename.clone(),
            mail_timeout: Duration::from_secs(config.mail.timeout_seconds),
            single_use: config.token.single_use,
        }
    }
}

/// An opened resume ready to be streamed.
#[derive(Debug)]
pub struct ResumeDownload {
    pub file: File,
    pub filename: String,
    pub content_type: String,
    pub length: Option<u64>,
}

pub struct ResumeDeliveryService {
    tokens: Arc<LinkTokenService>,
    mailer: Arc<dyn MailTransport>,
    templates: Arc<MailTemplates>,
    ledger: Option<RedemptionLedger>,
    config: ResumeDeliveryConfig,
}

impl ResumeDeliveryService {
    pub fn new(
        tokens: Arc<LinkTokenService>,
        mailer: Arc<dyn MailTransport>,
        templates: Arc<MailTemplates>,
        config: ResumeDeliveryConfig,
    ) -> Self {
        let ledger = config.single_use.then(RedemptionLedger::new);
        Self {
            tokens,
            mailer,
            templates,
            ledger,
            config,
        }
    }

    /// Mint a link for `email` and mail it. One token and one mail per call.
    pub async fn request_link(&self, email: &str) -> Result<(), DomainError> {
        let email = email.trim();
        if email.is_empty() {
            warn!("Resume link requested without an email address");
            return Err(DomainError::ValidationError(MSG_EMAIL_REQUIRED.to_string()));
        }

        let issued = self
            .tokens
            .mint(email)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        let link = join_url(&self.config.link_base_url, &self.config.link_path, &issued.value);
        let html = self
            .templates
            .resume_link(&link, self.tokens.ttl().num_hours(), &self.config.owner_name)?;

        let mail = OutboundMail {
            from: self.config.sender.clone(),
            to: email.to_string(),
            subject: format!("Resume Download Link - {}", self.config.owner_name),
            html,
        };

        if let Err(e) = send_with_timeout(self.mailer.as_ref(), mail, self.config.mail_timeout).await {
            error!("Failed to send resume link to {}: {}", mask_email(email), e);
            return Err(DomainError::MailDelivery(e));
        }

        info!(
            "Resume link {} sent to {} (expires {})",
            issued.id,
            mask_email(email),
            issued.expires_at.to_rfc3339()
        );
        Ok(())
    }

    /// Whether the resume file can currently be opened.
    pub async fn artifact_ready(&self) -> bool {
        match File::open(&self.config.artifact_path).await {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    "Resume artifact {} is not readable: {}",
                    self.config.artifact_path.display(),
                    e
                );
                false
            }
        }
    }

    /// Verify `token` and open the resume file. In single-use mode the link
    /// is only spent once the file has opened.
    pub async fn redeem(&self, token: &str) -> Result<ResumeDownload, DomainError> {
        let link = self.tokens.verify(token).map_err(|cause| {
            warn!("Rejected download link: {}", cause);
            DomainError::InvalidLink(cause)
        })?;

        let path = &self.config.artifact_path;
        let file = File::open(path).await.map_err(|e| {
            error!("Resume artifact {} cannot be opened: {}", path.display(), e);
            DomainError::ArtifactUnavailable(e.to_string())
        })?;
        let length = file.metadata().await.ok().map(|meta| meta.len());

        if let Some(ledger) = &self.ledger {
            if !ledger.claim(link.id, link.expires_at, self.tokens.now()) {
                warn!("Download link {} was already redeemed", link.id);
                return Err(DomainError::InvalidLink(TokenError::Replayed));
            }
        }

        info!("Resume download via link {} for {}", link.id, mask_email(&link.subject));

        Ok(ResumeDownload {
            file,
            filename: self.config.artifact_filename.clone(),
            content_type: mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            length,
        })
    }
}
