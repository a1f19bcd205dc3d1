// ============================================================================
// Folio Core - Contact Service
// File: crates/folio-core/src/services/contact.rs
// ============================================================================
//! Contact form relay: captcha check, owner notification, visitor confirmation

use std::sync::Arc;
use std::time::Duration;

use folio_shared::{
    constants::MSG_FIELDS_REQUIRED,
    utils::mask_email,
    AppConfig,
};
use tracing::{error, info, warn};

use crate::captcha::CaptchaVerifier;
use crate::error::DomainError;
use crate::mail::{send_with_timeout, MailTransport, OutboundMail};
use crate::templates::MailTemplates;

#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub sender: String,
    pub owner_address: String,
    pub owner_name: String,
    pub mail_timeout: Duration,
}

impl From<&AppConfig> for ContactConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            sender: config.mail.sender_address().to_string(),
            owner_address: config.mail.owner_address().to_string(),
            owner_name: config.mail.owner_name.clone(),
            mail_timeout: Duration::from_secs(config.mail.timeout_seconds),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub recaptcha_token: Option<String>,
}

pub struct ContactService {
    captcha: Arc<dyn CaptchaVerifier>,
    mailer: Arc<dyn MailTransport>,
    templates: Arc<MailTemplates>,
    config: ContactConfig,
}

impl ContactService {
    pub fn new(
        captcha: Arc<dyn CaptchaVerifier>,
        mailer: Arc<dyn MailTransport>,
        templates: Arc<MailTemplates>,
        config: ContactConfig,
    ) -> Self {
        Self {
            captcha,
            mailer,
            templates,
            config,
        }
    }

    pub async fn submit(&self, submission: ContactSubmission) -> Result<(), DomainError> {
        let name = submission.name.trim();
        let email = submission.email.trim();
        let message = submission.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            warn!("Contact submission with missing fields");
            return Err(DomainError::ValidationError(MSG_FIELDS_REQUIRED.to_string()));
        }

        let proof = submission
            .recaptcha_token
            .as_deref()
            .map(str::trim)
            .filter(|proof| !proof.is_empty())
            .ok_or_else(|| {
                warn!("Contact submission without a captcha token");
                DomainError::CaptchaRejected
            })?;

        match self.captcha.verify(proof).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Captcha refused for contact from {}", mask_email(email));
                return Err(DomainError::CaptchaRejected);
            }
            Err(e) => {
                error!("Captcha verification failed: {}", e);
                return Err(DomainError::CaptchaUnavailable(e));
            }
        }

        let notification = OutboundMail {
            from: self.config.sender.clone(),
            to: self.config.owner_address.clone(),
            subject: format!("Portfolio Contact Form: {}", name),
            html: self.templates.contact_notification(name, email, message)?,
        };
        self.deliver(notification).await?;

        let confirmation = OutboundMail {
            from: self.config.sender.clone(),
            to: email.to_string(),
            subject: format!("Thank you for contacting me - {}", self.config.owner_name),
            html: self.templates.contact_confirmation(&self.config.owner_name)?,
        };
        self.deliver(confirmation).await?;

        info!("Contact message from {} relayed", mask_email(email));
        Ok(())
    }

    async fn deliver(&self, mail: OutboundMail) -> Result<(), DomainError> {
        let recipient = mask_email(&mail.to);
        send_with_timeout(self.mailer.as_ref(), mail, self.config.mail_timeout)
            .await
            .map_err(|e| {
                error!("Failed to send contact mail to {}: {}", recipient, e);
                DomainError::MailDelivery(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captcha::{CaptchaError, MockCaptchaVerifier};
    use crate::mail::{MailError, MockMailTransport};
    use std::sync::Mutex;

    fn config() -> ContactConfig {
        ContactConfig {
            sender: "relay@example.com".to_string(),
            owner_address: "owner@example.com".to_string(),
            owner_name: "Seife Bekele".to_string(),
            mail_timeout: Duration::from_millis(200),
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello <there>".to_string(),
            recaptcha_token: Some("proof-123".to_string()),
        }
    }

    fn service(captcha: MockCaptchaVerifier, mailer: MockMailTransport) -> ContactService {
        ContactService::new(
            Arc::new(captcha),
            Arc::new(mailer),
            Arc::new(MailTemplates::new().unwrap()),
            config(),
        )
    }

    #[tokio::test]
    async fn missing_fields_skip_captcha_and_mail() {
        let mut captcha = MockCaptchaVerifier::new();
        captcha.expect_verify().never();
        let mut mailer = MockMailTransport::new();
        mailer.expect_send().never();
        let service = service(captcha, mailer);

        let mut blank_message = submission();
        blank_message.message = "  ".to_string();
        let err = service.submit(blank_message).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(ref msg) if msg == "All fields are required"));

        let err = service.submit(ContactSubmission::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn missing_captcha_token_is_rejected() {
        let mut captcha = MockCaptchaVerifier::new();
        captcha.expect_verify().never();
        let mut mailer = MockMailTransport::new();
        mailer.expect_send().never();
        let service = service(captcha, mailer);

        let mut no_token = submission();
        no_token.recaptcha_token = None;
        let err = service.submit(no_token).await.unwrap_err();
        assert!(matches!(err, DomainError::CaptchaRejected));
    }

    #[tokio::test]
    async fn refused_captcha_sends_nothing() {
        let mut captcha = MockCaptchaVerifier::new();
        captcha
            .expect_verify()
            .withf(|proof| proof.to_string() == "proof-123")
            .times(1)
            .returning(|_| Ok(false));
        let mut mailer = MockMailTransport::new();
        mailer.expect_send().never();

        let err = service(captcha, mailer).submit(submission()).await.unwrap_err();
        assert!(matches!(err, DomainError::CaptchaRejected));
    }

    #[tokio::test]
    async fn unreachable_verifier_is_an_upstream_error() {
        let mut captcha = MockCaptchaVerifier::new();
        captcha
            .expect_verify()
            .times(1)
            .returning(|_| Err(CaptchaError::NetworkError("dns failure".into())));
        let mut mailer = MockMailTransport::new();
        mailer.expect_send().never();

        let err = service(captcha, mailer).submit(submission()).await.unwrap_err();
        assert!(matches!(err, DomainError::CaptchaUnavailable(_)));
    }

    #[tokio::test]
    async fn accepted_submission_notifies_owner_then_confirms() {
        let mut captcha = MockCaptchaVerifier::new();
        captcha.expect_verify().times(1).returning(|_| Ok(true));

        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink = sent.clone();
        let mut mailer = MockMailTransport::new();
        mailer.expect_send().times(2).returning(move |mail| {
            sink.lock().unwrap().push(mail);
            Ok(())
        });

        service(captcha, mailer).submit(submission()).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].subject, "Portfolio Contact Form: Ada");
        assert!(sent[0].html.contains("Hello &lt;there&gt;"));
        assert_eq!(sent[1].to, "ada@example.com");
        assert_eq!(sent[1].subject, "Thank you for contacting me - Seife Bekele");
        assert!(sent.iter().all(|mail| mail.from == "relay@example.com"));
    }

    #[tokio::test]
    async fn failed_notification_stops_before_confirmation() {
        let mut captcha = MockCaptchaVerifier::new();
        captcha.expect_verify().times(1).returning(|_| Ok(true));
        let mut mailer = MockMailTransport::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailError::TransportError("auth failed".into())));

        let err = service(captcha, mailer).submit(submission()).await.unwrap_err();
        assert!(matches!(err, DomainError::MailDelivery(_)));
    }
}
