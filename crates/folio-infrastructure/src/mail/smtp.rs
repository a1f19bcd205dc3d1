//! SMTP transport backed by lettre

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{MailError, MailTransport, OutboundMail};
use folio_shared::config::MailSettings;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

/// Port on which the relay speaks TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(settings: &MailSettings) -> Result<Self, MailError> {
        let builder = if settings.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
        }
        .map_err(|e| MailError::TransportError(e.to_string()))?;

        let mailer = builder
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(settings.timeout_seconds)))
            .build();

        Ok(Self { mailer })
    }

    /// Open a session with the relay and authenticate, without sending.
    pub async fn verify_connection(&self) -> Result<bool, MailError> {
        self.mailer
            .test_connection()
            .await
            .map_err(|e| MailError::TransportError(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: OutboundMail) -> Result<(), MailError> {
        let message = build_message(&mail)?;
        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| MailError::TransportError(e.to_string()))?;
        debug!("SMTP relay accepted message: {:?}", response.code());
        Ok(())
    }
}

pub fn build_message(mail: &OutboundMail) -> Result<Message, MailError> {
    Message::builder()
        .from(parse_mailbox(&mail.from)?)
        .to(parse_mailbox(&mail.to)?)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(mail.html.clone())
        .map_err(|e| MailError::BuildError(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}
