//! Outbound mail collaborator

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Message build failed: {0}")]
    BuildError(String),

    #[error("Transport failure: {0}")]
    TransportError(String),

    #[error("Mail transport timed out after {0:?}")]
    Timeout(Duration),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutboundMail) -> Result<(), MailError>;
}

/// Single send attempt bounded by `limit`; running out of time is a `Timeout`.
pub async fn send_with_timeout(
    transport: &dyn MailTransport,
    mail: OutboundMail,
    limit: Duration,
) -> Result<(), MailError> {
    match tokio::time::timeout(limit, transport.send(mail)).await {
        Ok(result) => result,
        Err(_) => Err(MailError::Timeout(limit)),
    }
}
