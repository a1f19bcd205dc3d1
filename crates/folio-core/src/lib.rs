//! # Folio Core
//!
//! Resume link delivery and contact relay workflows, plus the collaborator
//! traits (mail transport, captcha verifier) they are built against.

pub mod captcha;
pub mod error;
pub mod mail;
pub mod services;
pub mod templates;

pub use captcha::{CaptchaError, CaptchaVerifier};
pub use error::DomainError;
pub use mail::{MailError, MailTransport, OutboundMail};
pub use services::{
    ContactConfig, ContactService, ContactSubmission, ResumeDeliveryConfig,
    ResumeDeliveryService, ResumeDownload,
};
pub use templates::MailTemplates;
