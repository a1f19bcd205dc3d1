//! # Folio Infrastructure
//!
//! Adapters for the core collaborator traits: SMTP mail and reCAPTCHA.

pub mod captcha;
pub mod mail;

pub use captcha::RecaptchaVerifier;
pub use mail::SmtpMailTransport;
