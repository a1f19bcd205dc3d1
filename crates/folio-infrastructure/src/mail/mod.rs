//! Mail transport adapters

pub mod smtp;

pub use smtp::SmtpMailTransport;
