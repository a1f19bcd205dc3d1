pub mod contact;
pub mod resume_delivery;

pub use contact::{ContactConfig, ContactService, ContactSubmission};
pub use resume_delivery::{ResumeDeliveryConfig, ResumeDeliveryService, ResumeDownload};
