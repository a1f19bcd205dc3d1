pub mod contact;
pub mod health;
pub mod resume;

use serde::Serialize;

/// Success body shared by the mail-sending endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
