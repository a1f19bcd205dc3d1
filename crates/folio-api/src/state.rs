use std::sync::Arc;

use folio_core::{ContactService, ResumeDeliveryService};

#[derive(Clone)]
pub struct AppState {
    pub resume: Arc<ResumeDeliveryService>,
    pub contact: Arc<ContactService>,
}
