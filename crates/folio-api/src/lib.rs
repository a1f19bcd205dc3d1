//! # Folio API
//!
//! HTTP handlers, error mapping and router for the resume link and contact
//! endpoints.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
