use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use folio_shared::config::CorsSettings;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::handlers::{contact, health, resume};
use crate::state::AppState;

pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/request-resume", post(resume::request_resume))
        .route("/api/download-resume/{token}", get(resume::download_resume))
        .route("/api/contact", post(contact::submit_contact))
        .with_state(state)
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

fn cors_layer(cors: &CorsSettings) -> CorsLayer {
    let Some(origin) = cors.allowed_origin.as_deref() else {
        return CorsLayer::permissive();
    };

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
        Err(e) => {
            warn!("Ignoring unusable CORS origin {:?}: {}", origin, e);
            CorsLayer::permissive()
        }
    }
}
