//! HTTP surface of the `clima` service.
//!
//! Exposes the axum router so the binary and the integration tests build the
//! exact same application.

use std::sync::Arc;

use axum::{Router, routing::get};
use clima_core::{LocationResolver, Providers, WeatherFetcher};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handler;
pub mod telemetry;

pub use error::ApiError;

/// Shared, read-only per-process state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub location: Arc<dyn LocationResolver>,
    pub weather: Arc<dyn WeatherFetcher>,
}

impl From<Providers> for AppState {
    fn from(providers: Providers) -> Self {
        Self { location: providers.location, weather: providers.weather }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/clima", get(handler::clima))
        .route("/health", get(handler::health))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        }))
        .with_state(state)
}
