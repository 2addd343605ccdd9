//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring (in-memory or Postgres capability handles)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: response JSON mapping helpers
//! - `errors.rs`: consistent error responses

use axum::{
    Extension, Router,
    http::{HeaderName, header},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> Result<Router, sqlx::Error> {
    let services = services::build_services(&config.store).await?;
    Ok(build_app_with(services))
}

/// Build the router around explicit service handles (tests inject fakes here).
pub fn build_app_with(services: AppServices) -> Router {
    // Browser clients call these endpoints cross-origin; the header list
    // mirrors what the web client sends.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/stock", routes::stock::router())
        .layer(Extension(services))
        .layer(cors)
}
