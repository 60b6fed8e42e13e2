//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the template CRUD surface and the health check under a single Axum
//! router. Every `/templates` route goes through the `AdminUser` extractor;
//! `/healthz` is open so load balancers can check it without a token.

pub mod auth;
pub mod error;
pub mod templates;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router. `max_body_bytes` caps request bodies; scenes
/// carry their images inline, so it has to fit the largest expected photo.
pub fn app(state: AppState, cors_allow_any: bool, max_body_bytes: usize) -> Router {
    let router = Router::new()
        .route("/templates", get(templates::list_templates).post(templates::save_template))
        .route(
            "/templates/{id}",
            get(templates::get_template).delete(templates::delete_template),
        )
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let router = if cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    };

    router.with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
