//! Axum router configuration with middleware.
//!
//! Routes: the two generation endpoints under `/api/` and `/health`.
//! Middleware: CORS (when `cors_permissive` is set) and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors_permissive = state.config.server.cors_permissive;

    let mut router = Router::new()
        .route(
            "/api/generate-persona",
            post(handlers::persona::generate_persona).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/generate-structured-prompt",
            post(handlers::prompt::generate_structured_prompt)
                .fallback(handlers::method_not_allowed),
        )
        .route("/health", get(health_check))
        .with_state(state);

    if cors_permissive {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http())
}

/// GET /health
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
