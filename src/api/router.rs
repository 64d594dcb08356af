use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::pool;
use super::state::AppState;

/// Create the full router with application state.
///
/// Pool routes live under the state's base path; health probes stay at the root.
pub fn create_router(state: AppState) -> Router {
    let base_path = state.base_path().to_string();
    let pool_router = pool::create_pool_router();

    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check));

    let router = if base_path.is_empty() {
        router.merge(pool_router)
    } else {
        router.nest(&base_path, pool_router)
    };

    router
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
