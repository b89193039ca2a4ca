//! Axum router wiring.
//!
//! Every route, the static-file fallback and the 404 fallback sit behind the
//! request metrics middleware.

use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{api, app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(api::index))
        .route("/api/health", get(api::health))
        .route("/api/users", get(api::list_users).post(api::create_user))
        .route("/api/slowAPI", get(api::slow_api))
        .route("/metrics", get(ops::metrics))
        .route("/api/metrics", get(ops::metrics));

    let router = match &state.cfg().server.static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(ops::not_found.into_service()),
        ),
        None => router.fallback(ops::not_found),
    };

    router
        .layer(middleware::from_fn_with_state(state.clone(), obs::middleware::track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
