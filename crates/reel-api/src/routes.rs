//! Router assembly.

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/", get(handlers::auth::list_users));

    let reel_routes = Router::new()
        .route("/create", post(handlers::reels::create_reel))
        .route("/", get(handlers::reels::list_reels));

    let serve_final = ServeDir::new(&state.config.output_dir);

    Router::new()
        .route("/health", get(handlers::health::health))
        // `nest` maps an inner "/" route to the bare prefix only, so the
        // documented trailing-slash paths must be registered explicitly.
        .route("/api/auth/", get(handlers::auth::list_users))
        .route("/api/reel/", get(handlers::reels::list_reels))
        .nest("/api/auth", auth_routes)
        .nest("/api/reel", reel_routes)
        .nest_service("/uploads/final", serve_final)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
