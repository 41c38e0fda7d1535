//! HTTP API for the reel backend.
//!
//! Serves reel creation and listing plus a minimal auth surface.
//! Finished reels are served as static files under `/uploads/final`.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod upload;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
