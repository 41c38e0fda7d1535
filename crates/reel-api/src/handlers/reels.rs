//! Reel creation and listing.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use reel_models::{Reel, REELS_PAGE_SIZE};
use reel_pipeline::RenderRequest;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use crate::upload;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct ReelListResponse {
    pub reels: Vec<Reel>,
    pub total_pages: u32,
    pub current_page: u32,
}

/// `POST /api/reel/create`
///
/// Stages the uploaded media and song, runs the full render pipeline
/// and returns the persisted reel. Nothing survives on failure.
pub async fn create_reel(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Reel>)> {
    let upload = upload::stage_reel_upload(&mut multipart, &state.config.staging_dir).await?;

    tracing::info!(
        user_id = %user.id,
        kind = %upload.media.kind,
        "reel creation requested"
    );

    let reel = state
        .pipeline
        .render(RenderRequest {
            owner_id: user.id,
            caption: upload.caption,
            media: upload.media,
            audio: upload.audio,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(reel)))
}

/// `GET /api/reel/?page=N`
pub async fn list_reels(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ReelListResponse>> {
    let page = state.store.list_reels(query.page, REELS_PAGE_SIZE)?;
    Ok(Json(ReelListResponse {
        reels: page.items,
        total_pages: page.total_pages,
        current_page: page.current_page,
    }))
}
