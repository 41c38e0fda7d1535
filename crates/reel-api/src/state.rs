//! Shared application state.

use std::sync::Arc;

use reel_media::FfmpegEngine;
use reel_pipeline::{ReelPipeline, ReelRepository};
use reel_store::ReelStore;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub store: Arc<ReelStore>,
    pub pipeline: Arc<ReelPipeline>,
}

impl AppState {
    /// Open the database, run migrations, and wire up the render pipeline.
    pub async fn new(config: ApiConfig) -> ApiResult<Self> {
        let pipeline_config = config.pipeline_config();
        pipeline_config
            .ensure_dirs()
            .await
            .map_err(|e| ApiError::Internal(format!("failed to create upload dirs: {e}")))?;
        tokio::fs::create_dir_all(&config.staging_dir)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to create staging dir: {e}")))?;

        let store = Arc::new(ReelStore::open(&config.database_path)?);

        let engine = Arc::new(FfmpegEngine::new(config.stage_timeout_secs));
        let repo: Arc<dyn ReelRepository> = store.clone();
        let pipeline = Arc::new(ReelPipeline::new(pipeline_config, engine, repo));

        Ok(Self {
            config: Arc::new(config),
            store,
            pipeline,
        })
    }
}
