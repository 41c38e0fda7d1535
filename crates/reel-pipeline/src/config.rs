//! Pipeline configuration.
//!
//! Directories, the duration ceiling and the thumbnail offset are
//! injected values, not process-wide constants, so tests can redirect
//! storage freely.

use std::path::PathBuf;

use reel_models::encoding::{DEFAULT_CEILING_SECS, THUMBNAIL_OFFSET_SECS};

/// Configuration for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory for intermediate artifacts (temp video/audio)
    pub temp_dir: PathBuf,
    /// Directory for durable artifacts (final reel, thumbnail)
    pub output_dir: PathBuf,
    /// Maximum reel duration in seconds
    pub ceiling_secs: u32,
    /// Frame capture offset for thumbnails
    pub thumbnail_offset_secs: f64,
    /// Hard timeout per subprocess stage; `None` disables it
    pub stage_timeout_secs: Option<u64>,
    /// Public URL prefix under which `output_dir` is served
    pub public_base: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("uploads/temp"),
            output_dir: PathBuf::from("uploads/final"),
            ceiling_secs: DEFAULT_CEILING_SECS,
            thumbnail_offset_secs: THUMBNAIL_OFFSET_SECS,
            stage_timeout_secs: Some(300),
            public_base: "/uploads/final".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create both artifact directories if they do not exist.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.temp_dir).await?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        Ok(())
    }
}
