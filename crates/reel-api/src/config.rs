//! API configuration.

use std::path::PathBuf;

use reel_models::encoding::{DEFAULT_CEILING_SECS, THUMBNAIL_OFFSET_SECS};
use reel_pipeline::PipelineConfig;

/// API server configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// SQLite database path
    pub database_path: String,
    /// Directory multipart uploads are staged to
    pub staging_dir: PathBuf,
    /// Directory for intermediate pipeline artifacts
    pub temp_dir: PathBuf,
    /// Directory for finished reels and thumbnails
    pub output_dir: PathBuf,
    /// Public URL prefix under which `output_dir` is served
    pub public_base: String,
    /// Maximum reel duration in seconds
    pub ceiling_secs: u32,
    /// Thumbnail frame offset in seconds
    pub thumbnail_offset_secs: f64,
    /// Hard timeout per transcoding stage
    pub stage_timeout_secs: u64,
    /// Max request body size (covers both uploaded files)
    pub max_upload_bytes: usize,
    /// HMAC secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            database_path: "reels.db".to_string(),
            staging_dir: PathBuf::from("uploads/staging"),
            temp_dir: PathBuf::from("uploads/temp"),
            output_dir: PathBuf::from("uploads/final"),
            public_base: "/uploads/final".to_string(),
            ceiling_secs: DEFAULT_CEILING_SECS,
            thumbnail_offset_secs: THUMBNAIL_OFFSET_SECS,
            stage_timeout_secs: 300,
            max_upload_bytes: 50 * 1024 * 1024, // 50MB, matches the upload filter
            jwt_secret: "dev-secret-change-me".to_string(),
            token_ttl_hours: 24,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("API_HOST", defaults.host),
            port: env_parsed("API_PORT", defaults.port),
            database_path: env_or("DATABASE_PATH", defaults.database_path),
            staging_dir: PathBuf::from(env_or(
                "STAGING_DIR",
                defaults.staging_dir.to_string_lossy().to_string(),
            )),
            temp_dir: PathBuf::from(env_or(
                "TEMP_DIR",
                defaults.temp_dir.to_string_lossy().to_string(),
            )),
            output_dir: PathBuf::from(env_or(
                "OUTPUT_DIR",
                defaults.output_dir.to_string_lossy().to_string(),
            )),
            public_base: env_or("PUBLIC_BASE", defaults.public_base),
            ceiling_secs: env_parsed("REEL_CEILING_SECS", defaults.ceiling_secs),
            thumbnail_offset_secs: env_parsed(
                "THUMBNAIL_OFFSET_SECS",
                defaults.thumbnail_offset_secs,
            ),
            stage_timeout_secs: env_parsed("STAGE_TIMEOUT_SECS", defaults.stage_timeout_secs),
            max_upload_bytes: env_parsed("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            jwt_secret: env_or("JWT_SECRET", defaults.jwt_secret),
            token_ttl_hours: env_parsed("TOKEN_TTL_HOURS", defaults.token_ttl_hours),
        }
    }

    /// Pipeline configuration derived from this server config.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            temp_dir: self.temp_dir.clone(),
            output_dir: self.output_dir.clone(),
            ceiling_secs: self.ceiling_secs,
            thumbnail_offset_secs: self.thumbnail_offset_secs,
            stage_timeout_secs: Some(self.stage_timeout_secs),
            public_base: self.public_base.clone(),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
