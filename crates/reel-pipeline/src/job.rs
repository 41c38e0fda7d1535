//! Per-job identifiers, staged inputs and artifact paths.

use std::fmt;
use std::path::PathBuf;

use reel_models::MediaKind;
use uuid::Uuid;

use crate::config::PipelineConfig;

/// Unique identifier for one pipeline run. All artifact paths are
/// namespaced by it, so concurrent jobs never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The user-supplied media part, staged to a readable path before the
/// pipeline starts. Owned exclusively by one run.
#[derive(Debug, Clone)]
pub struct StagedMedia {
    pub path: PathBuf,
    pub kind: MediaKind,
}

/// The user-supplied audio part, staged alongside the media.
#[derive(Debug, Clone)]
pub struct StagedAudio {
    pub path: PathBuf,
}

/// All filesystem paths owned by one pipeline run. Each path is
/// write-once; no stage overwrites another stage's output.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub id: JobId,
    /// Normalized silent video (intermediate)
    pub temp_video: PathBuf,
    /// Trimmed audio (intermediate)
    pub temp_audio: PathBuf,
    /// Muxed output (durable on success)
    pub final_video: PathBuf,
    /// Extracted thumbnail (durable on success)
    pub thumbnail: PathBuf,
}

impl RenderJob {
    /// Lay out the job's paths under the configured directories.
    pub fn new(config: &PipelineConfig, id: JobId) -> Self {
        let temp_video = config.temp_dir.join(format!("{id}-video.mp4"));
        let temp_audio = config.temp_dir.join(format!("{id}-audio.m4a"));
        let final_video = config.output_dir.join(format!("{id}-reel.mp4"));
        let thumbnail = config.output_dir.join(format!("{id}-thumb.jpg"));
        Self {
            id,
            temp_video,
            temp_audio,
            final_video,
            thumbnail,
        }
    }

    /// Public URL for the final video under the configured base.
    pub fn media_url(&self, public_base: &str) -> String {
        format!("{}/{}-reel.mp4", public_base.trim_end_matches('/'), self.id)
    }

    /// Public URL for the thumbnail under the configured base.
    pub fn thumbnail_url(&self, public_base: &str) -> String {
        format!("{}/{}-thumb.jpg", public_base.trim_end_matches('/'), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_namespaced_by_job_id() {
        let config = PipelineConfig::default();
        let a = RenderJob::new(&config, JobId::from("job-a"));
        let b = RenderJob::new(&config, JobId::from("job-b"));

        assert_ne!(a.temp_video, b.temp_video);
        assert_ne!(a.temp_audio, b.temp_audio);
        assert_ne!(a.final_video, b.final_video);
        assert_ne!(a.thumbnail, b.thumbnail);
        assert!(a.temp_video.to_string_lossy().contains("job-a"));
    }

    #[test]
    fn test_public_urls() {
        let config = PipelineConfig::default();
        let job = RenderJob::new(&config, JobId::from("j1"));
        assert_eq!(job.media_url("/uploads/final"), "/uploads/final/j1-reel.mp4");
        assert_eq!(
            job.thumbnail_url("/uploads/final/"),
            "/uploads/final/j1-thumb.jpg"
        );
    }
}
