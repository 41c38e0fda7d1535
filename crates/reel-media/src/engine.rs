//! The `RenderEngine` seam between the pipeline and the transcoding
//! binaries. Production uses [`FfmpegEngine`]; tests substitute stubs
//! to inject stage failures without ffmpeg installed.

use std::path::Path;

use async_trait::async_trait;

use crate::error::MediaResult;
use crate::{audio, mux, normalize, probe, thumbnail};

/// The atomic units of work the pipeline sequences. Every method maps
/// to exactly one subprocess invocation.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Report the playable duration of a video file in seconds.
    async fn probe_duration(&self, media: &Path) -> MediaResult<f64>;

    /// Image strategy: loop a still frame into a silent video.
    async fn normalize_image(&self, image: &Path, out: &Path, target_secs: u32)
        -> MediaResult<()>;

    /// Video strategy: trim, strip audio and re-encode.
    async fn normalize_video(&self, video: &Path, out: &Path, target_secs: u32)
        -> MediaResult<()>;

    /// Cut the audio track to the target duration.
    async fn trim_audio(&self, audio: &Path, out: &Path, target_secs: u32) -> MediaResult<()>;

    /// Combine normalized video and trimmed audio into one container.
    async fn mux(&self, video: &Path, audio: &Path, out: &Path) -> MediaResult<()>;

    /// Capture a single scaled frame from the muxed container.
    async fn extract_thumbnail(&self, video: &Path, out: &Path, offset_secs: f64)
        -> MediaResult<()>;
}

/// Engine backed by the ffmpeg and ffprobe binaries on PATH.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    stage_timeout_secs: Option<u64>,
}

impl FfmpegEngine {
    /// Create an engine with a hard per-stage timeout.
    pub fn new(stage_timeout_secs: u64) -> Self {
        Self {
            stage_timeout_secs: Some(stage_timeout_secs),
        }
    }

    /// Create an engine without a timeout.
    pub fn without_timeout() -> Self {
        Self {
            stage_timeout_secs: None,
        }
    }
}

#[async_trait]
impl RenderEngine for FfmpegEngine {
    async fn probe_duration(&self, media: &Path) -> MediaResult<f64> {
        probe::probe_duration(media, self.stage_timeout_secs).await
    }

    async fn normalize_image(
        &self,
        image: &Path,
        out: &Path,
        target_secs: u32,
    ) -> MediaResult<()> {
        normalize::normalize_image(image, out, target_secs, self.stage_timeout_secs).await
    }

    async fn normalize_video(
        &self,
        video: &Path,
        out: &Path,
        target_secs: u32,
    ) -> MediaResult<()> {
        normalize::normalize_video(video, out, target_secs, self.stage_timeout_secs).await
    }

    async fn trim_audio(&self, audio: &Path, out: &Path, target_secs: u32) -> MediaResult<()> {
        audio::trim_audio(audio, out, target_secs, self.stage_timeout_secs).await
    }

    async fn mux(&self, video: &Path, audio: &Path, out: &Path) -> MediaResult<()> {
        mux::mux(video, audio, out, self.stage_timeout_secs).await
    }

    async fn extract_thumbnail(
        &self,
        video: &Path,
        out: &Path,
        offset_secs: f64,
    ) -> MediaResult<()> {
        thumbnail::extract_thumbnail(video, out, offset_secs, self.stage_timeout_secs).await
    }
}
