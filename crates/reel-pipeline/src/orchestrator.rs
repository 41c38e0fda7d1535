//! The pipeline orchestrator.
//!
//! Sequences the five stage operations strictly in order for one job:
//! probe (video inputs only), normalize, audio trim, mux, thumbnail,
//! then persist. A failure at any stage aborts the remaining stages
//! and sweeps every artifact created for the job; persistence failures
//! are handled the same way, so a stored record exists if and only if
//! the final video and thumbnail remain on disk.

use std::sync::Arc;

use tracing::{error, info};

use reel_media::{MediaError, RenderEngine};
use reel_models::{MediaKind, NewReel, Reel};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult, RenderStage};
use crate::job::{JobId, RenderJob, StagedAudio, StagedMedia};
use crate::manifest::ArtifactManifest;
use crate::repo::ReelRepository;

/// One create request's inputs, staged and owned by a single run.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub owner_id: String,
    pub caption: String,
    pub media: StagedMedia,
    pub audio: StagedAudio,
}

/// Negotiate the output duration for a job.
///
/// `target = max(1, min(ceiling, floor(effective)))` where `effective`
/// is the ceiling itself for images (no intrinsic duration) and the
/// probed duration for videos.
pub fn negotiate_target(kind: MediaKind, probed_secs: Option<f64>, ceiling_secs: u32) -> u32 {
    let effective = match kind {
        MediaKind::Image => ceiling_secs as f64,
        MediaKind::Video => probed_secs.unwrap_or(0.0),
    };
    let floored = effective.floor().max(0.0) as u32;
    // min before max: a zero ceiling degrades to the 1-second floor
    // instead of panicking like `clamp(1, 0)` would.
    floored.min(ceiling_secs).max(1)
}

/// Drives render jobs end to end. One instance is shared by all
/// requests; each call is an independent, request-scoped unit of work
/// on disjoint `JobId`-namespaced paths.
pub struct ReelPipeline {
    config: PipelineConfig,
    engine: Arc<dyn RenderEngine>,
    repo: Arc<dyn ReelRepository>,
}

impl ReelPipeline {
    pub fn new(
        config: PipelineConfig,
        engine: Arc<dyn RenderEngine>,
        repo: Arc<dyn ReelRepository>,
    ) -> Self {
        Self {
            config,
            engine,
            repo,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one job under a fresh random id.
    pub async fn render(&self, request: RenderRequest) -> PipelineResult<Reel> {
        self.render_job(JobId::new(), request).await
    }

    /// Run one job under an explicit id (tests pass fixed ids).
    ///
    /// The staged originals are deleted on every exit path; the final
    /// video and thumbnail survive only on full success.
    pub async fn render_job(&self, job_id: JobId, request: RenderRequest) -> PipelineResult<Reel> {
        let job = RenderJob::new(&self.config, job_id);
        let mut manifest = ArtifactManifest::new(job.id.clone());
        manifest.track(&request.media.path);
        manifest.track(&request.audio.path);

        info!(
            job_id = %job.id,
            kind = %request.media.kind,
            "Starting reel job"
        );

        let outcome = self.run_stages(&job, &request, &mut manifest).await;

        match &outcome {
            Ok(reel) => {
                manifest.keep(&job.final_video);
                manifest.keep(&job.thumbnail);
                info!(job_id = %job.id, reel_id = %reel.id, "Reel job complete");
            }
            Err(e) => {
                error!(job_id = %job.id, "Reel job failed: {e}");
            }
        }
        manifest.sweep().await;

        outcome
    }

    async fn run_stages(
        &self,
        job: &RenderJob,
        request: &RenderRequest,
        manifest: &mut ArtifactManifest,
    ) -> PipelineResult<Reel> {
        // Images have no intrinsic duration; only videos are probed.
        let probed = match request.media.kind {
            MediaKind::Video => Some(
                self.engine
                    .probe_duration(&request.media.path)
                    .await
                    .map_err(|e| self.stage_error(job, RenderStage::Probe, e))?,
            ),
            MediaKind::Image => None,
        };

        let target_secs = negotiate_target(request.media.kind, probed, self.config.ceiling_secs);
        info!(job_id = %job.id, target_secs, "Negotiated target duration");

        manifest.track(&job.temp_video);
        match request.media.kind {
            MediaKind::Image => self
                .engine
                .normalize_image(&request.media.path, &job.temp_video, target_secs)
                .await
                .map_err(|e| self.stage_error(job, RenderStage::NormalizeVideo, e))?,
            MediaKind::Video => self
                .engine
                .normalize_video(&request.media.path, &job.temp_video, target_secs)
                .await
                .map_err(|e| self.stage_error(job, RenderStage::NormalizeVideo, e))?,
        }

        manifest.track(&job.temp_audio);
        self.engine
            .trim_audio(&request.audio.path, &job.temp_audio, target_secs)
            .await
            .map_err(|e| self.stage_error(job, RenderStage::TrimAudio, e))?;

        manifest.track(&job.final_video);
        self.engine
            .mux(&job.temp_video, &job.temp_audio, &job.final_video)
            .await
            .map_err(|e| self.stage_error(job, RenderStage::Mux, e))?;

        manifest.track(&job.thumbnail);
        self.engine
            .extract_thumbnail(
                &job.final_video,
                &job.thumbnail,
                self.config.thumbnail_offset_secs,
            )
            .await
            .map_err(|e| self.stage_error(job, RenderStage::Thumbnail, e))?;

        let reel = self
            .repo
            .persist(NewReel {
                owner_id: request.owner_id.clone(),
                caption: request.caption.clone(),
                media_url: job.media_url(&self.config.public_base),
                thumbnail_url: job.thumbnail_url(&self.config.public_base),
                duration_secs: target_secs,
            })
            .await
            .map_err(|source| {
                error!(job_id = %job.id, "Persist failed: {source}");
                PipelineError::Persist {
                    job_id: job.id.clone(),
                    source,
                }
            })?;

        Ok(reel)
    }

    fn stage_error(&self, job: &RenderJob, stage: RenderStage, source: MediaError) -> PipelineError {
        error!(job_id = %job.id, stage = %stage, "Stage failed: {source}");
        PipelineError::Stage {
            job_id: job.id.clone(),
            stage,
            source,
        }
    }
}
