//! Pipeline error types.

use std::fmt;

use reel_media::MediaError;
use thiserror::Error;

use crate::job::JobId;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// The discrete transformation steps of one job, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Probe,
    NormalizeVideo,
    TrimAudio,
    Mux,
    Thumbnail,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Probe => "probe",
            Self::NormalizeVideo => "normalize-video",
            Self::TrimAudio => "trim-audio",
            Self::Mux => "mux",
            Self::Thumbnail => "thumbnail",
        };
        f.write_str(name)
    }
}

/// Failure raised by the asset repository's persist operation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct PersistError(pub String);

/// Errors that abort a pipeline run. Every variant triggers a full
/// artifact sweep for the job before it propagates.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} stage failed for job {job_id}: {source}")]
    Stage {
        job_id: JobId,
        stage: RenderStage,
        #[source]
        source: MediaError,
    },

    #[error("persist failed for job {job_id}: {source}")]
    Persist {
        job_id: JobId,
        #[source]
        source: PersistError,
    },
}

impl PipelineError {
    /// The stage at which the job failed, if it was a stage failure.
    pub fn stage(&self) -> Option<RenderStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            Self::Persist { .. } => None,
        }
    }
}
