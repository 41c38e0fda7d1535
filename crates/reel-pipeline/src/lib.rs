//! Reel composition pipeline.
//!
//! Turns a staged image-or-video upload and an audio track into a
//! normalized, fixed-maximum-duration reel plus thumbnail, persisting
//! the record only on full success and sweeping every artifact
//! otherwise.

pub mod config;
pub mod error;
pub mod job;
pub mod manifest;
pub mod orchestrator;
pub mod repo;

pub use config::PipelineConfig;
pub use error::{PersistError, PipelineError, PipelineResult, RenderStage};
pub use job::{JobId, RenderJob, StagedAudio, StagedMedia};
pub use manifest::ArtifactManifest;
pub use orchestrator::{negotiate_target, ReelPipeline, RenderRequest};
pub use repo::ReelRepository;
