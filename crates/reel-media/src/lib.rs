//! FFmpeg CLI wrapper for reel composition.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with multi-input support
//! - A runner with per-invocation timeout and stderr capture
//! - The five stage operations (probe, normalize, audio trim, mux,
//!   thumbnail)
//! - The [`RenderEngine`] trait the pipeline orchestrator drives

pub mod audio;
pub mod command;
pub mod engine;
pub mod error;
pub mod mux;
pub mod normalize;
pub mod probe;
pub mod thumbnail;

pub use audio::trim_audio;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use engine::{FfmpegEngine, RenderEngine};
pub use error::{MediaError, MediaResult};
pub use mux::mux;
pub use normalize::{normalize_image, normalize_video};
pub use probe::probe_duration;
pub use thumbnail::extract_thumbnail;
