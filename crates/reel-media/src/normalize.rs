//! Source normalization: image-loop and video-trim strategies.
//!
//! Both strategies emit a silent mp4 with the same codec, pixel format
//! and width so the muxer never needs to know which one produced its
//! video input.

use std::path::Path;

use tracing::info;

use reel_models::encoding::{
    scale_filter, PIXEL_FORMAT, REEL_SCALE_WIDTH, VIDEO_CODEC, VIDEO_PRESET,
};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Produce a silent video of exactly `target_secs` by looping a still
/// image's single frame.
pub async fn normalize_image(
    image: impl AsRef<Path>,
    output: impl AsRef<Path>,
    target_secs: u32,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let image = image.as_ref();
    let output = output.as_ref();

    if !image.exists() {
        return Err(MediaError::FileNotFound(image.to_path_buf()));
    }

    info!(
        "Normalizing image {} -> {} ({}s loop)",
        image.display(),
        output.display(),
        target_secs
    );

    let cmd = FfmpegCommand::new(output)
        .input_with_args(image, ["-loop", "1"])
        .duration(target_secs as f64)
        .video_codec(VIDEO_CODEC)
        .pixel_format(PIXEL_FORMAT)
        .video_filter(scale_filter(REEL_SCALE_WIDTH))
        .no_audio();

    run(&cmd, timeout_secs).await
}

/// Produce a silent video trimmed to `[0, target_secs)`, re-encoded
/// with the same constraints as the image strategy and stripped of its
/// original audio track.
pub async fn normalize_video(
    video: impl AsRef<Path>,
    output: impl AsRef<Path>,
    target_secs: u32,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let video = video.as_ref();
    let output = output.as_ref();

    if !video.exists() {
        return Err(MediaError::FileNotFound(video.to_path_buf()));
    }

    info!(
        "Trimming video {} -> {} ({}s)",
        video.display(),
        output.display(),
        target_secs
    );

    let cmd = FfmpegCommand::new(output)
        .input(video)
        .duration(target_secs as f64)
        .video_codec(VIDEO_CODEC)
        .preset(VIDEO_PRESET)
        .pixel_format(PIXEL_FORMAT)
        .video_filter(scale_filter(REEL_SCALE_WIDTH))
        .no_audio();

    run(&cmd, timeout_secs).await
}

async fn run(cmd: &FfmpegCommand, timeout_secs: Option<u64>) -> MediaResult<()> {
    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &FfmpegCommand) -> Vec<String> {
        cmd.build_args()
    }

    #[test]
    fn test_image_strategy_args() {
        let cmd = FfmpegCommand::new("out.mp4")
            .input_with_args("still.png", ["-loop", "1"])
            .duration(15.0)
            .video_codec(VIDEO_CODEC)
            .pixel_format(PIXEL_FORMAT)
            .video_filter(scale_filter(REEL_SCALE_WIDTH))
            .no_audio();

        let args = args_of(&cmd);
        assert!(args.contains(&"-loop".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"yuv420p".to_string()));
        assert!(args.contains(&"scale=720:-2".to_string()));
        assert!(args.contains(&"-an".to_string()));
    }

    #[test]
    fn test_strategies_are_format_equivalent() {
        // Same codec, pixel format and width filter regardless of origin.
        let image = FfmpegCommand::new("a.mp4")
            .input_with_args("still.png", ["-loop", "1"])
            .duration(15.0)
            .video_codec(VIDEO_CODEC)
            .pixel_format(PIXEL_FORMAT)
            .video_filter(scale_filter(REEL_SCALE_WIDTH))
            .no_audio();
        let video = FfmpegCommand::new("b.mp4")
            .input("clip.mp4")
            .duration(4.0)
            .video_codec(VIDEO_CODEC)
            .preset(VIDEO_PRESET)
            .pixel_format(PIXEL_FORMAT)
            .video_filter(scale_filter(REEL_SCALE_WIDTH))
            .no_audio();

        for args in [image.build_args(), video.build_args()] {
            assert!(args.contains(&"libx264".to_string()));
            assert!(args.contains(&"yuv420p".to_string()));
            assert!(args.contains(&"scale=720:-2".to_string()));
            assert!(args.contains(&"-an".to_string()));
        }
        // Only the video-trim strategy carries the fast preset.
        assert!(video.build_args().contains(&"veryfast".to_string()));
    }
}
