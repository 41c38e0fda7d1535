//! Thumbnail extraction.

use std::path::Path;

use tracing::info;

use reel_models::encoding::{scale_filter, THUMBNAIL_SCALE_WIDTH};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Capture a single frame from `video` at `offset_secs` and write it
/// as a compressed still image scaled to the thumbnail width.
///
/// ffmpeg exits zero when seeking past the end of the container, so an
/// empty or missing output file is treated as a failure too.
pub async fn extract_thumbnail(
    video: impl AsRef<Path>,
    output: impl AsRef<Path>,
    offset_secs: f64,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let video = video.as_ref();
    let output = output.as_ref();

    if !video.exists() {
        return Err(MediaError::FileNotFound(video.to_path_buf()));
    }

    info!(
        "Extracting thumbnail {} -> {} (at {:.1}s)",
        video.display(),
        output.display(),
        offset_secs
    );

    let cmd = FfmpegCommand::new(output)
        .input_with_args(video, ["-ss".to_string(), format!("{offset_secs:.3}")])
        .single_frame()
        .video_filter(scale_filter(THUMBNAIL_SCALE_WIDTH));

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(&cmd).await?;

    let wrote_frame = tokio::fs::metadata(output)
        .await
        .map(|m| m.len() > 0)
        .unwrap_or(false);
    if !wrote_frame {
        return Err(MediaError::EmptyOutput(output.to_path_buf()));
    }

    Ok(())
}
