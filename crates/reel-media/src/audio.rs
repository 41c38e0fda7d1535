//! Audio track trimming.

use std::path::Path;

use tracing::info;

use reel_models::encoding::AUDIO_CODEC;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Trim an audio track to `[0, target_secs)` and re-encode it to AAC.
///
/// Audio shorter than the target is accepted as-is; it is not looped.
pub async fn trim_audio(
    audio: impl AsRef<Path>,
    output: impl AsRef<Path>,
    target_secs: u32,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let audio = audio.as_ref();
    let output = output.as_ref();

    if !audio.exists() {
        return Err(MediaError::FileNotFound(audio.to_path_buf()));
    }

    info!(
        "Trimming audio {} -> {} ({}s)",
        audio.display(),
        output.display(),
        target_secs
    );

    let cmd = FfmpegCommand::new(output)
        .input(audio)
        .duration(target_secs as f64)
        .audio_codec(AUDIO_CODEC)
        .no_video();

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(&cmd).await
}
