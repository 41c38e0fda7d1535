//! Audio/video muxing.

use std::path::Path;

use tracing::info;

use reel_models::encoding::AUDIO_CODEC;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Mux one normalized (silent) video and one trimmed audio file into a
/// single container.
///
/// Selects exactly the first video stream of the first input and the
/// first audio stream of the second. The video stream is copied
/// without re-encoding; output length is bounded by the shorter of the
/// two streams.
pub async fn mux(
    video: impl AsRef<Path>,
    audio: impl AsRef<Path>,
    output: impl AsRef<Path>,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let video = video.as_ref();
    let audio = audio.as_ref();
    let output = output.as_ref();

    if !video.exists() {
        return Err(MediaError::FileNotFound(video.to_path_buf()));
    }
    if !audio.exists() {
        return Err(MediaError::FileNotFound(audio.to_path_buf()));
    }

    info!(
        "Muxing {} + {} -> {}",
        video.display(),
        audio.display(),
        output.display()
    );

    let cmd = FfmpegCommand::new(output)
        .input(video)
        .input(audio)
        .map_stream("0:v:0")
        .map_stream("1:a:0")
        .video_codec("copy")
        .audio_codec(AUDIO_CODEC)
        .shortest();

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(secs);
    }
    runner.run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mux_args_select_one_stream_each() {
        let cmd = FfmpegCommand::new("reel.mp4")
            .input("video.mp4")
            .input("audio.m4a")
            .map_stream("0:v:0")
            .map_stream("1:a:0")
            .video_codec("copy")
            .audio_codec(AUDIO_CODEC)
            .shortest();

        let args = cmd.build_args();
        assert!(args.windows(2).any(|w| w == ["-map", "0:v:0"]));
        assert!(args.windows(2).any(|w| w == ["-map", "1:a:0"]));
        assert!(args.windows(2).any(|w| w == ["-c:v", "copy"]));
        assert!(args.windows(2).any(|w| w == ["-c:a", "aac"]));
        assert!(args.contains(&"-shortest".to_string()));
    }
}
