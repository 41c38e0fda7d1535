//! Encoding constants shared by the normalizer, muxer and thumbnailer.
//!
//! Both normalizer strategies must produce format-equivalent output
//! (same container, codec, pixel format and width) so the muxer can
//! treat either origin identically.

/// Video codec for normalized output (H.264)
pub const VIDEO_CODEC: &str = "libx264";
/// Audio codec for trimmed and muxed audio
pub const AUDIO_CODEC: &str = "aac";
/// Pixel format with wide playback support
pub const PIXEL_FORMAT: &str = "yuv420p";
/// Encoding preset for the video-trim strategy
pub const VIDEO_PRESET: &str = "veryfast";

/// Normalized video width; height follows the source aspect ratio,
/// forced to an even pixel count.
pub const REEL_SCALE_WIDTH: u32 = 720;

/// Thumbnail width; height follows the source aspect ratio.
pub const THUMBNAIL_SCALE_WIDTH: u32 = 480;
/// Default frame capture offset into the muxed output.
pub const THUMBNAIL_OFFSET_SECS: f64 = 0.5;

/// Maximum reel duration in seconds unless configured otherwise.
pub const DEFAULT_CEILING_SECS: u32 = 15;

/// Video filter that scales to a target width keeping aspect ratio,
/// with the height rounded down to an even value.
pub fn scale_filter(width: u32) -> String {
    format!("scale={width}:-2")
}
