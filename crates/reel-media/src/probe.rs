//! FFprobe duration prober.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Probe a media file for its playable duration in seconds.
///
/// Not meant for still images; they have no intrinsic duration.
pub async fn probe_duration(
    path: impl AsRef<Path>,
    timeout_secs: Option<u64>,
) -> MediaResult<f64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    debug!("Probing duration of {}", path.display());

    let mut cmd = Command::new("ffprobe");
    cmd.args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), cmd.output())
            .await
            .map_err(|_| MediaError::Timeout(secs))??,
        None => cmd.output().await?,
    };

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            "FFprobe exited with non-zero status",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    parse_duration(&output.stdout, path)
}

/// Parse the `format.duration` field out of ffprobe's JSON output.
fn parse_duration(stdout: &[u8], path: &Path) -> MediaResult<f64> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| MediaError::NoDuration(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        let json = br#"{"format":{"duration":"20.480000","size":"1024"}}"#;
        let d = parse_duration(json, Path::new("a.mp4")).unwrap();
        assert!((d - 20.48).abs() < 0.001);
    }

    #[test]
    fn test_parse_duration_missing() {
        let json = br#"{"format":{"size":"1024"}}"#;
        let err = parse_duration(json, Path::new("a.mp4")).unwrap_err();
        assert!(matches!(err, MediaError::NoDuration(_)));
    }

    #[test]
    fn test_parse_duration_unparseable() {
        let json = br#"{"format":{"duration":"N/A"}}"#;
        let err = parse_duration(json, Path::new("a.mp4")).unwrap_err();
        assert!(matches!(err, MediaError::NoDuration(_)));
    }

    #[test]
    fn test_parse_duration_invalid_json() {
        let err = parse_duration(b"not json", Path::new("a.mp4")).unwrap_err();
        assert!(matches!(err, MediaError::JsonParse(_)));
    }
}
