//! Multipart upload staging.
//!
//! Incoming reel uploads carry a `media` part (image or video), a `song`
//! part (audio) and an optional `caption` text part. Both files are
//! streamed to the staging directory before the pipeline runs; if the
//! request is malformed, anything already written is removed.

use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart};
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use reel_models::MediaKind;
use reel_pipeline::{StagedAudio, StagedMedia};

use crate::error::{ApiError, ApiResult};

/// The parsed and staged parts of a reel creation request.
#[derive(Debug)]
pub struct ReelUpload {
    pub media: StagedMedia,
    pub audio: StagedAudio,
    pub caption: String,
}

/// Read the multipart stream and stage both files to disk.
///
/// Fails with 400 when a part is missing, duplicated, or carries the
/// wrong content type. Staged files are deleted on every error path.
pub async fn stage_reel_upload(
    multipart: &mut Multipart,
    staging_dir: &Path,
) -> ApiResult<ReelUpload> {
    let mut staged: Vec<PathBuf> = Vec::new();

    match read_parts(multipart, staging_dir, &mut staged).await {
        Ok(upload) => Ok(upload),
        Err(err) => {
            for path in &staged {
                if let Err(e) = tokio::fs::remove_file(path).await {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(path = %path.display(), error = %e, "failed to remove staged upload");
                    }
                }
            }
            Err(err)
        }
    }
}

async fn read_parts(
    multipart: &mut Multipart,
    staging_dir: &Path,
    staged: &mut Vec<PathBuf>,
) -> ApiResult<ReelUpload> {
    let mut media: Option<StagedMedia> = None;
    let mut audio: Option<StagedAudio> = None;
    let mut caption = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "media" => {
                if media.is_some() {
                    return Err(ApiError::BadRequest("duplicate part: media".to_string()));
                }
                let kind = field
                    .content_type()
                    .and_then(MediaKind::from_mime)
                    .ok_or_else(|| {
                        ApiError::BadRequest(
                            "media part must be an image/* or video/* file".to_string(),
                        )
                    })?;
                let path = write_field(field, staging_dir).await?;
                staged.push(path.clone());
                media = Some(StagedMedia { path, kind });
            }
            "song" => {
                if audio.is_some() {
                    return Err(ApiError::BadRequest("duplicate part: song".to_string()));
                }
                let is_audio = field
                    .content_type()
                    .map(|ct| ct.starts_with("audio/"))
                    .unwrap_or(false);
                if !is_audio {
                    return Err(ApiError::BadRequest(
                        "song part must be an audio/* file".to_string(),
                    ));
                }
                let path = write_field(field, staging_dir).await?;
                staged.push(path.clone());
                audio = Some(StagedAudio { path });
            }
            "caption" => {
                caption = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("invalid caption: {e}")))?;
            }
            // unknown parts are drained and ignored
            _ => {}
        }
    }

    let media =
        media.ok_or_else(|| ApiError::BadRequest("missing required part: media".to_string()))?;
    let audio =
        audio.ok_or_else(|| ApiError::BadRequest("missing required part: song".to_string()))?;

    Ok(ReelUpload {
        media,
        audio,
        caption,
    })
}

/// Stream one multipart field to a fresh file in the staging directory.
async fn write_field(mut field: Field<'_>, staging_dir: &Path) -> ApiResult<PathBuf> {
    let path = staging_dir.join(staged_filename(field.file_name()));
    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to create staged file: {e}")))?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::BadRequest(format!("upload interrupted: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to write staged file: {e}")))?;
    }
    file.flush()
        .await
        .map_err(|e| ApiError::Internal(format!("failed to flush staged file: {e}")))?;

    Ok(path)
}

/// Unique on-disk name for a staged upload. The client filename is never
/// trusted for anything beyond its extension.
fn staged_filename(client_name: Option<&str>) -> String {
    let ext = client_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()) && e.len() <= 8)
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    let nonce = Uuid::new_v4().simple().to_string();
    format!("{}-{}{}", Utc::now().timestamp_millis(), &nonce[..6], ext)
}
