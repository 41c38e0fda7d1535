//! Declared media kind for uploaded sources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of the user-supplied media part, derived from the declared
/// MIME type at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image; has no intrinsic duration.
    Image,
    /// Video clip; its duration is probed before trimming.
    Video,
}

impl MediaKind {
    /// Classify a declared MIME type. Returns `None` for anything that
    /// is neither `image/*` nor `video/*`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}
