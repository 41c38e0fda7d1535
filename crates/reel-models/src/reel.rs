//! Persisted reel records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of reels per listing page.
pub const REELS_PAGE_SIZE: u32 = 5;

/// A finished reel as stored by the asset repository.
///
/// A record exists if and only if both referenced files remain on
/// durable storage; the pipeline persists it exactly once, after the
/// mux and thumbnail stages both succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reel {
    pub id: String,
    /// Owner reference (authenticated caller at creation time)
    pub owner_id: String,
    pub caption: String,
    /// Public URL of the muxed video
    pub media_url: String,
    /// Public URL of the extracted thumbnail
    pub thumbnail_url: String,
    /// Negotiated duration in seconds
    pub duration_secs: u32,
    pub created_at: DateTime<Utc>,
}

/// Fields for a reel about to be persisted.
#[derive(Debug, Clone)]
pub struct NewReel {
    pub owner_id: String,
    pub caption: String,
    pub media_url: String,
    pub thumbnail_url: String,
    pub duration_secs: u32,
}
