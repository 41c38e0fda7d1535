//! Asset repository port.

use async_trait::async_trait;

use reel_models::{NewReel, Reel};

use crate::error::PersistError;

/// The external asset repository the pipeline hands finished reels to.
///
/// `persist` is issued exactly once per successful job, only after
/// both durable artifacts exist on disk. A persist failure makes the
/// pipeline delete those artifacts again, so a stored record and its
/// files always exist together or not at all.
#[async_trait]
pub trait ReelRepository: Send + Sync {
    async fn persist(&self, reel: NewReel) -> Result<Reel, PersistError>;
}
