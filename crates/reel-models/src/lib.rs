//! Shared data models for the reel backend.

pub mod encoding;
pub mod media;
pub mod page;
pub mod reel;
pub mod user;

pub use media::MediaKind;
pub use page::Page;
pub use reel::{NewReel, Reel, REELS_PAGE_SIZE};
pub use user::User;
