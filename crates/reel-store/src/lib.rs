//! SQLite-backed asset repository and user store.
//!
//! Implements the pipeline's [`ReelRepository`] port and the account
//! plumbing behind the auth endpoints.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod reels;
pub mod users;

use async_trait::async_trait;

use reel_models::{NewReel, Page, Reel, User};
use reel_pipeline::{PersistError, ReelRepository};

pub use error::{StoreError, StoreResult};
pub use pool::{DbPool, PooledConnection};

/// Handle to the backing database, cheap to clone.
#[derive(Clone)]
pub struct ReelStore {
    pool: DbPool,
}

impl ReelStore {
    /// Open (and migrate) the database at `db_path`.
    pub fn open(db_path: &str) -> StoreResult<Self> {
        Ok(Self {
            pool: pool::init_pool(db_path)?,
        })
    }

    /// Open an in-memory database (tests).
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            pool: pool::init_memory_pool()?,
        })
    }

    pub fn list_reels(&self, page: u32, page_size: u32) -> StoreResult<Page<Reel>> {
        let conn = pool::get_conn(&self.pool)?;
        reels::list_reels(&conn, page, page_size)
    }

    pub fn create_user(&self, name: &str, email: &str, password_hash: &str) -> StoreResult<User> {
        let conn = pool::get_conn(&self.pool)?;
        users::create_user(&conn, name, email, password_hash)
    }

    pub fn get_user_by_email(&self, email: &str) -> StoreResult<Option<(User, String)>> {
        let conn = pool::get_conn(&self.pool)?;
        users::get_user_by_email(&conn, email)
    }

    pub fn list_users(&self) -> StoreResult<Vec<User>> {
        let conn = pool::get_conn(&self.pool)?;
        users::list_users(&conn)
    }
}

#[async_trait]
impl ReelRepository for ReelStore {
    async fn persist(&self, reel: NewReel) -> Result<Reel, PersistError> {
        let conn = pool::get_conn(&self.pool).map_err(|e| PersistError(e.to_string()))?;
        reels::insert_reel(&conn, &reel).map_err(|e| PersistError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn persist_via_repository_port() {
        let store = ReelStore::open_in_memory().unwrap();
        let user = store.create_user("ann", "ann@example.com", "hash").unwrap();

        let reel = store
            .persist(NewReel {
                owner_id: user.id.clone(),
                caption: "first".to_string(),
                media_url: "/uploads/final/x-reel.mp4".to_string(),
                thumbnail_url: "/uploads/final/x-thumb.jpg".to_string(),
                duration_secs: 15,
            })
            .await
            .unwrap();

        assert_eq!(reel.owner_id, user.id);

        let page = store.list_reels(1, 5).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, reel.id);
    }
}
