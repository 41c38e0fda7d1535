//! Reel record operations.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use reel_models::{NewReel, Page, Reel};

use crate::error::StoreResult;

const COLS: &str = "id, owner_id, caption, media_url, thumbnail_url, duration_secs, created_at";

fn reel_from_row(row: &Row<'_>) -> rusqlite::Result<Reel> {
    let created_at: String = row.get(6)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Reel {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        caption: row.get(2)?,
        media_url: row.get(3)?,
        thumbnail_url: row.get(4)?,
        duration_secs: row.get(5)?,
        created_at,
    })
}

/// Insert a new reel record.
pub fn insert_reel(conn: &Connection, new: &NewReel) -> StoreResult<Reel> {
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    conn.execute(
        "INSERT INTO reels (id, owner_id, caption, media_url, thumbnail_url, duration_secs, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            id,
            new.owner_id,
            new.caption,
            new.media_url,
            new.thumbnail_url,
            new.duration_secs,
            created_at.to_rfc3339(),
        ],
    )?;

    Ok(Reel {
        id,
        owner_id: new.owner_id.clone(),
        caption: new.caption.clone(),
        media_url: new.media_url.clone(),
        thumbnail_url: new.thumbnail_url.clone(),
        duration_secs: new.duration_secs,
        created_at,
    })
}

/// List reels newest-first, one page at a time.
pub fn list_reels(conn: &Connection, page: u32, page_size: u32) -> StoreResult<Page<Reel>> {
    let page = page.max(1);
    // u64 arithmetic so a huge page number cannot overflow the offset.
    let offset = (page as u64 - 1) * page_size as u64;

    let total: u64 = conn.query_row("SELECT COUNT(*) FROM reels", [], |row| {
        row.get::<_, i64>(0).map(|n| n as u64)
    })?;

    let q = format!(
        "SELECT {COLS} FROM reels ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2"
    );
    let mut stmt = conn.prepare(&q)?;
    let items = stmt
        .query_map(rusqlite::params![page_size, offset], reel_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Page {
        items,
        total_pages: Page::<Reel>::page_count(total, page_size),
        current_page: page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{get_conn, init_memory_pool};
    use crate::users::create_user;

    fn new_reel(owner: &str, caption: &str) -> NewReel {
        NewReel {
            owner_id: owner.to_string(),
            caption: caption.to_string(),
            media_url: format!("/uploads/final/{caption}-reel.mp4"),
            thumbnail_url: format!("/uploads/final/{caption}-thumb.jpg"),
            duration_secs: 15,
        }
    }

    #[test]
    fn insert_and_list() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let user = create_user(&conn, "ann", "ann@example.com", "hash").unwrap();

        for i in 0..7 {
            insert_reel(&conn, &new_reel(&user.id, &format!("r{i}"))).unwrap();
        }

        let first = list_reels(&conn, 1, 5).unwrap();
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.current_page, 1);
        // Newest first.
        assert_eq!(first.items[0].caption, "r6");

        let second = list_reels(&conn, 2, 5).unwrap();
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[1].caption, "r0");
    }

    #[test]
    fn list_beyond_last_page_is_empty() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let page = list_reels(&conn, 3, 5).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 3);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let user = create_user(&conn, "cy", "cy@example.com", "hash").unwrap();
        insert_reel(&conn, &new_reel(&user.id, "only")).unwrap();

        let page = list_reels(&conn, u32::MAX, 5).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, u32::MAX);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let user = create_user(&conn, "bo", "bo@example.com", "hash").unwrap();
        insert_reel(&conn, &new_reel(&user.id, "only")).unwrap();

        let page = list_reels(&conn, 0, 5).unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 1);
    }
}
