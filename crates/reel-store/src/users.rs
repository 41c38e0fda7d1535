//! User account operations.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use reel_models::User;

use crate::error::{StoreError, StoreResult};

const COLS: &str = "id, name, email, created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let created_at: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at,
    })
}

/// Create a new account with an already-hashed credential.
pub fn create_user(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> StoreResult<User> {
    if get_user_by_email(conn, email)?.is_some() {
        return Err(StoreError::EmailTaken(email.to_string()));
    }

    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    conn.execute(
        "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![id, name, email, password_hash, created_at.to_rfc3339()],
    )?;

    Ok(User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        created_at,
    })
}

/// Look up an account and its credential hash by email.
pub fn get_user_by_email(conn: &Connection, email: &str) -> StoreResult<Option<(User, String)>> {
    let q = format!("SELECT {COLS}, password_hash FROM users WHERE email = ?1");
    let result = conn.query_row(&q, [email], |row| {
        let user = user_from_row(row)?;
        let hash: String = row.get(4)?;
        Ok((user, hash))
    });
    match result {
        Ok(found) => Ok(Some(found)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List all accounts, credential hashes excluded.
pub fn list_users(conn: &Connection) -> StoreResult<Vec<User>> {
    let q = format!("SELECT {COLS} FROM users ORDER BY created_at");
    let mut stmt = conn.prepare(&q)?;
    let users = stmt
        .query_map([], user_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{get_conn, init_memory_pool};

    #[test]
    fn create_and_lookup() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let user = create_user(&conn, "ann", "ann@example.com", "$2b$fakehash").unwrap();
        assert_eq!(user.name, "ann");

        let (found, hash) = get_user_by_email(&conn, "ann@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(hash, "$2b$fakehash");

        assert!(get_user_by_email(&conn, "nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        create_user(&conn, "ann", "ann@example.com", "h1").unwrap();
        let err = create_user(&conn, "ann2", "ann@example.com", "h2").unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken(_)));
    }

    #[test]
    fn listing_omits_hashes() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        create_user(&conn, "a", "a@example.com", "h").unwrap();
        create_user(&conn, "b", "b@example.com", "h").unwrap();

        let users = list_users(&conn).unwrap();
        assert_eq!(users.len(), 2);
    }
}
