//! Registered users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The credential hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
