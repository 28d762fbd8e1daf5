use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account row. Accounts are deactivated via `is_active`, never hard-deleted.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
}
