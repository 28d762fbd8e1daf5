use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One status per (employee, date); the composite UNIQUE constraint in the
/// schema is the backstop for this invariant.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub marked_by: Option<String>,
}

/// Ledger row joined with employee identity for display.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceWithEmployee {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_code: String,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceStats {
    #[schema(example = 5)]
    pub present: i64,
    #[schema(example = 1)]
    pub absent: i64,
    #[schema(example = 6)]
    pub total: i64,
}
