use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::attendance::{AttendanceRow, AttendanceStats, AttendanceStatus, AttendanceWithEmployee};
use crate::store::foreign_key_violation;

/// The single mutation path for attendance: an atomic conditional write
/// keyed by the (employee, date) UNIQUE constraint. Concurrent marks for
/// the same pair race to exactly one surviving row. The returned flag is
/// true when the row was newly created; an overwrite keeps the original
/// `created_at` and id.
pub async fn mark(
    pool: &SqlitePool,
    employee_id: &str,
    date: NaiveDate,
    status: AttendanceStatus,
    marked_by: &str,
) -> Result<(AttendanceRow, bool), ApiError> {
    let candidate_id = Uuid::new_v4().to_string();

    let row = sqlx::query_as::<_, AttendanceRow>(
        r#"
        INSERT INTO attendance_records (id, employee_id, date, status, created_at, marked_by)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(employee_id, date)
        DO UPDATE SET status = excluded.status, marked_by = excluded.marked_by
        RETURNING id, employee_id, date, status, created_at, marked_by
        "#,
    )
    .bind(&candidate_id)
    .bind(employee_id)
    .bind(date)
    .bind(status.to_string())
    .bind(Utc::now())
    .bind(marked_by)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if foreign_key_violation(&e) {
            // Employee vanished between the handler's lookup and the write
            ApiError::NotFound("Employee")
        } else {
            e.into()
        }
    })?;

    // On conflict SQLite returns the existing row, whose id is not ours.
    let was_created = row.id == candidate_id;

    Ok((row, was_created))
}

pub async fn by_employee(
    pool: &SqlitePool,
    employee_id: &str,
) -> Result<Vec<AttendanceRow>, ApiError> {
    sqlx::query_as::<_, AttendanceRow>(
        "SELECT * FROM attendance_records WHERE employee_id = ? ORDER BY date DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

const JOINED_SELECT: &str = r#"
    SELECT a.id, a.employee_id, a.date, a.status, a.created_at,
           e.full_name AS employee_name, e.employee_code AS employee_code
    FROM attendance_records a
    JOIN employees e ON e.id = a.employee_id
"#;

pub async fn by_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<AttendanceWithEmployee>, ApiError> {
    let sql = format!("{JOINED_SELECT} WHERE a.date = ? ORDER BY e.full_name");

    sqlx::query_as::<_, AttendanceWithEmployee>(&sql)
        .bind(date)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

#[derive(Debug, Default)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Ledger listing with optional employee, exact-date and inclusive
/// date-range filters, joined with employee identity.
pub async fn list(
    pool: &SqlitePool,
    filter: &AttendanceFilter,
) -> Result<Vec<AttendanceWithEmployee>, ApiError> {
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(employee_id) = &filter.employee_id {
        conditions.push("a.employee_id = ?");
        bindings.push(employee_id.clone());
    }

    if let Some(date) = filter.date {
        conditions.push("a.date = ?");
        bindings.push(date.to_string());
    }

    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        conditions.push("a.date BETWEEN ? AND ?");
        bindings.push(start.to_string());
        bindings.push(end.to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!("{JOINED_SELECT} {where_clause} ORDER BY a.date DESC, e.full_name");

    let mut query = sqlx::query_as::<_, AttendanceWithEmployee>(&sql);
    for b in &bindings {
        query = query.bind(b);
    }

    query.fetch_all(pool).await.map_err(Into::into)
}

/// Counts over entries exactly matching the date. Only the two statuses
/// exist, so total always equals the row count for that date.
pub async fn stats_for(pool: &SqlitePool, date: NaiveDate) -> Result<AttendanceStats, ApiError> {
    sqlx::query_as::<_, AttendanceStats>(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN status = 'present' THEN 1 ELSE 0 END), 0) AS present,
            COALESCE(SUM(CASE WHEN status = 'absent' THEN 1 ELSE 0 END), 0) AS absent,
            COUNT(*) AS total
        FROM attendance_records
        WHERE date = ?
        "#,
    )
    .bind(date)
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}
