use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::attendance::{AttendanceRow, AttendanceStatus, AttendanceWithEmployee},
    models::iso8601,
    store,
};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    /// Employee record ID (not the employee code)
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceResponse {
    pub id: String,
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "present")]
    pub status: String,
    #[schema(example = "2024-01-01T09:00:00Z", value_type = String)]
    pub created_at: String,
}

impl From<AttendanceRow> for AttendanceResponse {
    fn from(row: AttendanceRow) -> Self {
        Self {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status: row.status,
            created_at: iso8601(&row.created_at),
        }
    }
}

/// Ledger entry joined with employee identity for display.
#[derive(Serialize, ToSchema)]
pub struct AttendanceDetailResponse {
    pub id: String,
    pub employee_id: String,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: String,
    #[schema(value_type = String)]
    pub created_at: String,
    pub employee_name: String,
    #[schema(example = "EMP001")]
    pub employee_code: String,
}

impl From<AttendanceWithEmployee> for AttendanceDetailResponse {
    fn from(row: AttendanceWithEmployee) -> Self {
        Self {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status: row.status,
            created_at: iso8601(&row.created_at),
            employee_name: row.employee_name,
            employee_code: row.employee_code,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ByEmployeeQuery {
    pub employee_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ByDateQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceListQuery {
    pub employee_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Mark attendance for an employee on a date. The sole mutation path:
/// re-marking the same (employee, date) overwrites the stored status.
#[utoipa::path(
    post,
    path = "/attendance/mark",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Entry created", body = AttendanceResponse),
        (status = 200, description = "Entry overwritten", body = AttendanceResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn mark(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    store::employees::find(pool.get_ref(), &payload.employee_id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;

    let (row, was_created) = store::attendance::mark(
        pool.get_ref(),
        &payload.employee_id,
        payload.date,
        payload.status,
        &auth.user_id,
    )
    .await?;

    info!(
        employee_id = %row.employee_id,
        date = %row.date,
        status = %row.status,
        was_created,
        "Attendance marked"
    );

    let body = AttendanceResponse::from(row);
    if was_created {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

/// Today's present/absent/total counts.
#[utoipa::path(
    get,
    path = "/attendance/today_stats",
    responses(
        (status = 200, description = "Today's counts", body = crate::model::attendance::AttendanceStats),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn today_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let stats = store::attendance::stats_for(pool.get_ref(), today).await?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Attendance history for one employee, newest date first.
#[utoipa::path(
    get,
    path = "/attendance/by_employee",
    params(("employee_id" = String, Query, description = "Employee record ID")),
    responses(
        (status = 200, description = "Entries, newest first", body = [AttendanceResponse]),
        (status = 400, description = "Missing employee_id"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn by_employee(
    pool: web::Data<SqlitePool>,
    query: web::Query<ByEmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = query
        .employee_id
        .as_deref()
        .ok_or_else(|| ApiError::field("employee_id", "employee_id is required"))?;

    store::employees::find(pool.get_ref(), employee_id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;

    let rows = store::attendance::by_employee(pool.get_ref(), employee_id).await?;
    let entries: Vec<AttendanceResponse> = rows.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(entries))
}

/// Entries for one date, joined with employee identity.
#[utoipa::path(
    get,
    path = "/attendance/by_date",
    params(("date" = String, Query, description = "Calendar date (YYYY-MM-DD)")),
    responses(
        (status = 200, description = "Entries for the date", body = [AttendanceDetailResponse]),
        (status = 400, description = "Missing or malformed date"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn by_date(
    pool: web::Data<SqlitePool>,
    query: web::Query<ByDateQuery>,
) -> Result<HttpResponse, ApiError> {
    let date = query
        .date
        .ok_or_else(|| ApiError::field("date", "date is required"))?;

    let rows = store::attendance::by_date(pool.get_ref(), date).await?;
    let entries: Vec<AttendanceDetailResponse> = rows.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(entries))
}

/// Ledger listing with optional employee, date, and inclusive date-range
/// filters.
#[utoipa::path(
    get,
    path = "/attendance",
    params(
        ("employee_id" = Option<String>, Query, description = "Filter by employee record ID"),
        ("date" = Option<String>, Query, description = "Filter by exact date"),
        ("start_date" = Option<String>, Query, description = "Range start (inclusive)"),
        ("end_date" = Option<String>, Query, description = "Range end (inclusive)")
    ),
    responses(
        (status = 200, description = "Matching entries", body = [AttendanceDetailResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceListQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = store::attendance::AttendanceFilter {
        employee_id: query.employee_id.clone(),
        date: query.date,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let rows = store::attendance::list(pool.get_ref(), &filter).await?;
    let entries: Vec<AttendanceDetailResponse> = rows.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(entries))
}
