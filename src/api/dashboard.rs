use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::{error::ApiError, store};

/// Read-only snapshot: roster cardinality plus today's ledger aggregate.
#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    #[schema(example = 42)]
    pub total_employees: i64,
    #[schema(example = 38)]
    pub present_today: i64,
    #[schema(example = 2)]
    pub absent_today: i64,
    #[schema(example = 40)]
    pub attendance_marked: i64,
}

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardStats),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let total_employees = store::employees::count(pool.get_ref()).await?;

    let today = Utc::now().date_naive();
    let today_stats = store::attendance::stats_for(pool.get_ref(), today).await?;

    Ok(HttpResponse::Ok().json(DashboardStats {
        total_employees,
        present_today: today_stats.present,
        absent_today: today_stats.absent,
        attendance_marked: today_stats.total,
    }))
}
