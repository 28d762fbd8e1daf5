use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

use crate::api::attendance::{AttendanceDetailResponse, AttendanceResponse, MarkAttendance};
use crate::api::dashboard::DashboardStats;
use crate::api::employee::{
    CheckUniqueResponse, CreateEmployee, EmployeeResponse, UpdateEmployee,
};
use crate::model::attendance::{AttendanceStats, AttendanceStatus};
use crate::model::employee::Department;
use crate::models::UserResponse;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Staff Hub API",
        version = "1.0.0",
        description = r#"
## Staff Hub — HR record-keeping API

Authenticates HR users, manages the employee roster, and records daily
attendance (present/absent) per employee per day.

### 🔹 Key Features
- **Roster Management**
  - Create, update, list, search and delete employee records
- **Attendance Ledger**
  - One status per employee per day; re-marking overwrites
- **Statistics**
  - Daily present/absent counts and a dashboard snapshot

### 🔐 Security
All endpoints except signup, login and token refresh require a
**JWT Bearer access token**. Refresh tokens are individually revocable.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::check_unique,

        crate::api::attendance::mark,
        crate::api::attendance::today_stats,
        crate::api::attendance::by_employee,
        crate::api::attendance::by_date,
        crate::api::attendance::list,

        crate::api::dashboard::stats
    ),
    components(
        schemas(
            CreateEmployee,
            UpdateEmployee,
            EmployeeResponse,
            CheckUniqueResponse,
            Department,
            MarkAttendance,
            AttendanceResponse,
            AttendanceDetailResponse,
            AttendanceStats,
            AttendanceStatus,
            DashboardStats,
            UserResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Employee", description = "Employee roster APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
        (name = "Dashboard", description = "Dashboard statistics"),
    )
)]
pub struct ApiDoc;
