use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

use crate::{
    auth::auth::AuthUser,
    error::ApiError,
    model::employee::{Department, EmployeeRow},
    models::{is_valid_email, iso8601},
    store,
};

/// The employee code travels as `employee_id` on the wire; `id` is the
/// record's surrogate key.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[serde(rename = "employee_id")]
    #[schema(example = "EMP001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    pub department: Department,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    #[serde(rename = "employee_id")]
    pub employee_code: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<Department>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    pub department: Option<Department>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: String,
    #[serde(rename = "employee_id")]
    #[schema(example = "EMP001")]
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "2024-01-01T00:00:00Z", value_type = String)]
    pub created_at: String,
}

impl From<EmployeeRow> for EmployeeResponse {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            employee_code: row.employee_code,
            full_name: row.full_name,
            email: row.email,
            department: row.department,
            created_at: iso8601(&row.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckUniqueQuery {
    pub employee_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CheckUniqueResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id_unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_unique: Option<bool>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate employee code or email"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    if payload.employee_code.trim().is_empty() {
        return Err(ApiError::field("employee_id", "Employee ID is required"));
    }
    if payload.full_name.trim().is_empty() {
        return Err(ApiError::field("full_name", "Full name is required"));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::field("email", "Enter a valid email address"));
    }

    let row = store::employees::insert(
        pool.get_ref(),
        store::employees::NewEmployee {
            employee_code: payload.employee_code.trim(),
            full_name: payload.full_name.trim(),
            email: &payload.email,
            department: payload.department.as_ref(),
            created_by: &auth.user_id,
        },
    )
    .await?;

    info!(employee_id = %row.id, code = %row.employee_code, "Employee created");

    Ok(HttpResponse::Created().json(EmployeeResponse::from(row)))
}

/// List employees, optionally filtered by department and a
/// case-insensitive search over name, code and email.
#[utoipa::path(
    get,
    path = "/employees",
    params(
        ("department" = Option<String>, Query, description = "Filter by department"),
        ("search" = Option<String>, Query, description = "Search by name, employee ID or email")
    ),
    responses(
        (status = 200, description = "Employee list", body = [EmployeeResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = store::employees::EmployeeFilter {
        department: query.department.map(|d| d.to_string()),
        search: query.search.clone(),
    };

    let rows = store::employees::list(pool.get_ref(), &filter).await?;
    let employees: Vec<EmployeeResponse> = rows.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id" = String, Path, description = "Employee record ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let row = store::employees::find(pool.get_ref(), &id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(row)))
}

/// Update Employee (partial)
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(("id" = String, Path, description = "Employee record ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Duplicate employee code or email"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if let Some(email) = &payload.email {
        if !is_valid_email(email) {
            return Err(ApiError::field("email", "Enter a valid email address"));
        }
    }

    let changes = store::employees::EmployeeChanges {
        employee_code: payload.employee_code.clone(),
        full_name: payload.full_name.clone(),
        email: payload.email.clone(),
        department: payload.department.map(|d| d.to_string()),
    };

    let row = store::employees::update(pool.get_ref(), &id, &changes).await?;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(row)))
}

/// Delete Employee. Attendance entries owned by the record go with it.
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id" = String, Path, description = "Employee record ID")),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if !store::employees::delete(pool.get_ref(), &id).await? {
        return Err(ApiError::NotFound("Employee"));
    }

    info!(employee_id = %id, "Employee deleted");

    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully deleted" })))
}

/// Read-only uniqueness probe for the roster form; each field is
/// independently optional.
#[utoipa::path(
    get,
    path = "/employees/check_unique",
    params(
        ("employee_id" = Option<String>, Query, description = "Employee code to probe"),
        ("email" = Option<String>, Query, description = "Email to probe")
    ),
    responses(
        (status = 200, description = "Uniqueness probe result", body = CheckUniqueResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn check_unique(
    pool: web::Data<SqlitePool>,
    query: web::Query<CheckUniqueQuery>,
) -> Result<HttpResponse, ApiError> {
    let (employee_id_unique, email_unique) = store::employees::check_unique(
        pool.get_ref(),
        query.employee_id.as_deref(),
        query.email.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(CheckUniqueResponse {
        employee_id_unique,
        email_unique,
    }))
}
