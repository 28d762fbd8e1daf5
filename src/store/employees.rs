use chrono::Utc;
use sqlx::{QueryBuilder, SqlitePool};
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::employee::EmployeeRow;
use crate::store::unique_violation;

pub struct NewEmployee<'a> {
    pub employee_code: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub department: &'a str,
    pub created_by: &'a str,
}

#[derive(Default)]
pub struct EmployeeChanges {
    pub employee_code: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Default)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    pub search: Option<String>,
}

fn conflict_for(message: &str) -> ApiError {
    // e.g. "UNIQUE constraint failed: employees.email"
    if message.contains("employees.email") {
        ApiError::Conflict {
            field: "email",
            message: "Email already exists".into(),
        }
    } else {
        ApiError::Conflict {
            field: "employee_id",
            message: "Employee ID already exists".into(),
        }
    }
}

pub async fn insert(pool: &SqlitePool, new: NewEmployee<'_>) -> Result<EmployeeRow, ApiError> {
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO employees (id, employee_code, full_name, email, department, created_at, created_by)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(new.employee_code)
    .bind(new.full_name)
    .bind(new.email)
    .bind(new.department)
    .bind(created_at)
    .bind(new.created_by)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(EmployeeRow {
            id,
            employee_code: new.employee_code.to_owned(),
            full_name: new.full_name.to_owned(),
            email: new.email.to_owned(),
            department: new.department.to_owned(),
            created_at,
            created_by: Some(new.created_by.to_owned()),
        }),
        Err(e) => match unique_violation(&e) {
            Some(message) => Err(conflict_for(&message)),
            None => Err(e.into()),
        },
    }
}

pub async fn find(pool: &SqlitePool, id: &str) -> Result<Option<EmployeeRow>, ApiError> {
    sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> Result<Option<EmployeeRow>, ApiError> {
    sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE employee_code = ?")
        .bind(code)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

/// Roster listing, newest first. `search` is a case-insensitive substring
/// match over name, code and email (union of the three).
pub async fn list(pool: &SqlitePool, filter: &EmployeeFilter) -> Result<Vec<EmployeeRow>, ApiError> {
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(department) = &filter.department {
        conditions.push("department = ?");
        bindings.push(department.clone());
    }

    if let Some(search) = &filter.search {
        conditions.push("(LOWER(full_name) LIKE ? OR LOWER(employee_code) LIKE ? OR LOWER(email) LIKE ?)");
        let like = format!("%{}%", search.to_lowercase());
        bindings.push(like.clone());
        bindings.push(like.clone());
        bindings.push(like);
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT * FROM employees {} ORDER BY created_at DESC, id",
        where_clause
    );

    let mut query = sqlx::query_as::<_, EmployeeRow>(&sql);
    for b in &bindings {
        query = query.bind(b);
    }

    query.fetch_all(pool).await.map_err(Into::into)
}

/// Partial update; uniqueness races are settled by the schema constraints.
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    changes: &EmployeeChanges,
) -> Result<EmployeeRow, ApiError> {
    let mut qb = QueryBuilder::new("UPDATE employees SET ");
    let mut touched = false;

    {
        let mut set = qb.separated(", ");
        if let Some(code) = &changes.employee_code {
            set.push("employee_code = ").push_bind_unseparated(code.clone());
            touched = true;
        }
        if let Some(name) = &changes.full_name {
            set.push("full_name = ").push_bind_unseparated(name.clone());
            touched = true;
        }
        if let Some(email) = &changes.email {
            set.push("email = ").push_bind_unseparated(email.clone());
            touched = true;
        }
        if let Some(department) = &changes.department {
            set.push("department = ")
                .push_bind_unseparated(department.clone());
            touched = true;
        }
    }

    if !touched {
        return Err(ApiError::validation("No fields provided for update"));
    }

    qb.push(" WHERE id = ");
    qb.push_bind(id);

    match qb.build().execute(pool).await {
        Ok(r) if r.rows_affected() == 0 => Err(ApiError::NotFound("Employee")),
        Ok(_) => find(pool, id).await?.ok_or(ApiError::NotFound("Employee")),
        Err(e) => match unique_violation(&e) {
            Some(message) => Err(conflict_for(&message)),
            None => Err(e.into()),
        },
    }
}

/// Owning delete; the employee's attendance rows go with it (FK cascade).
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, ApiError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool) -> Result<i64, ApiError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

/// Read-only existence probes, each independently optional.
pub async fn check_unique(
    pool: &SqlitePool,
    employee_code: Option<&str>,
    email: Option<&str>,
) -> Result<(Option<bool>, Option<bool>), ApiError> {
    let code_unique = match employee_code {
        Some(code) => {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_code = ?)",
            )
            .bind(code)
            .fetch_one(pool)
            .await?;
            Some(!exists)
        }
        None => None,
    };

    let email_unique = match email {
        Some(email) => {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM employees WHERE email = ?)",
            )
            .bind(email)
            .fetch_one(pool)
            .await?;
            Some(!exists)
        }
        None => None,
    };

    Ok((code_unique, email_unique))
}
