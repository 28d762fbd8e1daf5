use chrono::Utc;
use sqlx::{QueryBuilder, SqlitePool};
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::user::Account;
use crate::models::UpdateProfileRequest;
use crate::store::unique_violation;

pub struct NewAccount<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub role: &'a str,
    pub phone: Option<&'a str>,
    pub department: Option<&'a str>,
}

/// Duplicate email surfaces as a 400 naming the field; the UNIQUE
/// constraint is the source of truth, not a prior existence check.
pub async fn insert(pool: &SqlitePool, new: NewAccount<'_>) -> Result<Account, ApiError> {
    let id = Uuid::new_v4().to_string();
    let joined_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (id, email, password_hash, name, role, phone, department, is_active, joined_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)
        "#,
    )
    .bind(&id)
    .bind(new.email)
    .bind(new.password_hash)
    .bind(new.name)
    .bind(new.role)
    .bind(new.phone)
    .bind(new.department)
    .bind(joined_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(Account {
            id,
            email: new.email.to_owned(),
            password_hash: new.password_hash.to_owned(),
            name: new.name.to_owned(),
            role: new.role.to_owned(),
            phone: new.phone.map(str::to_owned),
            department: new.department.map(str::to_owned),
            is_active: true,
            joined_at,
        }),
        Err(e) if unique_violation(&e).is_some() => {
            Err(ApiError::field("email", "Email already registered"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>, ApiError> {
    sqlx::query_as::<_, Account>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Account>, ApiError> {
    sqlx::query_as::<_, Account>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
}

/// Partial profile update; untouched fields keep their values.
pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    fields: &UpdateProfileRequest,
) -> Result<Account, ApiError> {
    let mut qb = QueryBuilder::new("UPDATE users SET ");
    let mut touched = false;

    {
        let mut set = qb.separated(", ");
        if let Some(name) = &fields.name {
            set.push("name = ").push_bind_unseparated(name.clone());
            touched = true;
        }
        if let Some(email) = &fields.email {
            set.push("email = ")
                .push_bind_unseparated(email.to_lowercase());
            touched = true;
        }
        if let Some(phone) = &fields.phone {
            set.push("phone = ").push_bind_unseparated(phone.clone());
            touched = true;
        }
        if let Some(department) = &fields.department {
            set.push("department = ")
                .push_bind_unseparated(department.clone());
            touched = true;
        }
        if let Some(role) = &fields.role {
            set.push("role = ").push_bind_unseparated(role.clone());
            touched = true;
        }
    }

    if !touched {
        return Err(ApiError::validation("No fields provided for update"));
    }

    qb.push(" WHERE id = ");
    qb.push_bind(id);

    match qb.build().execute(pool).await {
        Ok(r) if r.rows_affected() == 0 => Err(ApiError::NotFound("Account")),
        Ok(_) => find_by_id(pool, id)
            .await?
            .ok_or(ApiError::NotFound("Account")),
        Err(e) if unique_violation(&e).is_some() => {
            Err(ApiError::field("email", "Email already registered"))
        }
        Err(e) => Err(e.into()),
    }
}
