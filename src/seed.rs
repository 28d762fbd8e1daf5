use anyhow::Result;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password::hash_password;
use crate::model::attendance::AttendanceStatus;
use crate::model::role::Role;
use crate::model::user::Account;
use crate::store;

const ADMIN_EMAIL: &str = "admin@hrms.com";

const DEMO_EMPLOYEES: &[(&str, &str, &str, &str)] = &[
    ("EMP001", "John Doe", "john.doe@company.com", "Engineering"),
    ("EMP002", "Jane Smith", "jane.smith@company.com", "Design"),
    ("EMP003", "Mike Johnson", "mike.johnson@company.com", "Marketing"),
    ("EMP004", "Sarah Williams", "sarah.williams@company.com", "Sales"),
    ("EMP005", "David Brown", "david.brown@company.com", "HR"),
    ("EMP006", "Emily Davis", "emily.davis@company.com", "Finance"),
    ("EMP007", "Robert Miller", "robert.miller@company.com", "Operations"),
    ("EMP008", "Lisa Anderson", "lisa.anderson@company.com", "Engineering"),
];

/// Demo data for a fresh install: an admin account, eight roster entries
/// and the last seven days of attendance, written through the same mark
/// path the API uses. Safe to re-run.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    info!("Seeding demo data");

    let admin = ensure_admin(pool).await?;

    let mut employee_ids = Vec::with_capacity(DEMO_EMPLOYEES.len());
    for (code, name, email, department) in DEMO_EMPLOYEES {
        let row = match store::employees::find_by_code(pool, code).await? {
            Some(existing) => existing,
            None => {
                let created = store::employees::insert(
                    pool,
                    store::employees::NewEmployee {
                        employee_code: code,
                        full_name: name,
                        email,
                        department,
                        created_by: &admin.id,
                    },
                )
                .await?;
                info!(code, name, "Created demo employee");
                created
            }
        };
        employee_ids.push(row.id);
    }

    // Last seven days, roughly 90% present. Deterministic so re-seeding
    // converges on the same ledger.
    let today = Utc::now().date_naive();
    for day in 0..7i64 {
        let date = today - Duration::days(day);
        for (idx, employee_id) in employee_ids.iter().enumerate() {
            let status = if (day as usize + idx) % 10 == 0 {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            };
            store::attendance::mark(pool, employee_id, date, status, &admin.id).await?;
        }
    }

    info!(
        email = ADMIN_EMAIL,
        "Demo data ready; login with the seeded admin account"
    );

    Ok(())
}

async fn ensure_admin(pool: &SqlitePool) -> Result<Account> {
    if let Some(existing) = store::users::find_by_email(pool, ADMIN_EMAIL).await? {
        info!("Admin account already exists");
        return Ok(existing);
    }

    let hashed = hash_password("admin123");
    let account = store::users::insert(
        pool,
        store::users::NewAccount {
            email: ADMIN_EMAIL,
            password_hash: &hashed,
            name: "Admin User",
            role: Role::Administrator.as_str(),
            phone: None,
            department: Some("Management"),
        },
    )
    .await?;

    info!(email = %account.email, "Created admin account");
    Ok(account)
}
