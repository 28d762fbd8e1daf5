use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Fixed department names. Stored as TEXT under the variant name.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
pub enum Department {
    Engineering,
    Design,
    Marketing,
    Sales,
    HR,
    Finance,
    Operations,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: String,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    /// Weak reference; nulled when the creating account is removed.
    pub created_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn department_round_trips_as_text() {
        for dept in [
            Department::Engineering,
            Department::Design,
            Department::Marketing,
            Department::Sales,
            Department::HR,
            Department::Finance,
            Department::Operations,
        ] {
            assert_eq!(Department::from_str(dept.as_ref()), Ok(dept));
        }
        assert!(Department::from_str("Legal").is_err());
    }

    #[test]
    fn department_serializes_to_display_name() {
        assert_eq!(
            serde_json::to_string(&Department::HR).unwrap(),
            "\"HR\""
        );
    }
}
