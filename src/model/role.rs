use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "HR Manager")]
    HrManager,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::HrManager => "HR Manager",
            Role::Administrator => "Administrator",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HR Manager" => Some(Role::HrManager),
            "Administrator" => Some(Role::Administrator),
            _ => None,
        }
    }

    /// Only administrators may change the role on an account.
    pub fn can_assign_roles(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_display_names() {
        for role in [Role::HrManager, Role::Administrator] {
            assert_eq!(Role::from_name(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_name("Superuser"), None);
    }

    #[test]
    fn only_admin_assigns_roles() {
        assert!(Role::Administrator.can_assign_roles());
        assert!(!Role::HrManager.can_assign_roles());
    }
}
