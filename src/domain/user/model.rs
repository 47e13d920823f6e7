//! User domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
    Driver,
    Conductor,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Staff => "Staff",
            Self::Driver => "Driver",
            Self::Conductor => "Conductor",
            Self::Customer => "Customer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Self::Admin),
            "Manager" => Some(Self::Manager),
            "Staff" => Some(Self::Staff),
            "Driver" => Some(Self::Driver),
            "Conductor" => Some(Self::Conductor),
            "Customer" => Some(Self::Customer),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account registered with the external identity provider.
///
/// The service never stores credentials; users exist here so tickets
/// and bookings can reference a customer and so tenant-ownership of
/// that reference can be checked.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// Employee record linked to this account, if any
    pub employee_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in &[
            UserRole::Admin,
            UserRole::Manager,
            UserRole::Staff,
            UserRole::Driver,
            UserRole::Conductor,
            UserRole::Customer,
        ] {
            assert_eq!(UserRole::parse(role.as_str()), Some(*role));
        }
    }

    #[test]
    fn unknown_role_rejected() {
        assert_eq!(UserRole::parse("Superuser"), None);
    }
}
