//! Employee domain entity

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Employee role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeRole {
    Driver,
    Conductor,
    Mechanic,
    Manager,
    Admin,
    Other,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Driver => "Driver",
            Self::Conductor => "Conductor",
            Self::Mechanic => "Mechanic",
            Self::Manager => "Manager",
            Self::Admin => "Admin",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Driver" => Some(Self::Driver),
            "Conductor" => Some(Self::Conductor),
            "Mechanic" => Some(Self::Mechanic),
            "Manager" => Some(Self::Manager),
            "Admin" => Some(Self::Admin),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employee status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Inactive,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Inactive => "Inactive",
            Self::Terminated => "Terminated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "On Leave" => Some(Self::OnLeave),
            "Inactive" => Some(Self::Inactive),
            "Terminated" => Some(Self::Terminated),
            _ => None,
        }
    }
}

/// Company employee; drivers and conductors are assigned to trips.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
    pub hire_date: NaiveDate,
    /// Driving licence number, present for drivers
    pub license_number: Option<String>,
    pub license_expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_driver(&self) -> bool {
        self.role == EmployeeRole::Driver
    }

    pub fn is_conductor(&self) -> bool {
        self.role == EmployeeRole::Conductor
    }
}
