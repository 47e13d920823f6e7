//! Bus domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Bus status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusStatus {
    /// In service and assignable to trips
    Active,
    Maintenance,
    Inactive,
    Retired,
}

impl BusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Maintenance => "Maintenance",
            Self::Inactive => "Inactive",
            Self::Retired => "Retired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "Maintenance" => Some(Self::Maintenance),
            "Inactive" => Some(Self::Inactive),
            "Retired" => Some(Self::Retired),
            _ => None,
        }
    }
}

impl std::fmt::Display for BusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fleet vehicle
#[derive(Debug, Clone)]
pub struct Bus {
    pub id: Uuid,
    pub company_id: Uuid,
    /// Unique within the company
    pub registration_number: String,
    pub license_plate: String,
    pub model: String,
    pub manufacturer: Option<String>,
    pub year: i32,
    /// Seats installed; trips may sell at most this many
    pub capacity: i32,
    pub status: BusStatus,
    pub mileage: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Bus {
    /// Only active buses may be assigned to new trips.
    pub fn is_assignable(&self) -> bool {
        self.status == BusStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_active_buses_are_assignable() {
        let mut bus = Bus {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            registration_number: "BUS-001".into(),
            license_plate: "AB 123 CD".into(),
            model: "Sprinter".into(),
            manufacturer: None,
            year: 2021,
            capacity: 40,
            status: BusStatus::Active,
            mileage: 0,
            notes: None,
            created_at: Utc::now(),
        };
        assert!(bus.is_assignable());
        bus.status = BusStatus::Maintenance;
        assert!(!bus.is_assignable());
    }
}
