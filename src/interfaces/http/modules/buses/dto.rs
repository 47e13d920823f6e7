//! Bus DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::bus::Bus;

/// Request to register a new bus
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBusRequest {
    #[validate(length(min = 1, max = 50))]
    pub registration_number: String,
    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub manufacturer: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1))]
    pub capacity: i32,
    pub notes: Option<String>,
}

/// Request to update an existing bus
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBusRequest {
    pub license_plate: Option<String>,
    pub manufacturer: Option<String>,
    /// Bus status: Active, Maintenance, Inactive, Retired
    pub status: Option<String>,
    pub mileage: Option<i64>,
    pub notes: Option<String>,
}

/// Bus details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BusDto {
    pub id: Uuid,
    pub registration_number: String,
    pub license_plate: String,
    pub model: String,
    pub manufacturer: Option<String>,
    pub year: i32,
    pub capacity: i32,
    pub status: String,
    pub mileage: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Bus> for BusDto {
    fn from(b: Bus) -> Self {
        Self {
            id: b.id,
            registration_number: b.registration_number,
            license_plate: b.license_plate,
            model: b.model,
            manufacturer: b.manufacturer,
            year: b.year,
            capacity: b.capacity,
            status: b.status.as_str().to_string(),
            mileage: b.mileage,
            notes: b.notes,
            created_at: b.created_at,
        }
    }
}
