//! Route DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::route::Route;

/// Request to create a route
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub origin: String,
    #[validate(length(min = 1, max = 100))]
    pub destination: String,
    pub distance_km: Option<f64>,
    /// Scheduled duration in minutes
    #[validate(range(min = 1))]
    pub estimated_duration: Option<i32>,
}

/// Request to update a route
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRouteRequest {
    pub name: Option<String>,
    pub distance_km: Option<f64>,
    pub estimated_duration: Option<i32>,
    pub is_active: Option<bool>,
}

/// Route details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteDto {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: Option<f64>,
    pub estimated_duration: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Route> for RouteDto {
    fn from(r: Route) -> Self {
        Self {
            id: r.id,
            name: r.name,
            origin: r.origin,
            destination: r.destination,
            distance_km: r.distance_km,
            estimated_duration: r.estimated_duration,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}
