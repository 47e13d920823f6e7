//! Trip DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::trip::{Trip, TripEvent};

/// Request to schedule a trip
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTripRequest {
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub driver_id: Uuid,
    pub conductor_id: Option<Uuid>,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
    #[validate(range(min = 1))]
    pub capacity: i32,
    pub base_price: Decimal,
}

/// Reason body for cancel/delay transitions
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReasonRequest {
    #[validate(length(min = 1, message = "reason is required"))]
    pub reason: String,
}

/// Trip details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct TripDto {
    pub id: Uuid,
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub driver_id: Uuid,
    pub conductor_id: Option<Uuid>,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
    pub status: String,
    pub capacity: i32,
    pub booked_seats: i32,
    pub available_seats: i32,
    pub base_price: Decimal,
    pub actual_departure: Option<DateTime<Utc>>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub delay_reason: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Trip> for TripDto {
    fn from(t: Trip) -> Self {
        Self {
            id: t.id,
            route_id: t.route_id,
            bus_id: t.bus_id,
            driver_id: t.driver_id,
            conductor_id: t.conductor_id,
            scheduled_departure: t.scheduled_departure,
            scheduled_arrival: t.scheduled_arrival,
            status: t.status.as_str().to_string(),
            capacity: t.capacity,
            booked_seats: t.booked_seats,
            available_seats: t.capacity - t.booked_seats,
            base_price: t.base_price,
            actual_departure: t.actual_departure,
            actual_arrival: t.actual_arrival,
            delay_reason: t.delay_reason,
            cancellation_reason: t.cancellation_reason,
            created_at: t.created_at,
        }
    }
}

/// Request to record an ad-hoc trip event
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTripEventRequest {
    /// Event type: Departure, Arrival, Stop, Delay, Breakdown,
    /// Accident, Weather, Other
    pub event_type: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    /// Employee recording the event
    pub recorded_by: Option<Uuid>,
}

/// Trip event details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct TripEventDto {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub recorded_by: Option<Uuid>,
    pub description: Option<String>,
}

impl From<TripEvent> for TripEventDto {
    fn from(e: TripEvent) -> Self {
        Self {
            id: e.id,
            trip_id: e.trip_id,
            event_type: e.event_type.as_str().to_string(),
            timestamp: e.timestamp,
            location: e.location,
            latitude: e.latitude,
            longitude: e.longitude,
            recorded_by: e.recorded_by,
            description: e.description,
        }
    }
}
