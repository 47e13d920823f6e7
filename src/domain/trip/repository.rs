//! Trip repository interfaces

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{Trip, TripEvent, TripStatus};
use crate::domain::DomainResult;

/// Filter for trip listings.
#[derive(Debug, Default, Clone)]
pub struct TripFilter {
    pub status: Option<TripStatus>,
    pub route_id: Option<Uuid>,
    pub bus_id: Option<Uuid>,
    /// Scheduled departure on or after
    pub departing_from: Option<DateTime<Utc>>,
    /// Scheduled departure strictly before
    pub departing_until: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn save(&self, trip: Trip) -> DomainResult<()>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Trip>>;
    async fn list(&self, company_id: Uuid, filter: TripFilter) -> DomainResult<Vec<Trip>>;
    async fn update(&self, trip: Trip) -> DomainResult<()>;

    /// Persist a status transition together with its audit event as one
    /// atomic unit: either both rows land or neither does.
    async fn update_with_event(&self, trip: Trip, event: TripEvent) -> DomainResult<()>;
}

#[async_trait]
pub trait TripEventRepository: Send + Sync {
    async fn save(&self, event: TripEvent) -> DomainResult<()>;
    async fn list_for_trip(&self, company_id: Uuid, trip_id: Uuid)
        -> DomainResult<Vec<TripEvent>>;
}
