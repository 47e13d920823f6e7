//! SeaORM implementation of TripRepository and TripEventRepository
//!
//! Status transitions that emit an audit event are persisted inside a
//! single transaction so the trip row and its event row land together
//! or not at all.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::trip::{
    Trip, TripEvent, TripEventRepository, TripEventType, TripFilter, TripRepository, TripStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{trip, trip_event};

use super::{corrupt_status, db_err};

pub struct SeaOrmTripRepository {
    db: DatabaseConnection,
}

impl SeaOrmTripRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: trip::Model) -> DomainResult<Trip> {
    Ok(Trip {
        id: m.id,
        company_id: m.company_id,
        status: TripStatus::parse(&m.status).ok_or_else(|| corrupt_status("Trip", &m.status))?,
        route_id: m.route_id,
        bus_id: m.bus_id,
        driver_id: m.driver_id,
        conductor_id: m.conductor_id,
        scheduled_departure: m.scheduled_departure,
        scheduled_arrival: m.scheduled_arrival,
        capacity: m.capacity,
        booked_seats: m.booked_seats,
        base_price: m.base_price,
        actual_departure: m.actual_departure,
        actual_arrival: m.actual_arrival,
        delay_reason: m.delay_reason,
        cancellation_reason: m.cancellation_reason,
        created_at: m.created_at,
    })
}

fn to_active(t: Trip) -> trip::ActiveModel {
    trip::ActiveModel {
        id: Set(t.id),
        company_id: Set(t.company_id),
        route_id: Set(t.route_id),
        bus_id: Set(t.bus_id),
        driver_id: Set(t.driver_id),
        conductor_id: Set(t.conductor_id),
        scheduled_departure: Set(t.scheduled_departure),
        scheduled_arrival: Set(t.scheduled_arrival),
        status: Set(t.status.as_str().to_string()),
        capacity: Set(t.capacity),
        booked_seats: Set(t.booked_seats),
        base_price: Set(t.base_price),
        actual_departure: Set(t.actual_departure),
        actual_arrival: Set(t.actual_arrival),
        delay_reason: Set(t.delay_reason),
        cancellation_reason: Set(t.cancellation_reason),
        created_at: Set(t.created_at),
    }
}

fn event_to_active(e: TripEvent) -> trip_event::ActiveModel {
    trip_event::ActiveModel {
        id: Set(e.id),
        company_id: Set(e.company_id),
        trip_id: Set(e.trip_id),
        event_type: Set(e.event_type.as_str().to_string()),
        timestamp: Set(e.timestamp),
        location: Set(e.location),
        latitude: Set(e.latitude),
        longitude: Set(e.longitude),
        recorded_by: Set(e.recorded_by),
        description: Set(e.description),
    }
}

fn event_to_domain(m: trip_event::Model) -> DomainResult<TripEvent> {
    Ok(TripEvent {
        id: m.id,
        company_id: m.company_id,
        trip_id: m.trip_id,
        event_type: TripEventType::parse(&m.event_type)
            .ok_or_else(|| corrupt_status("TripEvent", &m.event_type))?,
        timestamp: m.timestamp,
        location: m.location,
        latitude: m.latitude,
        longitude: m.longitude,
        recorded_by: m.recorded_by,
        description: m.description,
    })
}

// ── TripRepository impl ─────────────────────────────────────────

#[async_trait]
impl TripRepository for SeaOrmTripRepository {
    async fn save(&self, t: Trip) -> DomainResult<()> {
        debug!(trip_id = %t.id, "Saving trip");
        to_active(t).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Trip>> {
        let model = trip::Entity::find_by_id(id)
            .filter(trip::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list(&self, company_id: Uuid, filter: TripFilter) -> DomainResult<Vec<Trip>> {
        let mut query = trip::Entity::find().filter(trip::Column::CompanyId.eq(company_id));
        if let Some(status) = filter.status {
            query = query.filter(trip::Column::Status.eq(status.as_str()));
        }
        if let Some(route_id) = filter.route_id {
            query = query.filter(trip::Column::RouteId.eq(route_id));
        }
        if let Some(bus_id) = filter.bus_id {
            query = query.filter(trip::Column::BusId.eq(bus_id));
        }
        if let Some(from) = filter.departing_from {
            query = query.filter(trip::Column::ScheduledDeparture.gte(from));
        }
        if let Some(until) = filter.departing_until {
            query = query.filter(trip::Column::ScheduledDeparture.lt(until));
        }
        let models = query
            .order_by_desc(trip::Column::ScheduledDeparture)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, t: Trip) -> DomainResult<()> {
        let exists = trip::Entity::find_by_id(t.id)
            .filter(trip::Column::CompanyId.eq(t.company_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Trip", t.id));
        }
        to_active(t).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update_with_event(&self, t: Trip, event: TripEvent) -> DomainResult<()> {
        debug!(trip_id = %t.id, event = %event.event_type, "Updating trip with event");
        let txn = self.db.begin().await.map_err(db_err)?;
        to_active(t).update(&txn).await.map_err(db_err)?;
        event_to_active(event).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}

// ── TripEventRepository impl ────────────────────────────────────

pub struct SeaOrmTripEventRepository {
    db: DatabaseConnection,
}

impl SeaOrmTripEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TripEventRepository for SeaOrmTripEventRepository {
    async fn save(&self, event: TripEvent) -> DomainResult<()> {
        event_to_active(event)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn list_for_trip(
        &self,
        company_id: Uuid,
        trip_id: Uuid,
    ) -> DomainResult<Vec<TripEvent>> {
        let models = trip_event::Entity::find()
            .filter(trip_event::Column::CompanyId.eq(company_id))
            .filter(trip_event::Column::TripId.eq(trip_id))
            .order_by_desc(trip_event::Column::Timestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(event_to_domain).collect()
    }
}
