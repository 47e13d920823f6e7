//! Trip lifecycle service
//!
//! Creation runs the four-way validation (driver role, conductor role,
//! bus status, schedule ordering) plus the tenant guard over every
//! referenced entity; any failure rejects the whole trip. Transitions
//! delegate to the domain state machine and persist the status change
//! together with its audit event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::trip::{Trip, TripEvent, TripEventType, TripFilter, TripStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, TenantContext};

/// Input for a manually recorded trip event.
#[derive(Debug, Clone)]
pub struct NewTripEvent {
    pub event_type: TripEventType,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    /// Employee recording the event
    pub recorded_by: Option<Uuid>,
}

/// Input for trip creation.
#[derive(Debug, Clone)]
pub struct NewTrip {
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub driver_id: Uuid,
    pub conductor_id: Option<Uuid>,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
    pub capacity: i32,
    pub base_price: Decimal,
}

pub struct TripService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TripService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a trip after validating every referenced entity.
    pub async fn create(&self, ctx: &TenantContext, input: NewTrip) -> DomainResult<Trip> {
        let route = self
            .repos
            .routes()
            .find_by_id(ctx.company_id, input.route_id)
            .await?
            .ok_or_else(|| DomainError::validation("route", "Route does not belong to your company"))?;

        let bus = self
            .repos
            .buses()
            .find_by_id(ctx.company_id, input.bus_id)
            .await?
            .ok_or_else(|| DomainError::validation("bus", "Bus does not belong to your company"))?;

        let driver = self
            .repos
            .employees()
            .find_by_id(ctx.company_id, input.driver_id)
            .await?
            .ok_or_else(|| {
                DomainError::validation("driver", "Driver does not belong to your company")
            })?;

        if !bus.is_assignable() {
            return Err(DomainError::validation(
                "bus",
                format!("Bus is not active (current status: {})", bus.status),
            ));
        }

        if !driver.is_driver() {
            return Err(DomainError::validation(
                "driver",
                "Selected employee is not a driver",
            ));
        }

        if let Some(conductor_id) = input.conductor_id {
            let conductor = self
                .repos
                .employees()
                .find_by_id(ctx.company_id, conductor_id)
                .await?
                .ok_or_else(|| {
                    DomainError::validation(
                        "conductor",
                        "Conductor does not belong to your company",
                    )
                })?;
            if !conductor.is_conductor() {
                return Err(DomainError::validation(
                    "conductor",
                    "Selected employee is not a conductor",
                ));
            }
        }

        if input.capacity <= 0 {
            return Err(DomainError::validation(
                "capacity",
                "Capacity must be greater than 0",
            ));
        }

        if input.scheduled_departure >= input.scheduled_arrival {
            return Err(DomainError::validation(
                "scheduled_departure",
                "Departure must be before arrival",
            ));
        }

        let trip = Trip {
            id: Uuid::new_v4(),
            company_id: ctx.company_id,
            route_id: route.id,
            bus_id: bus.id,
            driver_id: driver.id,
            conductor_id: input.conductor_id,
            scheduled_departure: input.scheduled_departure,
            scheduled_arrival: input.scheduled_arrival,
            status: TripStatus::Scheduled,
            capacity: input.capacity,
            booked_seats: 0,
            base_price: input.base_price,
            actual_departure: None,
            actual_arrival: None,
            delay_reason: None,
            cancellation_reason: None,
            created_at: Utc::now(),
        };

        self.repos.trips().save(trip.clone()).await?;
        info!(trip_id = %trip.id, route = %route.name, "Trip created");
        Ok(trip)
    }

    pub async fn get(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Trip> {
        self.repos
            .trips()
            .find_by_id(ctx.company_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Trip", id))
    }

    pub async fn list(&self, ctx: &TenantContext, filter: TripFilter) -> DomainResult<Vec<Trip>> {
        self.repos.trips().list(ctx.company_id, filter).await
    }

    /// Trips departing today (UTC day window).
    pub async fn today(&self, ctx: &TenantContext) -> DomainResult<Vec<Trip>> {
        let (from, until) = today_window(Utc::now());
        self.repos
            .trips()
            .list(
                ctx.company_id,
                TripFilter {
                    departing_from: Some(from),
                    departing_until: Some(until),
                    ..Default::default()
                },
            )
            .await
    }

    /// Scheduled or delayed trips departing from now on.
    pub async fn upcoming(&self, ctx: &TenantContext) -> DomainResult<Vec<Trip>> {
        let now = Utc::now();
        let mut trips = self
            .repos
            .trips()
            .list(
                ctx.company_id,
                TripFilter {
                    departing_from: Some(now),
                    ..Default::default()
                },
            )
            .await?;
        trips.retain(|t| matches!(t.status, TripStatus::Scheduled | TripStatus::Delayed));
        Ok(trips)
    }

    pub async fn active(&self, ctx: &TenantContext) -> DomainResult<Vec<Trip>> {
        self.repos
            .trips()
            .list(
                ctx.company_id,
                TripFilter {
                    status: Some(TripStatus::Active),
                    ..Default::default()
                },
            )
            .await
    }

    pub async fn events(&self, ctx: &TenantContext, trip_id: Uuid) -> DomainResult<Vec<TripEvent>> {
        // 404 for a cross-tenant or missing trip rather than an empty list
        self.get(ctx, trip_id).await?;
        self.repos
            .trip_events()
            .list_for_trip(ctx.company_id, trip_id)
            .await
    }

    /// Record an ad-hoc event against a trip (breakdown, weather, a
    /// stop along the way).
    pub async fn record_event(
        &self,
        ctx: &TenantContext,
        trip_id: Uuid,
        input: NewTripEvent,
    ) -> DomainResult<TripEvent> {
        let trip = self.get(ctx, trip_id).await?;

        if let Some(employee_id) = input.recorded_by {
            self.repos
                .employees()
                .find_by_id(ctx.company_id, employee_id)
                .await?
                .ok_or_else(|| {
                    DomainError::validation(
                        "recorded_by",
                        "Recorder does not belong to your company",
                    )
                })?;
        }

        let mut event = TripEvent::new(&trip, input.event_type, Utc::now(), "", input.recorded_by);
        event.description = input.description;
        event.location = input.location;
        event.latitude = input.latitude;
        event.longitude = input.longitude;

        self.repos.trip_events().save(event.clone()).await?;
        Ok(event)
    }

    /// Start the trip, recording the departure event.
    pub async fn start(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Trip> {
        let mut trip = self.get(ctx, id).await?;
        let event = trip.start(Utc::now())?;
        self.repos
            .trips()
            .update_with_event(trip.clone(), event)
            .await?;
        info!(trip_id = %trip.id, "Trip started");
        Ok(trip)
    }

    /// Complete the trip, recording the arrival event.
    pub async fn complete(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Trip> {
        let mut trip = self.get(ctx, id).await?;
        let event = trip.complete(Utc::now())?;
        self.repos
            .trips()
            .update_with_event(trip.clone(), event)
            .await?;
        info!(trip_id = %trip.id, "Trip completed");
        Ok(trip)
    }

    /// Cancel the trip. Tickets already issued are untouched.
    pub async fn cancel(&self, ctx: &TenantContext, id: Uuid, reason: &str) -> DomainResult<Trip> {
        let mut trip = self.get(ctx, id).await?;
        trip.cancel(reason)?;
        self.repos.trips().update(trip.clone()).await?;
        info!(trip_id = %trip.id, reason, "Trip cancelled");
        Ok(trip)
    }

    /// Mark the trip delayed, recording the delay event.
    pub async fn delay(&self, ctx: &TenantContext, id: Uuid, reason: &str) -> DomainResult<Trip> {
        let mut trip = self.get(ctx, id).await?;
        let event = trip.delay(reason, Utc::now())?;
        self.repos
            .trips()
            .update_with_event(trip.clone(), event)
            .await?;
        info!(trip_id = %trip.id, reason, "Trip delayed");
        Ok(trip)
    }
}

/// UTC day bounds containing `now`.
fn today_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();
    (start, start + chrono::Duration::days(1))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::*;
    use crate::domain::trip::TripEventType;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    async fn service_with_fixtures() -> (TripService, TenantContext, Fixtures) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let fixtures = seed_company(repos.as_ref()).await;
        let ctx = fixtures.staff_context();
        (TripService::new(repos), ctx, fixtures)
    }

    fn new_trip_input(f: &Fixtures) -> NewTrip {
        NewTrip {
            route_id: f.route_id,
            bus_id: f.bus_id,
            driver_id: f.driver_id,
            conductor_id: None,
            scheduled_departure: Utc::now() + chrono::Duration::hours(1),
            scheduled_arrival: Utc::now() + chrono::Duration::hours(4),
            capacity: 40,
            base_price: Decimal::new(2500, 2),
        }
    }

    #[tokio::test]
    async fn create_validates_and_persists() {
        let (service, ctx, f) = service_with_fixtures().await;
        let trip = service.create(&ctx, new_trip_input(&f)).await.unwrap();
        assert_eq!(trip.status, TripStatus::Scheduled);
        assert_eq!(trip.booked_seats, 0);
        assert_eq!(service.get(&ctx, trip.id).await.unwrap().id, trip.id);
    }

    #[tokio::test]
    async fn create_rejects_non_driver() {
        let (service, ctx, f) = service_with_fixtures().await;
        let mut input = new_trip_input(&f);
        input.driver_id = f.conductor_id; // a conductor, not a driver
        let err = service.create(&ctx, input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "driver", .. }));
    }

    #[tokio::test]
    async fn create_rejects_conductor_with_wrong_role() {
        let (service, ctx, f) = service_with_fixtures().await;
        let mut input = new_trip_input(&f);
        input.conductor_id = Some(f.driver_id); // a driver, not a conductor
        let err = service.create(&ctx, input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "conductor", .. }));
    }

    #[tokio::test]
    async fn create_rejects_inactive_bus() {
        let (service, ctx, f) = service_with_fixtures().await;
        let mut input = new_trip_input(&f);
        input.bus_id = f.maintenance_bus_id;
        let err = service.create(&ctx, input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "bus", .. }));
    }

    #[tokio::test]
    async fn create_rejects_zero_capacity() {
        let (service, ctx, f) = service_with_fixtures().await;
        let mut input = new_trip_input(&f);
        input.capacity = 0;
        let err = service.create(&ctx, input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "capacity", .. }));
    }

    #[tokio::test]
    async fn create_rejects_departure_after_arrival() {
        let (service, ctx, f) = service_with_fixtures().await;
        let mut input = new_trip_input(&f);
        input.scheduled_arrival = input.scheduled_departure - chrono::Duration::hours(1);
        let err = service.create(&ctx, input).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "scheduled_departure", .. }
        ));
    }

    #[tokio::test]
    async fn create_rejects_cross_tenant_route() {
        let (service, ctx, f) = service_with_fixtures().await;
        let mut input = new_trip_input(&f);
        input.route_id = Uuid::new_v4(); // unknown to this tenant
        let err = service.create(&ctx, input).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "route", .. }));
    }

    #[tokio::test]
    async fn full_lifecycle_emits_events() {
        let (service, ctx, f) = service_with_fixtures().await;
        let trip = service.create(&ctx, new_trip_input(&f)).await.unwrap();

        let trip = service.start(&ctx, trip.id).await.unwrap();
        assert_eq!(trip.status, TripStatus::Active);

        let trip = service.complete(&ctx, trip.id).await.unwrap();
        assert_eq!(trip.status, TripStatus::Completed);

        let events = service.events(&ctx, trip.id).await.unwrap();
        let kinds: Vec<_> = events.iter().map(|e| e.event_type).collect();
        assert!(kinds.contains(&TripEventType::Departure));
        assert!(kinds.contains(&TripEventType::Arrival));

        // terminal: starting again fails
        let err = service.start(&ctx, trip.id).await.unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn delay_then_cancel() {
        let (service, ctx, f) = service_with_fixtures().await;
        let trip = service.create(&ctx, new_trip_input(&f)).await.unwrap();

        let trip = service.delay(&ctx, trip.id, "fog").await.unwrap();
        assert_eq!(trip.status, TripStatus::Delayed);

        let trip = service.cancel(&ctx, trip.id, "fog persisted").await.unwrap();
        assert_eq!(trip.status, TripStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancel_requires_reason() {
        let (service, ctx, f) = service_with_fixtures().await;
        let trip = service.create(&ctx, new_trip_input(&f)).await.unwrap();
        let err = service.cancel(&ctx, trip.id, "  ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "reason", .. }));
    }

    #[tokio::test]
    async fn ad_hoc_event_recorded_with_employee_check() {
        let (service, ctx, f) = service_with_fixtures().await;
        let trip = service.create(&ctx, new_trip_input(&f)).await.unwrap();

        let event = service
            .record_event(
                &ctx,
                trip.id,
                NewTripEvent {
                    event_type: TripEventType::Breakdown,
                    location: Some("Highway 7".into()),
                    latitude: None,
                    longitude: None,
                    description: Some("engine overheated".into()),
                    recorded_by: Some(f.driver_id),
                },
            )
            .await
            .unwrap();
        assert_eq!(event.event_type, TripEventType::Breakdown);
        assert_eq!(event.recorded_by, Some(f.driver_id));

        // unknown recorder rejected
        let err = service
            .record_event(
                &ctx,
                trip.id,
                NewTripEvent {
                    event_type: TripEventType::Other,
                    location: None,
                    latitude: None,
                    longitude: None,
                    description: None,
                    recorded_by: Some(Uuid::new_v4()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "recorded_by", .. }));
    }

    #[tokio::test]
    async fn cross_tenant_get_is_not_found() {
        let (service, ctx, f) = service_with_fixtures().await;
        let trip = service.create(&ctx, new_trip_input(&f)).await.unwrap();
        let foreign = f.other_company_context();
        let err = service.get(&foreign, trip.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
