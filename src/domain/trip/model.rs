//! Trip domain entity and lifecycle transitions
//!
//! A trip is one scheduled run of a bus along a route. Its status moves
//! through a fixed transition table; every rejected transition leaves
//! the trip untouched. Seat accounting (`capacity`/`booked_seats`) is
//! mutated only by ticket issuance and cancellation, never directly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Trip status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripStatus {
    /// Created, not yet departed
    Scheduled,
    /// Underway
    Active,
    /// Arrived; terminal
    Completed,
    /// Called off; terminal
    Cancelled,
    /// Running late; may still start, finish or be cancelled
    Delayed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Delayed => "Delayed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Scheduled" => Some(Self::Scheduled),
            "Active" => Some(Self::Active),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            "Delayed" => Some(Self::Delayed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of event recorded against a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripEventType {
    Departure,
    Arrival,
    Stop,
    Delay,
    Breakdown,
    Accident,
    Weather,
    Other,
}

impl TripEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Departure => "Departure",
            Self::Arrival => "Arrival",
            Self::Stop => "Stop",
            Self::Delay => "Delay",
            Self::Breakdown => "Breakdown",
            Self::Accident => "Accident",
            Self::Weather => "Weather",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Departure" => Some(Self::Departure),
            "Arrival" => Some(Self::Arrival),
            "Stop" => Some(Self::Stop),
            "Delay" => Some(Self::Delay),
            "Breakdown" => Some(Self::Breakdown),
            "Accident" => Some(Self::Accident),
            "Weather" => Some(Self::Weather),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for TripEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only audit record tied to a trip.
#[derive(Debug, Clone)]
pub struct TripEvent {
    pub id: Uuid,
    pub company_id: Uuid,
    pub trip_id: Uuid,
    pub event_type: TripEventType,
    pub timestamp: DateTime<Utc>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Employee who recorded the event
    pub recorded_by: Option<Uuid>,
    pub description: Option<String>,
}

impl TripEvent {
    pub fn new(
        trip: &Trip,
        event_type: TripEventType,
        timestamp: DateTime<Utc>,
        description: impl Into<String>,
        recorded_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id: trip.company_id,
            trip_id: trip.id,
            event_type,
            timestamp,
            location: None,
            latitude: None,
            longitude: None,
            recorded_by,
            description: Some(description.into()),
        }
    }
}

/// One scheduled run of a bus along a route.
#[derive(Debug, Clone)]
pub struct Trip {
    pub id: Uuid,
    pub company_id: Uuid,
    pub route_id: Uuid,
    pub bus_id: Uuid,
    pub driver_id: Uuid,
    pub conductor_id: Option<Uuid>,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
    pub status: TripStatus,
    /// Seats on sale for this trip
    pub capacity: i32,
    /// Seats currently claimed by live tickets; `0 ≤ booked_seats ≤ capacity`
    pub booked_seats: i32,
    pub base_price: Decimal,
    pub actual_departure: Option<DateTime<Utc>>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub delay_reason: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Whether at least one seat is still available.
    pub fn has_available_seats(&self) -> bool {
        self.booked_seats < self.capacity
    }

    /// Whether tickets may be issued against this trip.
    pub fn accepts_bookings(&self) -> bool {
        !matches!(self.status, TripStatus::Cancelled | TripStatus::Completed)
    }

    /// Scheduled → Active. A delayed trip that has not yet departed may
    /// also start. Emits the Departure event attributed to the driver.
    pub fn start(&mut self, now: DateTime<Utc>) -> DomainResult<TripEvent> {
        let can_start = matches!(self.status, TripStatus::Scheduled)
            || (self.status == TripStatus::Delayed && self.actual_departure.is_none());
        if !can_start {
            return Err(DomainError::invalid_transition(
                "Trip",
                self.status.as_str(),
                TripStatus::Active.as_str(),
            ));
        }
        self.status = TripStatus::Active;
        self.actual_departure = Some(now);
        Ok(TripEvent::new(
            self,
            TripEventType::Departure,
            now,
            "Trip started",
            Some(self.driver_id),
        ))
    }

    /// Active → Completed. A trip delayed mid-journey may also complete.
    /// Emits the Arrival event.
    pub fn complete(&mut self, now: DateTime<Utc>) -> DomainResult<TripEvent> {
        let can_complete = matches!(self.status, TripStatus::Active)
            || (self.status == TripStatus::Delayed && self.actual_departure.is_some());
        if !can_complete {
            return Err(DomainError::invalid_transition(
                "Trip",
                self.status.as_str(),
                TripStatus::Completed.as_str(),
            ));
        }
        self.status = TripStatus::Completed;
        self.actual_arrival = Some(now);
        Ok(TripEvent::new(
            self,
            TripEventType::Arrival,
            now,
            "Trip completed",
            Some(self.driver_id),
        ))
    }

    /// Scheduled/Delayed → Cancelled. Requires a reason. Tickets already
    /// sold are left alone; staff cancel them individually.
    pub fn cancel(&mut self, reason: &str) -> DomainResult<()> {
        if reason.trim().is_empty() {
            return Err(DomainError::validation(
                "reason",
                "Cancellation reason is required",
            ));
        }
        if !matches!(self.status, TripStatus::Scheduled | TripStatus::Delayed) {
            return Err(DomainError::invalid_transition(
                "Trip",
                self.status.as_str(),
                TripStatus::Cancelled.as_str(),
            ));
        }
        self.status = TripStatus::Cancelled;
        self.cancellation_reason = Some(reason.to_string());
        Ok(())
    }

    /// Scheduled/Active → Delayed. Requires a reason; emits the Delay
    /// event.
    pub fn delay(&mut self, reason: &str, now: DateTime<Utc>) -> DomainResult<TripEvent> {
        if reason.trim().is_empty() {
            return Err(DomainError::validation("reason", "Delay reason is required"));
        }
        if !matches!(self.status, TripStatus::Scheduled | TripStatus::Active) {
            return Err(DomainError::invalid_transition(
                "Trip",
                self.status.as_str(),
                TripStatus::Delayed.as_str(),
            ));
        }
        self.status = TripStatus::Delayed;
        self.delay_reason = Some(reason.to_string());
        Ok(TripEvent::new(
            self,
            TripEventType::Delay,
            now,
            reason,
            Some(self.driver_id),
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> Trip {
        Trip {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            route_id: Uuid::new_v4(),
            bus_id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            conductor_id: None,
            scheduled_departure: Utc::now(),
            scheduled_arrival: Utc::now() + chrono::Duration::hours(3),
            status: TripStatus::Scheduled,
            capacity: 40,
            booked_seats: 0,
            base_price: Decimal::new(2550, 2),
            actual_departure: None,
            actual_arrival: None,
            delay_reason: None,
            cancellation_reason: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn scheduled_trip_starts_and_emits_departure() {
        let mut trip = sample_trip();
        let event = trip.start(Utc::now()).unwrap();
        assert_eq!(trip.status, TripStatus::Active);
        assert!(trip.actual_departure.is_some());
        assert_eq!(event.event_type, TripEventType::Departure);
        assert_eq!(event.recorded_by, Some(trip.driver_id));
        assert_eq!(event.trip_id, trip.id);
    }

    #[test]
    fn active_trip_completes_and_emits_arrival() {
        let mut trip = sample_trip();
        trip.start(Utc::now()).unwrap();
        let event = trip.complete(Utc::now()).unwrap();
        assert_eq!(trip.status, TripStatus::Completed);
        assert!(trip.actual_arrival.is_some());
        assert_eq!(event.event_type, TripEventType::Arrival);
    }

    #[test]
    fn start_on_completed_trip_fails_and_leaves_status() {
        let mut trip = sample_trip();
        trip.start(Utc::now()).unwrap();
        trip.complete(Utc::now()).unwrap();
        let err = trip.start(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(trip.status, TripStatus::Completed);
    }

    #[test]
    fn complete_requires_departure() {
        let mut trip = sample_trip();
        assert!(trip.complete(Utc::now()).is_err());
        assert_eq!(trip.status, TripStatus::Scheduled);
    }

    #[test]
    fn cancel_requires_reason() {
        let mut trip = sample_trip();
        assert!(trip.cancel("").is_err());
        assert!(trip.cancel("   ").is_err());
        assert_eq!(trip.status, TripStatus::Scheduled);
        trip.cancel("mechanical failure").unwrap();
        assert_eq!(trip.status, TripStatus::Cancelled);
        assert_eq!(trip.cancellation_reason.as_deref(), Some("mechanical failure"));
    }

    #[test]
    fn active_trip_cannot_be_cancelled() {
        let mut trip = sample_trip();
        trip.start(Utc::now()).unwrap();
        assert!(trip.cancel("too late").is_err());
        assert_eq!(trip.status, TripStatus::Active);
    }

    #[test]
    fn delayed_trip_can_be_cancelled() {
        let mut trip = sample_trip();
        trip.delay("road closed", Utc::now()).unwrap();
        trip.cancel("road still closed").unwrap();
        assert_eq!(trip.status, TripStatus::Cancelled);
    }

    #[test]
    fn delay_emits_event_with_reason() {
        let mut trip = sample_trip();
        let event = trip.delay("heavy traffic", Utc::now()).unwrap();
        assert_eq!(trip.status, TripStatus::Delayed);
        assert_eq!(trip.delay_reason.as_deref(), Some("heavy traffic"));
        assert_eq!(event.event_type, TripEventType::Delay);
        assert_eq!(event.description.as_deref(), Some("heavy traffic"));
    }

    #[test]
    fn delayed_trip_without_departure_can_start() {
        let mut trip = sample_trip();
        trip.delay("late crew", Utc::now()).unwrap();
        trip.start(Utc::now()).unwrap();
        assert_eq!(trip.status, TripStatus::Active);
    }

    #[test]
    fn delayed_trip_mid_journey_can_complete() {
        let mut trip = sample_trip();
        trip.start(Utc::now()).unwrap();
        trip.delay("breakdown cleared", Utc::now()).unwrap();
        trip.complete(Utc::now()).unwrap();
        assert_eq!(trip.status, TripStatus::Completed);
    }

    #[test]
    fn booking_guards() {
        let mut trip = sample_trip();
        assert!(trip.accepts_bookings());
        assert!(trip.has_available_seats());
        trip.booked_seats = trip.capacity;
        assert!(!trip.has_available_seats());
        trip.cancel("no demand").unwrap();
        assert!(!trip.accepts_bookings());
    }

    #[test]
    fn status_roundtrip() {
        for status in &[
            TripStatus::Scheduled,
            TripStatus::Active,
            TripStatus::Completed,
            TripStatus::Cancelled,
            TripStatus::Delayed,
        ] {
            assert_eq!(TripStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(TripStatus::parse("Nope"), None);
    }
}
