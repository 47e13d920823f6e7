//! In-memory repository provider for development and testing
//!
//! Mirrors the transactional guarantees of the SeaORM implementation
//! closely enough for service-level tests: seat claims go through the
//! trip entry under its map lock, reference collisions surface as
//! `Conflict`, and booking creation checks every ticket before
//! mutating any.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingRepository, Receipt, ReceiptRepository};
use crate::domain::bus::{Bus, BusRepository};
use crate::domain::discount::{Discount, DiscountRepository};
use crate::domain::employee::{Employee, EmployeeRepository};
use crate::domain::route::{Route, RouteRepository};
use crate::domain::ticket::{Ticket, TicketFilter, TicketRepository, TicketStatus};
use crate::domain::trip::{
    Trip, TripEvent, TripEventRepository, TripFilter, TripRepository, TripStatus,
};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// In-memory storage backing every repository trait.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    users: DashMap<Uuid, User>,
    employees: DashMap<Uuid, Employee>,
    buses: DashMap<Uuid, Bus>,
    routes: DashMap<Uuid, Route>,
    trips: DashMap<Uuid, Trip>,
    trip_events: DashMap<Uuid, TripEvent>,
    tickets: DashMap<Uuid, Ticket>,
    bookings: DashMap<Uuid, Booking>,
    receipts: DashMap<Uuid, Receipt>,
    discounts: DashMap<Uuid, Discount>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        self
    }
    fn employees(&self) -> &dyn EmployeeRepository {
        self
    }
    fn buses(&self) -> &dyn BusRepository {
        self
    }
    fn routes(&self) -> &dyn RouteRepository {
        self
    }
    fn trips(&self) -> &dyn TripRepository {
        self
    }
    fn trip_events(&self) -> &dyn TripEventRepository {
        self
    }
    fn tickets(&self) -> &dyn TicketRepository {
        self
    }
    fn bookings(&self) -> &dyn BookingRepository {
        self
    }
    fn receipts(&self) -> &dyn ReceiptRepository {
        self
    }
    fn discounts(&self) -> &dyn DiscountRepository {
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .get(&id)
            .filter(|u| u.company_id == Some(company_id))
            .map(|u| u.clone()))
    }

    async fn save(&self, user: User) -> DomainResult<()> {
        self.users.insert(user.id, user);
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Employee>> {
        Ok(self
            .employees
            .get(&id)
            .filter(|e| e.company_id == company_id)
            .map(|e| e.clone()))
    }

    async fn save(&self, employee: Employee) -> DomainResult<()> {
        self.employees.insert(employee.id, employee);
        Ok(())
    }
}

#[async_trait]
impl BusRepository for InMemoryRepositoryProvider {
    async fn save(&self, bus: Bus) -> DomainResult<()> {
        self.buses.insert(bus.id, bus);
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Bus>> {
        Ok(self
            .buses
            .get(&id)
            .filter(|b| b.company_id == company_id)
            .map(|b| b.clone()))
    }

    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Bus>> {
        Ok(self
            .buses
            .iter()
            .filter(|b| b.company_id == company_id)
            .map(|b| b.clone())
            .collect())
    }

    async fn update(&self, bus: Bus) -> DomainResult<()> {
        if !self.buses.contains_key(&bus.id) {
            return Err(DomainError::not_found("Bus", bus.id));
        }
        self.buses.insert(bus.id, bus);
        Ok(())
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool> {
        Ok(self
            .buses
            .remove_if(&id, |_, b| b.company_id == company_id)
            .is_some())
    }
}

#[async_trait]
impl RouteRepository for InMemoryRepositoryProvider {
    async fn save(&self, route: Route) -> DomainResult<()> {
        self.routes.insert(route.id, route);
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Route>> {
        Ok(self
            .routes
            .get(&id)
            .filter(|r| r.company_id == company_id)
            .map(|r| r.clone()))
    }

    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Route>> {
        Ok(self
            .routes
            .iter()
            .filter(|r| r.company_id == company_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn update(&self, route: Route) -> DomainResult<()> {
        if !self.routes.contains_key(&route.id) {
            return Err(DomainError::not_found("Route", route.id));
        }
        self.routes.insert(route.id, route);
        Ok(())
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool> {
        Ok(self
            .routes
            .remove_if(&id, |_, r| r.company_id == company_id)
            .is_some())
    }
}

#[async_trait]
impl TripRepository for InMemoryRepositoryProvider {
    async fn save(&self, trip: Trip) -> DomainResult<()> {
        self.trips.insert(trip.id, trip);
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Trip>> {
        Ok(self
            .trips
            .get(&id)
            .filter(|t| t.company_id == company_id)
            .map(|t| t.clone()))
    }

    async fn list(&self, company_id: Uuid, filter: TripFilter) -> DomainResult<Vec<Trip>> {
        Ok(self
            .trips
            .iter()
            .filter(|t| t.company_id == company_id)
            .filter(|t| filter.status.map(|s| t.status == s).unwrap_or(true))
            .filter(|t| filter.route_id.map(|r| t.route_id == r).unwrap_or(true))
            .filter(|t| filter.bus_id.map(|b| t.bus_id == b).unwrap_or(true))
            .filter(|t| {
                filter
                    .departing_from
                    .map(|from| t.scheduled_departure >= from)
                    .unwrap_or(true)
            })
            .filter(|t| {
                filter
                    .departing_until
                    .map(|until| t.scheduled_departure < until)
                    .unwrap_or(true)
            })
            .map(|t| t.clone())
            .collect())
    }

    async fn update(&self, trip: Trip) -> DomainResult<()> {
        if !self.trips.contains_key(&trip.id) {
            return Err(DomainError::not_found("Trip", trip.id));
        }
        self.trips.insert(trip.id, trip);
        Ok(())
    }

    async fn update_with_event(&self, trip: Trip, event: TripEvent) -> DomainResult<()> {
        if !self.trips.contains_key(&trip.id) {
            return Err(DomainError::not_found("Trip", trip.id));
        }
        self.trips.insert(trip.id, trip);
        self.trip_events.insert(event.id, event);
        Ok(())
    }
}

#[async_trait]
impl TripEventRepository for InMemoryRepositoryProvider {
    async fn save(&self, event: TripEvent) -> DomainResult<()> {
        self.trip_events.insert(event.id, event);
        Ok(())
    }

    async fn list_for_trip(
        &self,
        company_id: Uuid,
        trip_id: Uuid,
    ) -> DomainResult<Vec<TripEvent>> {
        let mut events: Vec<TripEvent> = self
            .trip_events
            .iter()
            .filter(|e| e.company_id == company_id && e.trip_id == trip_id)
            .map(|e| e.clone())
            .collect();
        events.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        Ok(events)
    }
}

#[async_trait]
impl TicketRepository for InMemoryRepositoryProvider {
    async fn insert_claiming_seat(&self, ticket: Ticket) -> DomainResult<Option<Ticket>> {
        if TicketRepository::reference_exists(self, &ticket.booking_reference).await? {
            return Err(DomainError::Conflict(format!(
                "booking_reference {} already exists",
                ticket.booking_reference
            )));
        }
        // the map entry lock stands in for the row lock
        let Some(mut trip) = self.trips.get_mut(&ticket.trip_id) else {
            return Err(DomainError::not_found("Trip", ticket.trip_id));
        };
        if matches!(trip.status, TripStatus::Cancelled | TripStatus::Completed) {
            return Err(DomainError::BusinessRule(format!(
                "Cannot book ticket for a {} trip",
                trip.status.as_str().to_lowercase()
            )));
        }
        if trip.booked_seats >= trip.capacity {
            return Ok(None);
        }
        trip.booked_seats += 1;
        drop(trip);
        self.tickets.insert(ticket.id, ticket.clone());
        Ok(Some(ticket))
    }

    async fn update_releasing_seat(&self, ticket: Ticket) -> DomainResult<()> {
        if !self.tickets.contains_key(&ticket.id) {
            return Err(DomainError::not_found("Ticket", ticket.id));
        }
        let trip_id = ticket.trip_id;
        self.tickets.insert(ticket.id, ticket);
        if let Some(mut trip) = self.trips.get_mut(&trip_id) {
            trip.booked_seats = (trip.booked_seats - 1).max(0);
        }
        Ok(())
    }

    async fn update(&self, ticket: Ticket) -> DomainResult<()> {
        if !self.tickets.contains_key(&ticket.id) {
            return Err(DomainError::not_found("Ticket", ticket.id));
        }
        self.tickets.insert(ticket.id, ticket);
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Ticket>> {
        Ok(self
            .tickets
            .get(&id)
            .filter(|t| t.company_id == company_id)
            .map(|t| t.clone()))
    }

    async fn list(&self, company_id: Uuid, filter: TicketFilter) -> DomainResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.company_id == company_id)
            .filter(|t| filter.trip_id.map(|id| t.trip_id == id).unwrap_or(true))
            .filter(|t| filter.status.map(|s| t.status == s).unwrap_or(true))
            .filter(|t| {
                filter
                    .customer_id
                    .map(|id| t.customer_id == Some(id))
                    .unwrap_or(true)
            })
            .map(|t| t.clone())
            .collect())
    }

    async fn list_expired(
        &self,
        company_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.company_id == company_id)
            .filter(|t| t.status == TicketStatus::Reserved)
            .filter(|t| t.expires_at.map(|e| e < now).unwrap_or(false))
            .map(|t| t.clone())
            .collect())
    }

    async fn list_expired_all_tenants(&self, now: DateTime<Utc>) -> DomainResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Reserved)
            .filter(|t| t.expires_at.map(|e| e < now).unwrap_or(false))
            .map(|t| t.clone())
            .collect())
    }

    async fn list_departing_between(
        &self,
        company_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> DomainResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.company_id == company_id)
            .filter(|t| {
                self.trips
                    .get(&t.trip_id)
                    .map(|trip| {
                        trip.scheduled_departure >= from && trip.scheduled_departure < until
                    })
                    .unwrap_or(false)
            })
            .map(|t| t.clone())
            .collect())
    }

    async fn reference_exists(&self, reference: &str) -> DomainResult<bool> {
        Ok(self
            .tickets
            .iter()
            .any(|t| t.booking_reference == reference))
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepositoryProvider {
    async fn insert_with_tickets(
        &self,
        booking: Booking,
        ticket_ids: &[Uuid],
    ) -> DomainResult<Booking> {
        // all-or-nothing: verify every ticket before touching any
        for ticket_id in ticket_ids {
            let ok = self
                .tickets
                .get(ticket_id)
                .map(|t| t.company_id == booking.company_id)
                .unwrap_or(false);
            if !ok {
                return Err(DomainError::BusinessRule(format!(
                    "Ticket {} does not belong to your company",
                    ticket_id
                )));
            }
        }
        for ticket_id in ticket_ids {
            if let Some(mut t) = self.tickets.get_mut(ticket_id) {
                t.booking_id = Some(booking.id);
            }
        }
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .get(&id)
            .filter(|b| b.company_id == company_id)
            .map(|b| b.clone()))
    }

    async fn list(
        &self,
        company_id: Uuid,
        customer_id: Option<Uuid>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|b| b.company_id == company_id)
            .filter(|b| customer_id.map(|c| b.customer_id == Some(c)).unwrap_or(true))
            .map(|b| b.clone())
            .collect())
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(DomainError::not_found("Booking", booking.id));
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn reference_exists(&self, reference: &str) -> DomainResult<bool> {
        Ok(self
            .bookings
            .iter()
            .any(|b| b.booking_reference == reference))
    }
}

#[async_trait]
impl ReceiptRepository for InMemoryRepositoryProvider {
    async fn save(&self, receipt: Receipt) -> DomainResult<()> {
        self.receipts.insert(receipt.id, receipt);
        Ok(())
    }

    async fn list_for_booking(
        &self,
        company_id: Uuid,
        booking_id: Uuid,
    ) -> DomainResult<Vec<Receipt>> {
        Ok(self
            .receipts
            .iter()
            .filter(|r| r.company_id == company_id && r.booking_id == booking_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn number_exists(&self, receipt_number: &str) -> DomainResult<bool> {
        Ok(self
            .receipts
            .iter()
            .any(|r| r.receipt_number == receipt_number))
    }
}

#[async_trait]
impl DiscountRepository for InMemoryRepositoryProvider {
    async fn save(&self, discount: Discount) -> DomainResult<()> {
        self.discounts.insert(discount.id, discount);
        Ok(())
    }

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Discount>> {
        Ok(self
            .discounts
            .get(&id)
            .filter(|d| d.company_id == company_id)
            .map(|d| d.clone()))
    }

    async fn find_by_code(
        &self,
        company_id: Uuid,
        code: &str,
    ) -> DomainResult<Option<Discount>> {
        Ok(self
            .discounts
            .iter()
            .find(|d| d.company_id == company_id && d.code == code)
            .map(|d| d.clone()))
    }

    async fn list(&self, company_id: Uuid) -> DomainResult<Vec<Discount>> {
        Ok(self
            .discounts
            .iter()
            .filter(|d| d.company_id == company_id)
            .map(|d| d.clone())
            .collect())
    }

    async fn update(&self, discount: Discount) -> DomainResult<()> {
        if !self.discounts.contains_key(&discount.id) {
            return Err(DomainError::not_found("Discount", discount.id));
        }
        self.discounts.insert(discount.id, discount);
        Ok(())
    }

    async fn increment_usage(&self, company_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let Some(mut d) = self.discounts.get_mut(&id) else {
            return Ok(false);
        };
        if d.company_id != company_id {
            return Ok(false);
        }
        if let Some(limit) = d.usage_limit {
            if d.usage_count >= limit {
                return Ok(false);
            }
        }
        d.usage_count += 1;
        Ok(true)
    }
}
