//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::{BookingRepository, ReceiptRepository};
use crate::domain::bus::BusRepository;
use crate::domain::discount::DiscountRepository;
use crate::domain::employee::EmployeeRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::route::RouteRepository;
use crate::domain::ticket::TicketRepository;
use crate::domain::trip::{TripEventRepository, TripRepository};
use crate::domain::user::UserRepository;

use super::booking_repository::{SeaOrmBookingRepository, SeaOrmReceiptRepository};
use super::bus_repository::SeaOrmBusRepository;
use super::discount_repository::SeaOrmDiscountRepository;
use super::employee_repository::SeaOrmEmployeeRepository;
use super::route_repository::SeaOrmRouteRepository;
use super::ticket_repository::SeaOrmTicketRepository;
use super::trip_repository::{SeaOrmTripEventRepository, SeaOrmTripRepository};
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    employees: SeaOrmEmployeeRepository,
    buses: SeaOrmBusRepository,
    routes: SeaOrmRouteRepository,
    trips: SeaOrmTripRepository,
    trip_events: SeaOrmTripEventRepository,
    tickets: SeaOrmTicketRepository,
    bookings: SeaOrmBookingRepository,
    receipts: SeaOrmReceiptRepository,
    discounts: SeaOrmDiscountRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            employees: SeaOrmEmployeeRepository::new(db.clone()),
            buses: SeaOrmBusRepository::new(db.clone()),
            routes: SeaOrmRouteRepository::new(db.clone()),
            trips: SeaOrmTripRepository::new(db.clone()),
            trip_events: SeaOrmTripEventRepository::new(db.clone()),
            tickets: SeaOrmTicketRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            receipts: SeaOrmReceiptRepository::new(db.clone()),
            discounts: SeaOrmDiscountRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn employees(&self) -> &dyn EmployeeRepository {
        &self.employees
    }

    fn buses(&self) -> &dyn BusRepository {
        &self.buses
    }

    fn routes(&self) -> &dyn RouteRepository {
        &self.routes
    }

    fn trips(&self) -> &dyn TripRepository {
        &self.trips
    }

    fn trip_events(&self) -> &dyn TripEventRepository {
        &self.trip_events
    }

    fn tickets(&self) -> &dyn TicketRepository {
        &self.tickets
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn receipts(&self) -> &dyn ReceiptRepository {
        &self.receipts
    }

    fn discounts(&self) -> &dyn DiscountRepository {
        &self.discounts
    }
}
