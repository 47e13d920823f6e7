//! Repository provider for the domain layer
//!
//! Unified access to all per-aggregate repositories. Services hold one
//! `Arc<dyn RepositoryProvider>` and request only the repository they
//! need.

use super::booking::{BookingRepository, ReceiptRepository};
use super::bus::BusRepository;
use super::discount::DiscountRepository;
use super::employee::EmployeeRepository;
use super::route::RouteRepository;
use super::ticket::TicketRepository;
use super::trip::{TripEventRepository, TripRepository};
use super::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn employees(&self) -> &dyn EmployeeRepository;
    fn buses(&self) -> &dyn BusRepository;
    fn routes(&self) -> &dyn RouteRepository;
    fn trips(&self) -> &dyn TripRepository;
    fn trip_events(&self) -> &dyn TripEventRepository;
    fn tickets(&self) -> &dyn TicketRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn receipts(&self) -> &dyn ReceiptRepository;
    fn discounts(&self) -> &dyn DiscountRepository;
}
