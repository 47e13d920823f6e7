//! HTTP interface: router, middleware, common types and modules

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

use std::sync::Arc;

use crate::application::services::{
    BookingService, DiscountService, TicketingService, TripService,
};
use crate::domain::RepositoryProvider;

pub use middleware::AuthState;
pub use router::{create_api_router, ApiDoc};

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub trips: Arc<TripService>,
    pub ticketing: Arc<TicketingService>,
    pub bookings: Arc<BookingService>,
    pub discounts: Arc<DiscountService>,
}
