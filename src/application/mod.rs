//! Application layer - business use cases

pub mod services;

pub use services::{
    BookingService, DiscountService, TicketingService, TripService,
};
