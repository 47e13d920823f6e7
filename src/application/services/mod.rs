//! Application services: use-case orchestration over the repositories

pub mod bookings;
pub mod discounts;
pub mod ticket_expiry;
pub mod ticketing;
pub mod trips;

#[cfg(test)]
pub mod testing;

pub use bookings::{BookingService, NewBooking, NewReceipt};
pub use discounts::{DiscountService, DiscountUpdate, NewDiscount};
pub use ticket_expiry::start_ticket_expiry_task;
pub use ticketing::{IssueTicket, TicketingService};
pub use trips::{NewTrip, NewTripEvent, TripService};
