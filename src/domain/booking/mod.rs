//! Booking aggregate: bookings and their receipts

mod model;
mod repository;

pub use model::{Booking, BookingStatus, Receipt};
pub use repository::{BookingRepository, ReceiptRepository};
