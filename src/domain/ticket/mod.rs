//! Ticket aggregate

mod model;
mod repository;

pub use model::{PaymentStatus, Ticket, TicketStatus};
pub use repository::{TicketFilter, TicketRepository};
