//! Trip aggregate: trips, their lifecycle and audit events

mod model;
mod repository;

pub use model::{Trip, TripEvent, TripEventType, TripStatus};
pub use repository::{TripEventRepository, TripFilter, TripRepository};
