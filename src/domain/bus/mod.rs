//! Bus aggregate

mod model;
mod repository;

pub use model::{Bus, BusStatus};
pub use repository::BusRepository;
