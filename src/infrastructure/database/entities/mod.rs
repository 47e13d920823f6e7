//! SeaORM entities, one per table

pub mod booking;
pub mod bus;
pub mod company;
pub mod discount;
pub mod employee;
pub mod receipt;
pub mod route;
pub mod ticket;
pub mod trip;
pub mod trip_event;
pub mod user;
