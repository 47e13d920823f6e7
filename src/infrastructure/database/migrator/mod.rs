//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_companies;
mod m20250101_000002_create_users;
mod m20250101_000003_create_employees;
mod m20250101_000004_create_buses;
mod m20250101_000005_create_routes;
mod m20250101_000006_create_trips;
mod m20250101_000007_create_trip_events;
mod m20250101_000008_create_bookings;
mod m20250101_000009_create_tickets;
mod m20250101_000010_create_receipts;
mod m20250101_000011_create_discounts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_companies::Migration),
            Box::new(m20250101_000002_create_users::Migration),
            Box::new(m20250101_000003_create_employees::Migration),
            Box::new(m20250101_000004_create_buses::Migration),
            Box::new(m20250101_000005_create_routes::Migration),
            Box::new(m20250101_000006_create_trips::Migration),
            Box::new(m20250101_000007_create_trip_events::Migration),
            Box::new(m20250101_000008_create_bookings::Migration),
            Box::new(m20250101_000009_create_tickets::Migration),
            Box::new(m20250101_000010_create_receipts::Migration),
            Box::new(m20250101_000011_create_discounts::Migration),
        ]
    }
}
