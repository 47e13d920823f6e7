//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod bus_repository;
pub mod discount_repository;
pub mod employee_repository;
pub mod repository_provider;
pub mod route_repository;
pub mod ticket_repository;
pub mod trip_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

/// Map a SeaORM error to the domain taxonomy, surfacing unique-index
/// violations as `Conflict` so callers can retry reference generation.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = e.sql_err() {
        return DomainError::Conflict(msg);
    }
    DomainError::Database(e.to_string())
}

/// A status string in the store that no longer parses is data
/// corruption, not caller error.
pub(crate) fn corrupt_status(entity: &'static str, value: &str) -> DomainError {
    DomainError::Database(format!("corrupt {} status: {}", entity, value))
}
