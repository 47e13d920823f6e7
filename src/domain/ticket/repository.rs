//! Ticket repository interface
//!
//! The seat-claiming and seat-releasing methods are where the trip
//! capacity ledger lives: implementations must apply the ticket write
//! and the `booked_seats` adjustment as one atomic unit, with the
//! capacity check guarded against concurrent issuers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{Ticket, TicketStatus};
use crate::domain::DomainResult;

/// Filter for ticket listings.
#[derive(Debug, Default, Clone)]
pub struct TicketFilter {
    pub trip_id: Option<Uuid>,
    pub status: Option<TicketStatus>,
    /// Restrict to one customer (always set for Customer-role callers)
    pub customer_id: Option<Uuid>,
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Insert the ticket and increment its trip's `booked_seats`, in one
    /// transaction. The increment is conditional on
    /// `booked_seats < capacity`; when the guard fails the insert is
    /// aborted and `Ok(None)` is returned so the caller can surface
    /// `CapacityExceeded`. A booking-reference collision surfaces as
    /// `DomainError::Conflict` for the generator to retry.
    async fn insert_claiming_seat(&self, ticket: Ticket) -> DomainResult<Option<Ticket>>;

    /// Update the ticket and decrement its trip's `booked_seats`
    /// (floored at zero), in one transaction.
    async fn update_releasing_seat(&self, ticket: Ticket) -> DomainResult<()>;

    async fn update(&self, ticket: Ticket) -> DomainResult<()>;
    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Ticket>>;
    async fn list(&self, company_id: Uuid, filter: TicketFilter) -> DomainResult<Vec<Ticket>>;

    /// Reserved tickets with `expires_at` before `now`, company-scoped.
    async fn list_expired(&self, company_id: Uuid, now: DateTime<Utc>)
        -> DomainResult<Vec<Ticket>>;

    /// Reserved tickets past deadline across all tenants, for the sweep.
    async fn list_expired_all_tenants(&self, now: DateTime<Utc>) -> DomainResult<Vec<Ticket>>;

    /// Tickets for trips departing within `[from, until)`.
    async fn list_departing_between(
        &self,
        company_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> DomainResult<Vec<Ticket>>;

    /// Whether any ticket anywhere already carries this reference.
    async fn reference_exists(&self, reference: &str) -> DomainResult<bool>;
}
