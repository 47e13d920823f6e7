//! Booking and receipt repository interfaces

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Booking, Receipt};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert the booking and attach the given tickets to it, all in
    /// one transaction. Every ticket must belong to `booking.company_id`;
    /// any mismatch or missing ticket aborts the whole operation.
    async fn insert_with_tickets(
        &self,
        booking: Booking,
        ticket_ids: &[Uuid],
    ) -> DomainResult<Booking>;

    async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> DomainResult<Option<Booking>>;
    async fn list(&self, company_id: Uuid, customer_id: Option<Uuid>)
        -> DomainResult<Vec<Booking>>;
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Whether any booking anywhere already carries this reference.
    async fn reference_exists(&self, reference: &str) -> DomainResult<bool>;
}

#[async_trait]
pub trait ReceiptRepository: Send + Sync {
    async fn save(&self, receipt: Receipt) -> DomainResult<()>;
    async fn list_for_booking(
        &self,
        company_id: Uuid,
        booking_id: Uuid,
    ) -> DomainResult<Vec<Receipt>>;

    /// Whether any receipt anywhere already carries this number.
    async fn number_exists(&self, receipt_number: &str) -> DomainResult<bool>;
}
