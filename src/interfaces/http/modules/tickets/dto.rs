//! Ticket DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::ticket::Ticket;

/// Request to issue a ticket
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTicketRequest {
    pub trip_id: Uuid,
    pub customer_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub passenger_name: String,
    #[validate(email)]
    pub passenger_email: Option<String>,
    pub passenger_phone: Option<String>,
    pub seat_number: Option<String>,
    /// Discount code to price against
    pub discount_code: Option<String>,
    pub tax_amount: Option<Decimal>,
    /// Explicit initial status; defaults to Reserved with a 24h expiry
    pub status: Option<String>,
}

/// Request body for check-in
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    /// Employee performing the check-in
    pub checked_in_by: Option<Uuid>,
}

/// Reason body for cancellation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CancelTicketRequest {
    #[validate(length(min = 1, message = "reason is required"))]
    pub reason: String,
}

/// Request body for refunds
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefundTicketRequest {
    pub refund_amount: Decimal,
    pub refund_reference: Option<String>,
}

/// Ticket details in API responses.
///
/// `status` is the effective status: a reservation past its deadline
/// reads as Expired even before the sweep materializes it.
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketDto {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub booking_reference: String,
    pub status: String,
    pub seat_number: Option<String>,
    pub passenger_name: String,
    pub passenger_email: Option<String>,
    pub passenger_phone: Option<String>,
    pub base_price: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_price: Decimal,
    pub payment_status: String,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_in_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub cancellation_date: Option<DateTime<Utc>>,
    pub refund_amount: Option<Decimal>,
    pub refund_date: Option<DateTime<Utc>>,
    pub refund_reference: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Ticket> for TicketDto {
    fn from(t: Ticket) -> Self {
        let status = t.effective_status(Utc::now());
        Self {
            id: t.id,
            trip_id: t.trip_id,
            customer_id: t.customer_id,
            booking_id: t.booking_id,
            booking_reference: t.booking_reference,
            status: status.as_str().to_string(),
            seat_number: t.seat_number,
            passenger_name: t.passenger_name,
            passenger_email: t.passenger_email,
            passenger_phone: t.passenger_phone,
            base_price: t.base_price,
            discount_amount: t.discount_amount,
            tax_amount: t.tax_amount,
            total_price: t.total_price,
            payment_status: t.payment_status.as_str().to_string(),
            checked_in_at: t.checked_in_at,
            checked_in_by: t.checked_in_by,
            cancellation_reason: t.cancellation_reason,
            cancellation_date: t.cancellation_date,
            refund_amount: t.refund_amount,
            refund_date: t.refund_date,
            refund_reference: t.refund_reference,
            issued_at: t.issued_at,
            expires_at: t.expires_at,
        }
    }
}
