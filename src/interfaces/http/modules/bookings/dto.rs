//! Booking and receipt DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::booking::{Booking, Receipt};

/// Request to create a booking grouping tickets
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub customer_id: Option<Uuid>,
    /// Tickets to group; all must belong to the caller's company
    #[serde(default)]
    pub tickets: Vec<Uuid>,
    /// Totals for bookings created ahead of their tickets
    pub total_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Request to capture payment for a booking
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkPaidRequest {
    pub payment_reference: Option<String>,
}

/// Request to issue a receipt
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReceiptRequest {
    /// Defaults to the booking's final amount
    pub amount: Option<Decimal>,
    /// ISO 4217; defaults to USD
    pub currency: Option<String>,
    /// Employee issuing the receipt
    pub issued_by: Option<Uuid>,
}

/// Booking details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub booking_reference: String,
    pub status: String,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub final_amount: Decimal,
    pub payment_status: String,
    pub payment_reference: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            customer_id: b.customer_id,
            booking_reference: b.booking_reference,
            status: b.status.as_str().to_string(),
            total_amount: b.total_amount,
            discount_amount: b.discount_amount,
            tax_amount: b.tax_amount,
            final_amount: b.final_amount,
            payment_status: b.payment_status.as_str().to_string(),
            payment_reference: b.payment_reference,
            paid_at: b.paid_at,
            notes: b.notes,
            created_at: b.created_at,
        }
    }
}

/// Receipt details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReceiptDto {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub receipt_number: String,
    pub amount: Decimal,
    pub currency: String,
    pub issued_at: DateTime<Utc>,
    pub issued_by: Option<Uuid>,
}

impl From<Receipt> for ReceiptDto {
    fn from(r: Receipt) -> Self {
        Self {
            id: r.id,
            booking_id: r.booking_id,
            receipt_number: r.receipt_number,
            amount: r.amount,
            currency: r.currency,
            issued_at: r.issued_at,
            issued_by: r.issued_by,
        }
    }
}
