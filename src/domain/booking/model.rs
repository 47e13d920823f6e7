//! Booking and receipt domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ticket::PaymentStatus;
use crate::domain::{DomainError, DomainResult};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Confirmed" => Some(Self::Confirmed),
            "Cancelled" => Some(Self::Cancelled),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A group of tickets sold together with consolidated pricing.
///
/// Tickets are independently valid without a booking; the booking adds
/// one reference and one payment for the lot.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_id: Option<Uuid>,
    /// Human-facing unique code, 2 letters + 6 digits
    pub booking_reference: String,
    pub status: BookingStatus,
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    /// Invariant: `final_amount = total_amount - discount_amount + tax_amount`
    pub final_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Record payment capture: Pending → Confirmed.
    pub fn mark_paid(
        &mut self,
        reference: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != BookingStatus::Pending {
            return Err(DomainError::invalid_transition(
                "Booking",
                self.status.as_str(),
                BookingStatus::Confirmed.as_str(),
            ));
        }
        self.status = BookingStatus::Confirmed;
        self.payment_status = PaymentStatus::Completed;
        self.payment_reference = reference;
        self.paid_at = Some(now);
        Ok(())
    }
}

/// Proof of payment for a booking; immutable once issued.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub id: Uuid,
    pub company_id: Uuid,
    pub booking_id: Uuid,
    /// "R" + 9 digits, globally unique
    pub receipt_number: String,
    pub amount: Decimal,
    pub currency: String,
    pub issued_at: DateTime<Utc>,
    /// Employee who issued the receipt
    pub issued_by: Option<Uuid>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_booking() -> Booking {
        let total = Decimal::new(9000, 2);
        Booking {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            customer_id: None,
            booking_reference: "XY654321".into(),
            status: BookingStatus::Pending,
            total_amount: total,
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            final_amount: total,
            payment_status: PaymentStatus::Pending,
            payment_reference: None,
            paid_at: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pending_booking_captures_payment() {
        let mut b = sample_booking();
        b.mark_paid(Some("PAY-9".into()), Utc::now()).unwrap();
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert_eq!(b.payment_status, PaymentStatus::Completed);
        assert!(b.paid_at.is_some());
    }

    #[test]
    fn double_capture_rejected() {
        let mut b = sample_booking();
        b.mark_paid(None, Utc::now()).unwrap();
        let err = b.mark_paid(None, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(b.status, BookingStatus::Confirmed);
    }
}
