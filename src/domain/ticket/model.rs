//! Ticket domain entity and lifecycle transitions
//!
//! A ticket claims one seat on one trip. It is never deleted: the
//! terminal statuses (Used, Refunded, Expired) end its life in place.
//! Reservations carry an expiry deadline; a reserved ticket past its
//! deadline reads as Expired everywhere (`effective_status`), and a
//! background sweep materializes the transition.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    /// Seat held, payment pending; expires unless confirmed
    Reserved,
    /// Paid for
    Confirmed,
    /// Passenger checked in at boarding
    CheckedIn,
    /// Journey taken; terminal
    Used,
    /// Called off; seat released; may still be refunded
    Cancelled,
    /// Money returned; terminal
    Refunded,
    /// Reservation deadline passed; terminal
    Expired,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "Reserved",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked In",
            Self::Used => "Used",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::Expired => "Expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Reserved" => Some(Self::Reserved),
            "Confirmed" => Some(Self::Confirmed),
            "Checked In" => Some(Self::CheckedIn),
            "Used" => Some(Self::Used),
            "Cancelled" => Some(Self::Cancelled),
            "Refunded" => Some(Self::Refunded),
            "Expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Completed" => Some(Self::Completed),
            "Failed" => Some(Self::Failed),
            "Refunded" => Some(Self::Refunded),
            _ => None,
        }
    }
}

/// A seat sold (or held) on a trip.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: Uuid,
    pub company_id: Uuid,
    pub trip_id: Uuid,
    /// Customer account, when the passenger has one
    pub customer_id: Option<Uuid>,
    /// Booking group this ticket belongs to, if any
    pub booking_id: Option<Uuid>,
    /// Human-facing unique code, 2 letters + 6 digits
    pub booking_reference: String,
    pub status: TicketStatus,
    pub seat_number: Option<String>,
    pub passenger_name: String,
    pub passenger_email: Option<String>,
    pub passenger_phone: Option<String>,
    pub base_price: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    /// Invariant: `total_price = base_price - discount_amount + tax_amount`
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
    pub checked_in_at: Option<DateTime<Utc>>,
    /// Employee who performed check-in
    pub checked_in_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub cancellation_date: Option<DateTime<Utc>>,
    pub refund_amount: Option<Decimal>,
    pub refund_date: Option<DateTime<Utc>>,
    pub refund_reference: Option<String>,
    pub issued_at: DateTime<Utc>,
    /// Reservation deadline; set only while Reserved
    pub expires_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Price fields must be non-negative and add up.
    pub fn validate_pricing(
        base: Decimal,
        discount: Decimal,
        tax: Decimal,
        total: Decimal,
    ) -> DomainResult<()> {
        if base < Decimal::ZERO || discount < Decimal::ZERO || tax < Decimal::ZERO {
            return Err(DomainError::validation(
                "base_price",
                "Price components must be non-negative",
            ));
        }
        if total != base - discount + tax {
            return Err(DomainError::validation(
                "total_price",
                "Total must equal base - discount + tax",
            ));
        }
        if total < Decimal::ZERO {
            return Err(DomainError::validation(
                "total_price",
                "Total price must be non-negative",
            ));
        }
        Ok(())
    }

    /// The status a reader should see: a reservation past its deadline
    /// is Expired even before the sweep has materialized it.
    pub fn effective_status(&self, now: DateTime<Utc>) -> TicketStatus {
        if self.status == TicketStatus::Reserved {
            if let Some(expires_at) = self.expires_at {
                if expires_at < now {
                    return TicketStatus::Expired;
                }
            }
        }
        self.status
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == TicketStatus::Expired
    }

    /// Reserved → Confirmed. Clears the reservation deadline.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.effective_status(now) != TicketStatus::Reserved {
            return Err(DomainError::invalid_transition(
                "Ticket",
                self.effective_status(now).as_str(),
                TicketStatus::Confirmed.as_str(),
            ));
        }
        self.status = TicketStatus::Confirmed;
        self.payment_status = PaymentStatus::Completed;
        self.expires_at = None;
        Ok(())
    }

    /// Reserved/Confirmed → CheckedIn, recording the operator.
    pub fn check_in(&mut self, operator: Option<Uuid>, now: DateTime<Utc>) -> DomainResult<()> {
        if !matches!(
            self.effective_status(now),
            TicketStatus::Reserved | TicketStatus::Confirmed
        ) {
            return Err(DomainError::invalid_transition(
                "Ticket",
                self.effective_status(now).as_str(),
                TicketStatus::CheckedIn.as_str(),
            ));
        }
        self.status = TicketStatus::CheckedIn;
        self.checked_in_at = Some(now);
        self.checked_in_by = operator;
        Ok(())
    }

    /// Reserved/Confirmed → Cancelled. Requires a reason. The seat is
    /// released by the caller (capacity ledger), atomically with this
    /// status write.
    pub fn cancel(&mut self, reason: &str, now: DateTime<Utc>) -> DomainResult<()> {
        if reason.trim().is_empty() {
            return Err(DomainError::validation(
                "reason",
                "Cancellation reason is required",
            ));
        }
        if !matches!(
            self.effective_status(now),
            TicketStatus::Reserved | TicketStatus::Confirmed
        ) {
            return Err(DomainError::invalid_transition(
                "Ticket",
                self.effective_status(now).as_str(),
                TicketStatus::Cancelled.as_str(),
            ));
        }
        self.status = TicketStatus::Cancelled;
        self.cancellation_reason = Some(reason.to_string());
        self.cancellation_date = Some(now);
        self.expires_at = None;
        Ok(())
    }

    /// Cancelled → Refunded. Requires an amount; the seat count is not
    /// re-incremented (cancellation already released it).
    pub fn refund(
        &mut self,
        amount: Decimal,
        reference: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status != TicketStatus::Cancelled {
            return Err(DomainError::invalid_transition(
                "Ticket",
                self.status.as_str(),
                TicketStatus::Refunded.as_str(),
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation(
                "refund_amount",
                "Refund amount must be positive",
            ));
        }
        self.status = TicketStatus::Refunded;
        self.payment_status = PaymentStatus::Refunded;
        self.refund_amount = Some(amount);
        self.refund_date = Some(now);
        self.refund_reference = reference;
        Ok(())
    }

    /// Materialize expiry: Reserved past deadline → Expired. Used by the
    /// background sweep; a no-op for anything else.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == TicketStatus::Reserved
            && self.expires_at.map(|e| e < now).unwrap_or(false)
        {
            self.status = TicketStatus::Expired;
            true
        } else {
            false
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_ticket() -> Ticket {
        let base = Decimal::new(3000, 2);
        Ticket {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            customer_id: None,
            booking_id: None,
            booking_reference: "AB123456".into(),
            status: TicketStatus::Reserved,
            seat_number: Some("12A".into()),
            passenger_name: "Jo Passenger".into(),
            passenger_email: None,
            passenger_phone: None,
            base_price: base,
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_price: base,
            payment_status: PaymentStatus::Pending,
            checked_in_at: None,
            checked_in_by: None,
            cancellation_reason: None,
            cancellation_date: None,
            refund_amount: None,
            refund_date: None,
            refund_reference: None,
            issued_at: Utc::now(),
            expires_at: Some(Utc::now() + Duration::hours(24)),
        }
    }

    #[test]
    fn reserved_confirms_and_clears_expiry() {
        let mut t = sample_ticket();
        t.confirm(Utc::now()).unwrap();
        assert_eq!(t.status, TicketStatus::Confirmed);
        assert_eq!(t.payment_status, PaymentStatus::Completed);
        assert!(t.expires_at.is_none());
    }

    #[test]
    fn reserved_and_confirmed_check_in() {
        let operator = Uuid::new_v4();
        let mut t = sample_ticket();
        t.check_in(Some(operator), Utc::now()).unwrap();
        assert_eq!(t.status, TicketStatus::CheckedIn);
        assert_eq!(t.checked_in_by, Some(operator));
        assert!(t.checked_in_at.is_some());

        let mut t = sample_ticket();
        t.confirm(Utc::now()).unwrap();
        t.check_in(None, Utc::now()).unwrap();
        assert_eq!(t.status, TicketStatus::CheckedIn);
    }

    #[test]
    fn checked_in_ticket_cannot_check_in_again() {
        let mut t = sample_ticket();
        t.check_in(None, Utc::now()).unwrap();
        let err = t.check_in(None, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(t.status, TicketStatus::CheckedIn);
    }

    #[test]
    fn cancel_requires_reason_and_valid_state() {
        let mut t = sample_ticket();
        assert!(t.cancel("", Utc::now()).is_err());
        assert_eq!(t.status, TicketStatus::Reserved);

        t.cancel("changed plans", Utc::now()).unwrap();
        assert_eq!(t.status, TicketStatus::Cancelled);
        assert!(t.cancellation_date.is_some());

        // cancelling again fails without touching status
        let err = t.cancel("again", Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
        assert_eq!(t.status, TicketStatus::Cancelled);
    }

    #[test]
    fn refund_only_after_cancel() {
        let mut t = sample_ticket();
        let err = t
            .refund(Decimal::new(3000, 2), None, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));

        t.cancel("changed plans", Utc::now()).unwrap();
        t.refund(Decimal::new(3000, 2), Some("RF-1".into()), Utc::now())
            .unwrap();
        assert_eq!(t.status, TicketStatus::Refunded);
        assert_eq!(t.payment_status, PaymentStatus::Refunded);
        assert_eq!(t.refund_reference.as_deref(), Some("RF-1"));
    }

    #[test]
    fn refund_requires_positive_amount() {
        let mut t = sample_ticket();
        t.cancel("changed plans", Utc::now()).unwrap();
        assert!(t.refund(Decimal::ZERO, None, Utc::now()).is_err());
        assert_eq!(t.status, TicketStatus::Cancelled);
    }

    #[test]
    fn reservation_past_deadline_reads_expired() {
        let mut t = sample_ticket();
        t.expires_at = Some(Utc::now() - Duration::minutes(1));
        assert_eq!(t.effective_status(Utc::now()), TicketStatus::Expired);
        assert!(t.is_expired(Utc::now()));
        // stored status is untouched until the sweep runs
        assert_eq!(t.status, TicketStatus::Reserved);
    }

    #[test]
    fn expired_reservation_rejects_transitions() {
        let mut t = sample_ticket();
        t.expires_at = Some(Utc::now() - Duration::minutes(1));
        assert!(t.confirm(Utc::now()).is_err());
        assert!(t.check_in(None, Utc::now()).is_err());
        assert!(t.cancel("too late", Utc::now()).is_err());
    }

    #[test]
    fn sweep_materializes_expiry() {
        let mut t = sample_ticket();
        t.expires_at = Some(Utc::now() - Duration::minutes(1));
        assert!(t.expire(Utc::now()));
        assert_eq!(t.status, TicketStatus::Expired);
        // second pass is a no-op
        assert!(!t.expire(Utc::now()));
    }

    #[test]
    fn confirmed_ticket_does_not_expire() {
        let mut t = sample_ticket();
        t.confirm(Utc::now()).unwrap();
        assert!(!t.expire(Utc::now()));
        assert_eq!(t.status, TicketStatus::Confirmed);
    }

    #[test]
    fn pricing_must_add_up() {
        let base = Decimal::new(5000, 2);
        let discount = Decimal::new(500, 2);
        let tax = Decimal::new(250, 2);
        let total = base - discount + tax;
        assert!(Ticket::validate_pricing(base, discount, tax, total).is_ok());
        assert!(Ticket::validate_pricing(base, discount, tax, base).is_err());
        assert!(Ticket::validate_pricing(Decimal::new(-1, 0), discount, tax, total).is_err());
    }

    #[test]
    fn status_roundtrip() {
        for status in &[
            TicketStatus::Reserved,
            TicketStatus::Confirmed,
            TicketStatus::CheckedIn,
            TicketStatus::Used,
            TicketStatus::Cancelled,
            TicketStatus::Refunded,
            TicketStatus::Expired,
        ] {
            assert_eq!(TicketStatus::parse(status.as_str()), Some(*status));
        }
    }
}
