//! Booking aggregation service
//!
//! Groups tickets under one booking with consolidated pricing. The
//! attach step is all-or-nothing: a single ticket failing the tenant
//! guard aborts the whole booking, including tickets already matched.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus, Receipt};
use crate::domain::reference::{self, ReferenceKind};
use crate::domain::ticket::PaymentStatus;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, TenantContext};

/// Input for booking creation.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: Option<Uuid>,
    /// Tickets to group under this booking
    pub ticket_ids: Vec<Uuid>,
    /// Totals for bookings created ahead of their tickets; ignored when
    /// tickets are given (their prices are summed instead)
    pub total_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Input for receipt issuance.
#[derive(Debug, Clone)]
pub struct NewReceipt {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub issued_by: Option<Uuid>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a booking, attaching the given tickets atomically.
    pub async fn create(&self, ctx: &TenantContext, input: NewBooking) -> DomainResult<Booking> {
        let customer_id = if ctx.is_customer() {
            Some(ctx.user_id)
        } else {
            if let Some(customer_id) = input.customer_id {
                self.repos
                    .users()
                    .find_by_id(ctx.company_id, customer_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::validation(
                            "customer",
                            "Customer does not belong to your company",
                        )
                    })?;
            }
            input.customer_id
        };

        // consolidated pricing: sum member tickets when given
        let (total_amount, discount_amount, tax_amount) = if input.ticket_ids.is_empty() {
            (
                input.total_amount.unwrap_or(Decimal::ZERO),
                input.discount_amount.unwrap_or(Decimal::ZERO),
                input.tax_amount.unwrap_or(Decimal::ZERO),
            )
        } else {
            let mut total = Decimal::ZERO;
            let mut discount = Decimal::ZERO;
            let mut tax = Decimal::ZERO;
            for ticket_id in &input.ticket_ids {
                let ticket = self
                    .repos
                    .tickets()
                    .find_by_id(ctx.company_id, *ticket_id)
                    .await?
                    .ok_or_else(|| {
                        DomainError::BusinessRule(format!(
                            "Ticket {} does not belong to your company",
                            ticket_id
                        ))
                    })?;
                if ctx.is_customer() && ticket.customer_id != Some(ctx.user_id) {
                    return Err(DomainError::BusinessRule(format!(
                        "Ticket {} does not belong to your company",
                        ticket_id
                    )));
                }
                total += ticket.base_price;
                discount += ticket.discount_amount;
                tax += ticket.tax_amount;
            }
            (total, discount, tax)
        };

        if total_amount < Decimal::ZERO || discount_amount < Decimal::ZERO
            || tax_amount < Decimal::ZERO
        {
            return Err(DomainError::validation(
                "total_amount",
                "Amounts must be non-negative",
            ));
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            company_id: ctx.company_id,
            customer_id,
            booking_reference: self.unique_booking_reference().await?,
            status: BookingStatus::Pending,
            total_amount,
            discount_amount,
            tax_amount,
            final_amount: total_amount - discount_amount + tax_amount,
            payment_status: PaymentStatus::Pending,
            payment_reference: None,
            paid_at: None,
            notes: input.notes,
            created_at: Utc::now(),
        };

        let created = self
            .insert_with_reference_retry(booking, &input.ticket_ids)
            .await?;
        info!(
            booking_id = %created.id,
            reference = %created.booking_reference,
            tickets = input.ticket_ids.len(),
            "Booking created"
        );
        Ok(created)
    }

    async fn insert_with_reference_retry(
        &self,
        mut booking: Booking,
        ticket_ids: &[Uuid],
    ) -> DomainResult<Booking> {
        match self
            .repos
            .bookings()
            .insert_with_tickets(booking.clone(), ticket_ids)
            .await
        {
            Ok(b) => Ok(b),
            Err(DomainError::Conflict(_)) => {
                warn!(
                    reference = %booking.booking_reference,
                    "Booking reference collided at insert, regenerating"
                );
                booking.booking_reference = self.unique_booking_reference().await?;
                self.repos
                    .bookings()
                    .insert_with_tickets(booking, ticket_ids)
                    .await
            }
            Err(e) => Err(e),
        }
    }

    async fn unique_booking_reference(&self) -> DomainResult<String> {
        loop {
            let candidate = reference::candidate(ReferenceKind::Booking);
            if !self.repos.bookings().reference_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
    }

    pub async fn get(&self, ctx: &TenantContext, id: Uuid) -> DomainResult<Booking> {
        let booking = self
            .repos
            .bookings()
            .find_by_id(ctx.company_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;
        if ctx.is_customer() && booking.customer_id != Some(ctx.user_id) {
            return Err(DomainError::not_found("Booking", id));
        }
        Ok(booking)
    }

    pub async fn list(&self, ctx: &TenantContext) -> DomainResult<Vec<Booking>> {
        let customer_filter = ctx.is_customer().then_some(ctx.user_id);
        self.repos.bookings().list(ctx.company_id, customer_filter).await
    }

    /// Tickets grouped under a booking.
    pub async fn tickets(
        &self,
        ctx: &TenantContext,
        id: Uuid,
    ) -> DomainResult<Vec<crate::domain::ticket::Ticket>> {
        self.get(ctx, id).await?;
        let mut tickets = self
            .repos
            .tickets()
            .list(ctx.company_id, Default::default())
            .await?;
        tickets.retain(|t| t.booking_id == Some(id));
        Ok(tickets)
    }

    /// Record payment capture for the booking.
    pub async fn mark_paid(
        &self,
        ctx: &TenantContext,
        id: Uuid,
        payment_reference: Option<String>,
    ) -> DomainResult<Booking> {
        let mut booking = self.get(ctx, id).await?;
        booking.mark_paid(payment_reference, Utc::now())?;
        self.repos.bookings().update(booking.clone()).await?;
        info!(booking_id = %booking.id, "Booking payment captured");
        Ok(booking)
    }

    /// Issue a receipt for the booking. Defaults to the booking's final
    /// amount.
    pub async fn issue_receipt(
        &self,
        ctx: &TenantContext,
        booking_id: Uuid,
        input: NewReceipt,
    ) -> DomainResult<Receipt> {
        let booking = self.get(ctx, booking_id).await?;

        if let Some(employee_id) = input.issued_by {
            self.repos
                .employees()
                .find_by_id(ctx.company_id, employee_id)
                .await?
                .ok_or_else(|| {
                    DomainError::validation(
                        "issued_by",
                        "Employee does not belong to your company",
                    )
                })?;
        }

        let amount = input.amount.unwrap_or(booking.final_amount);
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation(
                "amount",
                "Receipt amount must be positive",
            ));
        }

        let receipt = Receipt {
            id: Uuid::new_v4(),
            company_id: ctx.company_id,
            booking_id: booking.id,
            receipt_number: self.unique_receipt_number().await?,
            amount,
            currency: input.currency.unwrap_or_else(|| "USD".to_string()),
            issued_at: Utc::now(),
            issued_by: input.issued_by,
        };

        match self.repos.receipts().save(receipt.clone()).await {
            Ok(()) => {}
            Err(DomainError::Conflict(_)) => {
                // one regenerate-and-retry, as for booking references
                let mut retry = receipt.clone();
                retry.receipt_number = self.unique_receipt_number().await?;
                self.repos.receipts().save(retry.clone()).await?;
                info!(number = %retry.receipt_number, booking_id = %booking.id, "Receipt issued");
                return Ok(retry);
            }
            Err(e) => return Err(e),
        }

        info!(number = %receipt.receipt_number, booking_id = %booking.id, "Receipt issued");
        Ok(receipt)
    }

    pub async fn receipts(&self, ctx: &TenantContext, booking_id: Uuid) -> DomainResult<Vec<Receipt>> {
        self.get(ctx, booking_id).await?;
        self.repos
            .receipts()
            .list_for_booking(ctx.company_id, booking_id)
            .await
    }

    async fn unique_receipt_number(&self) -> DomainResult<String> {
        loop {
            let candidate = reference::candidate(ReferenceKind::Receipt);
            if !self.repos.receipts().number_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::*;
    use crate::application::services::ticketing::{IssueTicket, TicketingService};
    use crate::domain::trip::TripRepository;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    struct Setup {
        bookings: BookingService,
        tickets: TicketingService,
        ctx: TenantContext,
        fixtures: Fixtures,
    }

    async fn setup() -> Setup {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let fixtures = seed_company(repos.as_ref()).await;
        let trip = sample_trip(&fixtures, 20);
        let fixtures = Fixtures {
            trip_id: trip.id,
            ..fixtures
        };
        TripRepository::save(repos.as_ref(), trip).await.unwrap();
        Setup {
            bookings: BookingService::new(repos.clone()),
            tickets: TicketingService::new(repos),
            ctx: fixtures.staff_context(),
            fixtures,
        }
    }

    async fn issue(setup: &Setup, name: &str) -> crate::domain::ticket::Ticket {
        setup
            .tickets
            .issue(
                &setup.ctx,
                IssueTicket {
                    trip_id: setup.fixtures.trip_id,
                    customer_id: None,
                    passenger_name: name.into(),
                    passenger_email: None,
                    passenger_phone: None,
                    seat_number: None,
                    discount_code: None,
                    tax_amount: None,
                    status: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_groups_tickets_and_sums_prices() {
        let s = setup().await;
        let a = issue(&s, "A").await;
        let b = issue(&s, "B").await;

        let booking = s
            .bookings
            .create(
                &s.ctx,
                NewBooking {
                    customer_id: None,
                    ticket_ids: vec![a.id, b.id],
                    total_amount: None,
                    discount_amount: None,
                    tax_amount: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_amount, a.base_price + b.base_price);
        assert_eq!(booking.final_amount, booking.total_amount);
        assert_eq!(booking.booking_reference.len(), 8);

        let members = s.bookings.tickets(&s.ctx, booking.id).await.unwrap();
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|t| t.booking_id == Some(booking.id)));
    }

    #[tokio::test]
    async fn foreign_ticket_aborts_whole_booking() {
        let s = setup().await;
        let a = issue(&s, "A").await;
        let foreign = Uuid::new_v4();

        let err = s
            .bookings
            .create(
                &s.ctx,
                NewBooking {
                    customer_id: None,
                    ticket_ids: vec![a.id, foreign],
                    total_amount: None,
                    discount_amount: None,
                    tax_amount: None,
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));

        // nothing was attached
        let ticket = s.tickets.get(&s.ctx, a.id).await.unwrap();
        assert!(ticket.booking_id.is_none());
        assert!(s.bookings.list(&s.ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_booking_uses_request_totals() {
        let s = setup().await;
        let booking = s
            .bookings
            .create(
                &s.ctx,
                NewBooking {
                    customer_id: None,
                    ticket_ids: vec![],
                    total_amount: Some(Decimal::new(12000, 2)),
                    discount_amount: Some(Decimal::new(1000, 2)),
                    tax_amount: Some(Decimal::new(500, 2)),
                    notes: Some("phone order".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(booking.final_amount, Decimal::new(11500, 2));
    }

    #[tokio::test]
    async fn mark_paid_once() {
        let s = setup().await;
        let booking = s
            .bookings
            .create(
                &s.ctx,
                NewBooking {
                    customer_id: None,
                    ticket_ids: vec![],
                    total_amount: Some(Decimal::new(5000, 2)),
                    discount_amount: None,
                    tax_amount: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let paid = s
            .bookings
            .mark_paid(&s.ctx, booking.id, Some("PAY-1".into()))
            .await
            .unwrap();
        assert_eq!(paid.status, BookingStatus::Confirmed);

        let err = s.bookings.mark_paid(&s.ctx, booking.id, None).await.unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn receipt_defaults_to_final_amount() {
        let s = setup().await;
        let a = issue(&s, "A").await;
        let booking = s
            .bookings
            .create(
                &s.ctx,
                NewBooking {
                    customer_id: None,
                    ticket_ids: vec![a.id],
                    total_amount: None,
                    discount_amount: None,
                    tax_amount: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let receipt = s
            .bookings
            .issue_receipt(
                &s.ctx,
                booking.id,
                NewReceipt {
                    amount: None,
                    currency: None,
                    issued_by: Some(s.fixtures.conductor_id),
                },
            )
            .await
            .unwrap();

        assert_eq!(receipt.amount, booking.final_amount);
        assert!(receipt.receipt_number.starts_with('R'));
        assert_eq!(receipt.receipt_number.len(), 10);

        let receipts = s.bookings.receipts(&s.ctx, booking.id).await.unwrap();
        assert_eq!(receipts.len(), 1);
    }

    #[tokio::test]
    async fn customer_cannot_group_someone_elses_ticket() {
        let s = setup().await;
        let staff_sold = issue(&s, "Walk-in").await;
        let customer_ctx = s.fixtures.customer_context();

        let err = s
            .bookings
            .create(
                &customer_ctx,
                NewBooking {
                    customer_id: None,
                    ticket_ids: vec![staff_sold.id],
                    total_amount: None,
                    discount_amount: None,
                    tax_amount: None,
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn cross_tenant_booking_is_not_found() {
        let s = setup().await;
        let booking = s
            .bookings
            .create(
                &s.ctx,
                NewBooking {
                    customer_id: None,
                    ticket_ids: vec![],
                    total_amount: Some(Decimal::ONE),
                    discount_amount: None,
                    tax_amount: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let foreign_ctx = s.fixtures.other_company_context();
        let err = s.bookings.get(&foreign_ctx, booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
